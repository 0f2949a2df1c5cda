//! Numerical evaluation of symbolic expressions.
//!
//! Evaluation is real-valued: anything that would leave the real numbers (the logarithm of a
//! negative number, an even root of a negative number) or is not finite produces [`None`].

pub mod approx;

use rug::{ops::Pow, Float};
use crate::consts::PI;
use crate::primitive::float;
use crate::symbolic::expr::{Primary, SymExpr, PI as PI_SYMBOL};

/// Evaluates a function of one argument. Returns [`None`] if the function is unknown or the
/// result is not a finite real number.
pub fn eval_function(name: &str, arg: &Float) -> Option<Float> {
    let x = arg.clone();
    let value = match name {
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tan" => x.tan(),
        "sec" => x.sec(),
        "csc" => x.csc(),
        "cot" => x.cot(),
        "asin" => x.asin(),
        "acos" => x.acos(),
        "atan" => x.atan(),
        "sinh" => x.sinh(),
        "cosh" => x.cosh(),
        "tanh" => x.tanh(),
        "exp" => x.exp(),
        "ln" => x.ln(),
        "abs" => x.abs(),
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Evaluates the expression, substituting the given values for its symbols.
///
/// The symbol `pi` always evaluates to the circle constant. Returns [`None`] if the expression
/// contains an unbound symbol, a special value, or evaluates to something that is not a finite
/// real number.
pub fn eval(expr: &SymExpr, bindings: &[(&str, &Float)]) -> Option<Float> {
    let value = match expr {
        SymExpr::Primary(Primary::Integer(n)) => float(n),
        SymExpr::Primary(Primary::Float(f)) => f.clone(),
        SymExpr::Primary(Primary::Symbol(sym)) => {
            match bindings.iter().find(|(name, _)| *name == sym.as_str()) {
                Some((_, value)) => (*value).clone(),
                None if sym == PI_SYMBOL => PI.clone(),
                None => return None,
            }
        },
        SymExpr::Primary(Primary::Call(name, args)) => {
            let [arg] = args.as_slice() else {
                return None;
            };
            eval_function(name, &eval(arg, bindings)?)?
        },
        SymExpr::Add(terms) => {
            let mut sum = float(0);
            for term in terms {
                sum += eval(term, bindings)?;
            }
            sum
        },
        SymExpr::Mul(factors) => {
            let mut product = float(1);
            for factor in factors {
                product *= eval(factor, bindings)?;
            }
            product
        },
        SymExpr::Exp(base, exp) => {
            let base = eval(base, bindings)?;
            let exp = eval(exp, bindings)?;
            if base < 0 && !exp.is_integer() {
                return None;
            }
            base.pow(&exp)
        },
        SymExpr::Special(_) => return None,
    };
    value.is_finite().then_some(value)
}

/// Evaluates an expression with a single variable at the given point.
pub fn eval_at(expr: &SymExpr, var: &str, value: &Float) -> Option<Float> {
    eval(expr, &[(var, value)])
}

/// Evaluates an expression without free symbols, such as `sqrt(2) + pi`.
pub fn eval_constant(expr: &SymExpr) -> Option<Float> {
    eval(expr, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;
    use crate::symbolic::simplify::tests::parse_raw;

    #[test]
    fn constants() {
        let value = eval_constant(&parse_raw("sqrt(2) * pi")).unwrap();
        assert_float_absolute_eq!(value.to_f64(), 4.442882938158366, 1e-12);
        assert_float_absolute_eq!(eval_constant(&parse_raw("e")).unwrap().to_f64(), std::f64::consts::E, 1e-12);
    }

    #[test]
    fn bound_variables() {
        let expr = parse_raw("x^2 + sin(x)");
        let value = eval_at(&expr, "x", &float(2)).unwrap();
        assert_float_absolute_eq!(value.to_f64(), 4.0 + 2f64.sin(), 1e-12);
    }

    #[test]
    fn outside_the_reals() {
        assert_eq!(eval_constant(&parse_raw("ln(-1)")), None);
        assert_eq!(eval_constant(&parse_raw("(-4)^(1/2)")), None);
        assert_eq!(eval_constant(&parse_raw("1/0")), None);
        assert_eq!(eval_constant(&parse_raw("y + 1")), None);
    }
}
