//! Simplification rules for function calls: exact values at special points, parity, inverse
//! function pairs and numerical evaluation at floating-point arguments.

use rug::Rational;
use crate::numerical::eval_function;
use crate::symbolic::{
    expr::{Primary, Special, SymExpr, PI},
    simplify::{number::Number, step::Step},
    step_collector::StepCollector,
};

/// Functions with `f(-x) = -f(x)`.
const ODD_FUNCTIONS: &[&str] = &["sin", "tan", "csc", "cot", "asin", "atan", "sinh", "tanh"];

/// Functions with `f(-x) = f(x)`.
const EVEN_FUNCTIONS: &[&str] = &["cos", "sec", "cosh", "abs"];

/// If the argument is a rational multiple of `pi` (including zero), returns the multiple.
fn pi_multiple(arg: &SymExpr) -> Option<Rational> {
    if arg.is_integer() && arg.is_zero() {
        return Some(Rational::new());
    }

    match arg {
        SymExpr::Primary(Primary::Symbol(sym)) if sym == PI => Some(Rational::from(1)),
        SymExpr::Mul(factors) => {
            let mut pi_count = 0;
            let mut multiple = Rational::from(1);
            for factor in factors {
                if factor.as_symbol() == Some(PI) {
                    pi_count += 1;
                } else {
                    multiple *= factor.as_rational()?;
                }
            }
            (pi_count == 1).then_some(multiple)
        },
        _ => None,
    }
}

/// Returns `cos(c * pi)` if it is one of the tabulated values.
fn cos_pi(c: &Rational) -> Option<SymExpr> {
    // reduce to [0, 2), then use cos(2pi - x) = cos(x) and cos(pi - x) = -cos(x)
    let two = Rational::from(2);
    let mut c = c.clone() - Rational::from(&two * Rational::from(c / &two).floor());
    if c > 1 {
        c = two - c;
    }
    let negate = c > Rational::from((1, 2));
    if negate {
        c = Rational::from(1) - c;
    }

    let value = match (c.numer().to_u32()?, c.denom().to_u32()?) {
        (0, _) => SymExpr::one(),
        (1, 6) => SymExpr::integer(3).sqrt() * SymExpr::fraction(1, 2),
        (1, 4) => SymExpr::integer(2).sqrt() * SymExpr::fraction(1, 2),
        (1, 3) => SymExpr::fraction(1, 2),
        (1, 2) => SymExpr::zero(),
        _ => return None,
    };
    Some(if negate { -value } else { value })
}

/// Returns `sin(c * pi)` if it is one of the tabulated values.
fn sin_pi(c: &Rational) -> Option<SymExpr> {
    cos_pi(&(Rational::from((1, 2)) - c.clone()))
}

/// Divides two exact values, mapping division by zero to complex infinity.
fn ratio(num: SymExpr, den: SymExpr) -> SymExpr {
    if den.is_zero() {
        SymExpr::Special(Special::ComplexInfinity)
    } else {
        num / den
    }
}

/// Returns `asin(r)` for the tabulated non-negative rationals.
fn asin_value(r: &Rational) -> Option<SymExpr> {
    let pi = SymExpr::symbol(PI);
    if r.is_zero() {
        Some(SymExpr::zero())
    } else if *r == Rational::from((1, 2)) {
        Some(SymExpr::fraction(1, 6) * pi)
    } else if *r == 1 {
        Some(SymExpr::fraction(1, 2) * pi)
    } else {
        None
    }
}

/// Evaluates a function at an argument where its value is known exactly.
///
/// `sin(pi/6) = 1/2`
/// `ln(1) = 0`
/// `atan(1) = pi/4`
pub fn evaluate_exact(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let (name, arg) = expr.as_call1()?;
    let special = arg.as_special();
    let value = match name {
        "sin" | "cos" | "tan" | "sec" | "csc" | "cot" => {
            let c = pi_multiple(arg)?;
            let (sin, cos) = (sin_pi(&c)?, cos_pi(&c)?);
            match name {
                "sin" => sin,
                "cos" => cos,
                "tan" => ratio(sin, cos),
                "sec" => ratio(SymExpr::one(), cos),
                "csc" => ratio(SymExpr::one(), sin),
                _ => ratio(cos, sin),
            }
        },
        "asin" => {
            let r = arg.as_rational()?;
            if r < 0 {
                return None;
            }
            asin_value(&r)?
        },
        "acos" => {
            let r = arg.as_rational()?;
            let asin = asin_value(&Rational::from(r.abs_ref()))?;
            let asin = if r < 0 { -asin } else { asin };
            SymExpr::fraction(1, 2) * SymExpr::symbol(PI) - asin
        },
        "atan" => match special {
            Some(Special::Infinity) => SymExpr::fraction(1, 2) * SymExpr::symbol(PI),
            Some(Special::NegInfinity) => SymExpr::fraction(-1, 2) * SymExpr::symbol(PI),
            _ => {
                let r = arg.as_rational()?;
                if r.is_zero() {
                    SymExpr::zero()
                } else if r == 1 {
                    SymExpr::fraction(1, 4) * SymExpr::symbol(PI)
                } else {
                    return None;
                }
            },
        },
        "sinh" | "tanh" => match special {
            Some(Special::Infinity) if name == "sinh" => SymExpr::Special(Special::Infinity),
            Some(Special::NegInfinity) if name == "sinh" => SymExpr::Special(Special::NegInfinity),
            Some(Special::Infinity) => SymExpr::one(),
            Some(Special::NegInfinity) => SymExpr::integer(-1),
            _ if arg.is_zero() => SymExpr::zero(),
            _ => return None,
        },
        "cosh" => match special {
            Some(Special::Infinity | Special::NegInfinity) => SymExpr::Special(Special::Infinity),
            _ if arg.is_zero() => SymExpr::one(),
            _ => return None,
        },
        "exp" => match special {
            Some(Special::Infinity) => SymExpr::Special(Special::Infinity),
            Some(Special::NegInfinity) => SymExpr::zero(),
            Some(_) => SymExpr::Special(Special::Undefined),
            None if arg.is_zero() => SymExpr::one(),
            None => return None,
        },
        "ln" => match special {
            Some(Special::Infinity | Special::NegInfinity | Special::ComplexInfinity) => {
                SymExpr::Special(Special::Infinity)
            },
            Some(Special::Undefined) => SymExpr::Special(Special::Undefined),
            None if arg.is_zero() => SymExpr::Special(Special::ComplexInfinity),
            None if arg.is_one() => SymExpr::zero(),
            None => return None,
        },
        "abs" => match special {
            Some(Special::Infinity | Special::NegInfinity | Special::ComplexInfinity) => {
                SymExpr::Special(Special::Infinity)
            },
            _ => match Number::from_expr(arg)? {
                Number::Exact(r) => SymExpr::rational(r.abs()),
                Number::Approx(f) => SymExpr::float(f.abs()),
            },
        },
        _ => return None,
    };

    step_collector.push(Step::EvaluateFunction);
    Some(value)
}

/// Evaluates a function numerically at a floating-point argument.
pub fn evaluate_float(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let (name, arg) = expr.as_call1()?;
    let value = eval_function(name, arg.as_float()?)?;

    step_collector.push(Step::EvaluateFunctionNumerically);
    Some(SymExpr::float(value))
}

/// `sin(-x) = -sin(x)`
/// `cos(-x) = cos(x)`
pub fn parity(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let (name, arg) = expr.as_call1()?;
    let positive = arg.strip_negative()?;
    let value = if ODD_FUNCTIONS.contains(&name) {
        -SymExpr::call1(name, positive)
    } else if EVEN_FUNCTIONS.contains(&name) {
        SymExpr::call1(name, positive)
    } else {
        return None;
    };

    step_collector.push(Step::FunctionParity);
    Some(value)
}

/// `exp(ln(a)) = a`
/// `exp(2ln(a)) = a^2`
/// `ln(exp(a)) = a`
/// `ln(1/n) = -ln(n)`
pub fn inverse_functions(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let (name, arg) = expr.as_call1()?;
    let value = match name {
        "exp" => match arg.as_call1() {
            Some(("ln", inner)) => inner.clone(),
            _ => {
                // exp(c * ln(a)) for a numeric coefficient c
                let SymExpr::Mul(factors) = arg else {
                    return None;
                };
                let [coefficient, log] = factors.as_slice() else {
                    return None;
                };
                let Some(("ln", inner)) = log.as_call1() else {
                    return None;
                };
                if !coefficient.is_number() {
                    return None;
                }
                inner.clone().pow(coefficient.clone())
            },
        },
        "ln" => match arg {
            SymExpr::Primary(Primary::Call(inner_name, inner_args)) if inner_name == "exp" => {
                inner_args.first()?.clone()
            },
            SymExpr::Exp(base, exp) if base.as_integer().is_some_and(|n| *n > 1) && exp.as_integer().is_some_and(|e| *e == -1) => {
                -SymExpr::call1("ln", (**base).clone())
            },
            _ => return None,
        },
        _ => return None,
    };

    step_collector.push(Step::InverseFunctions);
    Some(value)
}

/// Applies all function rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    evaluate_exact(expr, step_collector)
        .or_else(|| evaluate_float(expr, step_collector))
        .or_else(|| parity(expr, step_collector))
        .or_else(|| inverse_functions(expr, step_collector))
}
