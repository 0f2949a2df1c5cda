//! Symbolic integration.
//!
//! The integrator is a table lookup with a handful of rules layered on top of it. An integrand is
//! first split by linearity: sums are integrated term by term, and factors that do not depend on
//! the variable are pulled out of products. What remains is looked up in the [`table`] of known
//! primitives, integrated by parts if it is a product of a polynomial and a suitable function, or
//! decomposed into partial fractions if it is a rational function. As a last resort, the integrand
//! is expanded and the process repeats.
//!
//! Integrands outside these forms (such as `exp(x^2)`, which has no elementary primitive) produce
//! an [`UnsupportedIntegral`] error.

mod parts;
mod rational;
mod table;

use cas_error::Error;
use crate::numerical::eval_constant;
use crate::symbolic::{
    error::UnsupportedIntegral,
    expr::{Primary, SymExpr, Special},
    limit::{limit, Direction},
    simplify::{expand, normalize},
};

/// The deepest the integrator recurses through integration by parts and expansion.
const MAX_DEPTH: usize = 8;

/// Finds a primitive of a normalized expression.
fn primitive(expr: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    if depth > MAX_DEPTH || !expr.is_finite() {
        return None;
    }
    if expr.is_free_of(var) {
        return Some(expr.clone() * SymExpr::symbol(var));
    }

    let found = match expr {
        SymExpr::Add(terms) => terms.iter()
            .map(|term| primitive(term, var, depth))
            .collect::<Option<Vec<_>>>()
            .map(SymExpr::Add),
        SymExpr::Mul(factors) => {
            let (constant, variable): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(|factor| factor.is_free_of(var));
            if constant.is_empty() {
                parts::by_parts(&variable, var, depth)
            } else {
                let rest = SymExpr::Mul(variable).downgrade();
                primitive(&rest, var, depth).map(|found| SymExpr::Mul(constant) * found)
            }
        },
        _ => table::single(expr, var),
    };

    found
        .or_else(|| rational::rational_function(expr, var))
        .or_else(|| {
            let expanded = normalize(&expand(expr));
            if expanded != *expr {
                tracing::trace!(target: "integrate", expanded = %expanded, "expand");
                primitive(&expanded, var, depth + 1)
            } else {
                None
            }
        })
}

/// Computes a primitive (antiderivative) of `expr` with respect to `var`, without the constant of
/// integration.
///
/// Returns an [`UnsupportedIntegral`] error if no rule applies.
pub fn integrate(expr: &SymExpr, var: &str) -> Result<SymExpr, Error> {
    let expr = normalize(expr);
    tracing::debug!(target: "integrate", expr = %expr, var, "integrate");
    primitive(&expr, var, 0)
        .map(|found| normalize(&found))
        .ok_or_else(|| Error::unspanned(UnsupportedIntegral { integrand: expr.to_string() }))
}

/// Rewrites `ln(c)` as `ln(-c)` wherever `c` is a constant that evaluates to a negative number.
///
/// The table gives `ln(u)` where `ln|u|` is meant. Both are primitives on an interval where `u`
/// keeps its sign, so the real branch can be taken once a bound has been substituted.
fn real_logarithms(expr: &SymExpr) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            let args = args.iter().map(real_logarithms).collect::<Vec<_>>();
            match args.as_slice() {
                [arg] if name == "ln"
                    && arg.free_symbols().is_empty()
                    && eval_constant(arg).is_some_and(|value| value < 0) => {
                    SymExpr::call1("ln", -arg.clone())
                },
                _ => SymExpr::call(name.clone(), args),
            }
        },
        SymExpr::Add(terms) => SymExpr::Add(terms.iter().map(real_logarithms).collect()),
        SymExpr::Mul(factors) => SymExpr::Mul(factors.iter().map(real_logarithms).collect()),
        SymExpr::Exp(base, exp) => real_logarithms(base).pow(real_logarithms(exp)),
        SymExpr::Primary(_) | SymExpr::Special(_) => expr.clone(),
    }
}

/// Evaluates a primitive at one of the bounds of a definite integral.
///
/// Logarithms of negative constants are taken on the real branch, so `ln(x)` at `x = -2` gives
/// `ln(2)`.
///
/// If substitution does not produce a finite value (the bound is infinite, or the primitive has a
/// removable singularity there), the one-sided limit towards the bound is used instead: from the
/// left at the upper bound, from the right at the lower bound.
pub fn evaluate_bound(primitive: &SymExpr, var: &str, bound: &SymExpr, direction: Direction) -> Result<SymExpr, Error> {
    let substituted = normalize(&real_logarithms(&normalize(&primitive.substitute(var, bound))));
    if substituted.is_finite() {
        return Ok(substituted);
    }
    tracing::debug!(target: "integrate", bound = %bound, ?direction, "bound_by_limit");
    limit(primitive, var, bound, direction)
}

/// Computes the definite integral of `expr` from `lower` to `upper` with the fundamental theorem
/// of calculus.
///
/// Divergent integrals evaluate to an infinite [`Special`] value.
pub fn integrate_definite(expr: &SymExpr, var: &str, lower: &SymExpr, upper: &SymExpr) -> Result<SymExpr, Error> {
    let found = integrate(expr, var)?;
    let at_upper = evaluate_bound(&found, var, upper, Direction::Left)?;
    let at_lower = evaluate_bound(&found, var, lower, Direction::Right)?;
    let value = normalize(&(at_upper - at_lower));
    if value.as_special() == Some(Special::Undefined) {
        tracing::warn!(target: "integrate", expr = %expr, "undefined_definite_integral");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::eval_at;
    use crate::primitive::float;
    use crate::symbolic::derivative::differentiate;
    use crate::symbolic::simplify::tests::parse;
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;

    const POINTS: [f64; 3] = [0.3, 0.7, 1.3];

    /// Checks that the derivative of the computed primitive agrees with the integrand.
    fn test_for_function(function: &'static str) {
        const TOL: f64 = 1e-9;

        let expr = parse(function);
        let found = integrate(&expr, "x")
            .unwrap_or_else(|_| panic!("primitive for \"{function}\" was unable to be computed"));
        let derivative = differentiate(&found, "x", 1).unwrap();

        for point in POINTS {
            let expected = eval_at(&expr, "x", &float(point)).unwrap().to_f64();
            let actual = eval_at(&derivative, "x", &float(point)).unwrap().to_f64();
            assert!(
                (expected - actual).abs() < TOL,
                "for \"{function}\" at x={point}, the primitive {found} has derivative {actual}, expected {expected}",
            );
        }
    }

    fn primitive_of(input: &str) -> SymExpr {
        integrate(&parse(input), "x").unwrap()
    }

    #[test]
    fn power_rule() {
        assert_eq!(primitive_of("x^2"), parse("x^3/3"));
        assert_eq!(primitive_of("1/x"), parse("ln(x)"));
        assert_eq!(primitive_of("5"), parse("5x"));
        test_for_function("3x^4 - 2x + 7");
        test_for_function("sqrt(x)");
    }

    #[test]
    fn linear_arguments() {
        test_for_function("1/(2x + 1)");
        test_for_function("(2x + 1)^3");
        test_for_function("exp(3x)");
        test_for_function("sin(2x)");
        test_for_function("cos(1 - x)");
        test_for_function("2^x");
    }

    #[test]
    fn trigonometric() {
        assert_eq!(primitive_of("sec(x)^2"), parse("tan(x)"));
        test_for_function("sin(x)^2");
        test_for_function("cos(x)^2");
        test_for_function("tan(x)");
    }

    #[test]
    fn inverse_trigonometric() {
        assert_eq!(primitive_of("1/(1 + x^2)"), parse("atan(x)"));
        assert_eq!(primitive_of("1/sqrt(1 - x^2)"), parse("asin(x)"));
        test_for_function("1/sqrt(4 - x^2)");
    }

    #[test]
    fn by_parts() {
        test_for_function("x*exp(x)");
        test_for_function("x^2*sin(x)");
        test_for_function("x*ln(x)");
        test_for_function("ln(x)");
        test_for_function("x*cos(3x)");
    }

    #[test]
    fn rational_functions() {
        test_for_function("1/(x^2 + 5x + 6)");
        test_for_function("(x + 1)/(x^2 + 2x + 5)");
        test_for_function("x^3/(x + 2)");
        test_for_function("1/(x - 3)^2");
    }

    #[test]
    fn constant_factors() {
        test_for_function("a*x^2");
        assert_eq!(primitive_of("a*cos(x)"), parse("a*sin(x)"));
    }

    #[test]
    fn non_elementary() {
        let err = integrate(&parse("exp(x^2)"), "x").unwrap_err();
        assert!(err.is::<UnsupportedIntegral>());
        assert!(integrate(&parse("sin(x)/x"), "x").unwrap_err().is::<UnsupportedIntegral>());
    }

    #[test]
    fn polynomial_round_trip() {
        let p = parse("4x^3 - x^2 + 2x - 9");
        let derivative = differentiate(&p, "x", 1).unwrap();
        let found = integrate(&derivative, "x").unwrap();
        let constant = normalize(&p.substitute("x", &SymExpr::zero()));
        assert_eq!(normalize(&(found + constant)), p);
    }

    #[test]
    fn definite() {
        let definite = |expr: &str, lower: &str, upper: &str| {
            integrate_definite(&parse(expr), "x", &parse(lower), &parse(upper)).unwrap()
        };
        assert_eq!(definite("x^2", "0", "3"), SymExpr::integer(9));
        assert_eq!(definite("2x + 1", "1", "2"), SymExpr::integer(4));
        assert_eq!(definite("exp(-x)", "0", "oo"), SymExpr::one());
        assert_eq!(definite("x^(-2)", "1", "oo"), SymExpr::one());
        assert_eq!(definite("cos(x)", "0", "pi/2"), SymExpr::one());
    }

    #[test]
    fn definite_on_negative_interval() {
        let value = integrate_definite(&parse("1/x"), "x", &parse("-2"), &parse("-1")).unwrap();
        assert_eq!(value, parse("-ln(2)"));

        let value = integrate_definite(&parse("tan(x)"), "x", &parse("2"), &parse("3")).unwrap();
        let expected = (-3.0_f64.cos()).ln() - (-2.0_f64.cos()).ln();
        assert_float_absolute_eq!(eval_constant(&value).unwrap().to_f64(), -expected, 1e-9);
    }
}
