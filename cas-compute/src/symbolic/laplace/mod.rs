//! The Laplace transform and its inverse.
//!
//! The forward transform `F(s) = ∫_0^∞ f(t) e^(-st) dt` is computed from a table of base
//! transforms together with linearity and two shift theorems:
//!
//! - `L{e^(at) f(t)} = F(s - a)`
//! - `L{t^n f(t)} = (-1)^n F^(n)(s)`
//!
//! The inverse transform is in [`inverse`]. Both directions return the unconditional result; no
//! region of convergence or Heaviside step is attached.

mod inverse;

pub use inverse::inverse_laplace;

use cas_error::Error;
use rug::Integer;
use crate::symbolic::{
    derivative::differentiate,
    error::UnsupportedTransform,
    expr::SymExpr,
    poly::as_linear,
    simplify::{expand, normalize},
};

/// The deepest the transform recurses through the shift theorems and expansion.
const MAX_DEPTH: usize = 6;

/// `n!`
pub(crate) fn factorial(n: usize) -> Integer {
    let mut result = Integer::from(1);
    for k in 2..=n {
        result *= Integer::from(k);
    }
    result
}

/// If the factor is `exp(a t + b)` or `c^(a t + b)`, returns the growth rate and the constant
/// factor, `(a, exp(b))` or `(a ln c, c^b)`.
fn exponential(factor: &SymExpr, t: &str) -> Option<(SymExpr, SymExpr)> {
    if let Some(("exp", arg)) = factor.as_call1() {
        let (a, b) = as_linear(arg, t)?;
        return Some((a, SymExpr::call1("exp", b)));
    }
    match factor {
        SymExpr::Exp(base, exp) if base.is_free_of(t) => {
            let (a, b) = as_linear(exp, t)?;
            Some((a * SymExpr::call1("ln", (**base).clone()), (**base).clone().pow(b)))
        },
        _ => None,
    }
}

/// If the factor is `t^n` for a positive integer `n`, returns `n`.
fn time_power(factor: &SymExpr, t: &str) -> Option<usize> {
    if factor.as_symbol() == Some(t) {
        return Some(1);
    }
    match factor {
        SymExpr::Exp(base, exp) if base.as_symbol() == Some(t) => {
            exp.as_integer()?.to_usize().filter(|&n| n > 0)
        },
        _ => None,
    }
}

/// Transforms a factor that appears in the table of base transforms.
fn base_transform(expr: &SymExpr, t: &str, s: &SymExpr) -> Option<SymExpr> {
    if let Some(n) = time_power(expr, t) {
        return Some(SymExpr::integer(factorial(n)) * s.clone().pow(SymExpr::integer(-(n as i64) - 1)));
    }
    if let Some((rate, scale)) = exponential(expr, t) {
        return Some(scale * (s.clone() - rate).recip());
    }

    let (name, arg) = expr.as_call1()?;
    let (omega, shift) = as_linear(arg, t)?;
    if !shift.is_zero() {
        return None;
    }
    let s2 = s.clone().pow(SymExpr::integer(2));
    let omega2 = omega.clone().pow(SymExpr::integer(2));
    let (numerator, denominator) = match name {
        "sin" => (omega, s2 + omega2),
        "cos" => (s.clone(), s2 + omega2),
        "sinh" => (omega, s2 - omega2),
        "cosh" => (s.clone(), s2 - omega2),
        _ => return None,
    };
    Some(numerator * denominator.recip())
}

/// Transforms a product whose factors all depend on `t`.
fn product(factors: &[SymExpr], t: &str, s: &SymExpr, depth: usize) -> Option<SymExpr> {
    let without = |index: usize| {
        let rest = factors.iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, factor)| factor.clone())
            .collect();
        normalize(&SymExpr::Mul(rest).downgrade())
    };
    let var = s.as_symbol()?;

    if let Some((index, (rate, scale))) = factors.iter()
        .enumerate()
        .find_map(|(i, factor)| exponential(factor, t).map(|found| (i, found)))
    {
        let transformed = transform(&without(index), t, s, depth + 1)?;
        tracing::trace!(target: "laplace", rate = %rate, "frequency_shift");
        return Some(scale * transformed.substitute(var, &(s.clone() - rate)));
    }

    if let Some((index, n)) = factors.iter()
        .enumerate()
        .find_map(|(i, factor)| time_power(factor, t).map(|n| (i, n)))
    {
        let transformed = normalize(&transform(&without(index), t, s, depth + 1)?);
        tracing::trace!(target: "laplace", n, "multiplication_by_power");
        let derivative = differentiate(&transformed, var, n).ok()?;
        let sign = if n % 2 == 0 { SymExpr::one() } else { SymExpr::integer(-1) };
        return Some(sign * derivative);
    }

    None
}

fn transform(expr: &SymExpr, t: &str, s: &SymExpr, depth: usize) -> Option<SymExpr> {
    if depth > MAX_DEPTH || !expr.is_finite() {
        return None;
    }
    if expr.is_free_of(t) {
        return Some(expr.clone() * s.clone().recip());
    }

    let found = match expr {
        SymExpr::Add(terms) => terms.iter()
            .map(|term| transform(term, t, s, depth))
            .collect::<Option<Vec<_>>>()
            .map(SymExpr::Add),
        SymExpr::Mul(factors) => {
            let (constant, variable): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(|factor| factor.is_free_of(t));
            if constant.is_empty() {
                product(&variable, t, s, depth)
            } else {
                let rest = SymExpr::Mul(variable).downgrade();
                transform(&rest, t, s, depth).map(|found| SymExpr::Mul(constant) * found)
            }
        },
        _ => base_transform(expr, t, s),
    };

    found.or_else(|| {
        let expanded = normalize(&expand(expr));
        if expanded != *expr {
            transform(&expanded, t, s, depth + 1)
        } else {
            None
        }
    })
}

/// Computes the Laplace transform of `expr`, a function of `time`, as a function of `frequency`.
///
/// Returns an [`UnsupportedTransform`] error if the expression is not built from the supported
/// base transforms, or if it already depends on `frequency`.
pub fn laplace(expr: &SymExpr, time: &str, frequency: &str) -> Result<SymExpr, Error> {
    let expr = normalize(expr);
    tracing::debug!(target: "laplace", expr = %expr, time, frequency, "laplace");
    let unsupported = || Error::unspanned(UnsupportedTransform {
        expr: expr.to_string(),
        inverse: false,
    });
    if expr.contains_symbol(frequency) {
        return Err(unsupported());
    }

    transform(&expr, time, &SymExpr::symbol(frequency), 0)
        .map(|found| normalize(&found))
        .ok_or_else(unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::eval;
    use crate::primitive::float;
    use crate::symbolic::simplify::tests::parse;
    use pretty_assertions::assert_eq;

    fn transform_of(input: &str) -> SymExpr {
        laplace(&parse(input), "t", "s").unwrap()
    }

    /// Compares the transform with the expected expression at a few frequencies, with `a = 1/2`.
    fn assert_transform(input: &str, expected: &str) {
        const TOL: f64 = 1e-12;

        let found = transform_of(input);
        let expected_expr = parse(expected);
        let a = float(0.5);
        for s in [5.0, 7.5, 12.0] {
            let s = float(s);
            let bindings = [("s", &s), ("a", &a)];
            let actual = eval(&found, &bindings).unwrap().to_f64();
            let wanted = eval(&expected_expr, &bindings).unwrap().to_f64();
            assert!(
                (actual - wanted).abs() < TOL,
                "L{{{input}}} was {found}, expected {expected}",
            );
        }
    }

    #[test]
    fn base_transforms() {
        assert_eq!(transform_of("1"), parse("1/s"));
        assert_eq!(transform_of("t"), parse("1/s^2"));
        assert_eq!(transform_of("t^3"), parse("6/s^4"));
        assert_transform("exp(2t)", "1/(s - 2)");
        assert_transform("sin(3t)", "3/(s^2 + 9)");
        assert_transform("cos(t)", "s/(s^2 + 1)");
        assert_transform("sinh(2t)", "2/(s^2 - 4)");
        assert_transform("cosh(2t)", "s/(s^2 - 4)");
    }

    #[test]
    fn linearity() {
        assert_transform("3 + 2t", "3/s + 2/s^2");
        assert_transform("5sin(2t) - exp(-t)", "10/(s^2 + 4) - 1/(s + 1)");
    }

    #[test]
    fn frequency_shift() {
        assert_transform("exp(-t)*sin(t)", "1/((s + 1)^2 + 1)");
        assert_transform("t*exp(3t)", "1/(s - 3)^2");
    }

    #[test]
    fn multiplication_by_time() {
        assert_transform("t*sin(t)", "2s/(s^2 + 1)^2");
    }

    #[test]
    fn symbolic_parameters() {
        assert_transform("exp(a*t)", "1/(s - a)");
        assert_transform("sin(a*t)", "a/(s^2 + a^2)");
    }

    #[test]
    fn expansion() {
        assert_transform("(t + 1)^2", "2/s^3 + 2/s^2 + 1/s");
    }

    #[test]
    fn unsupported() {
        let err = laplace(&parse("1/t"), "t", "s").unwrap_err();
        assert!(!err.downcast_ref::<UnsupportedTransform>().unwrap().inverse);
        assert!(laplace(&parse("sin(t^2)"), "t", "s").is_err());
        assert!(laplace(&parse("s*t"), "t", "s").is_err());
    }
}
