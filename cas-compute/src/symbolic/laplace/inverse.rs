//! The inverse Laplace transform of rational functions.
//!
//! Rational functions with rational coefficients are decomposed into partial fractions, and each
//! fraction is inverted with the table
//!
//! - `A / (s - r)^k -> A t^(k-1) e^(rt) / (k-1)!`
//! - `(B s + C) / ((s + h)^2 + w^2) -> e^(-ht) (B cos(wt) + (C - B h) / w sin(wt))`
//!
//! Functions with symbolic parameters are matched against the same table directly.

use cas_error::Error;
use crate::symbolic::{
    error::UnsupportedTransform,
    expr::SymExpr,
    partial_fraction::decompose,
    poly::{as_linear, coefficients, Poly},
    simplify::{as_numer_denom, normalize},
};
use super::factorial;

/// `t^(k-1) e^(rt) / (k-1)!`
fn pole(root: SymExpr, power: usize, t: &SymExpr) -> SymExpr {
    let k = power - 1;
    t.clone().pow(SymExpr::integer(k))
        * SymExpr::call1("exp", root * t.clone())
        * SymExpr::integer(factorial(k)).recip()
}

/// Inverts a proper rational function with rational coefficients.
fn rational(expr: &SymExpr, s: &str, t: &SymExpr) -> Option<SymExpr> {
    let (num, den) = as_numer_denom(expr);
    let numerator = Poly::from_expr(&num, s)?;
    let denominator = Poly::from_expr(&den, s)?;
    if numerator.degree() >= denominator.degree() {
        return None;
    }
    let fractions = decompose(&numerator, &denominator)?;

    let mut terms = Vec::new();
    for term in &fractions.poles {
        terms.push(
            SymExpr::rational(term.coefficient.clone())
                * pole(SymExpr::rational(term.root.clone()), term.power, t),
        );
    }

    if let Some(quadratic) = &fractions.quadratic {
        let (h, k) = quadratic.completed_square();
        let omega = SymExpr::rational(k).sqrt();
        let damping = SymExpr::call1("exp", -SymExpr::rational(h.clone()) * t.clone());
        let cosine = SymExpr::rational(quadratic.linear.clone())
            * SymExpr::call1("cos", omega.clone() * t.clone());
        let sine = SymExpr::rational(quadratic.constant.clone() - quadratic.linear.clone() * h)
            * omega.clone().recip()
            * SymExpr::call1("sin", omega * t.clone());
        terms.push(damping * (cosine + sine));
    }

    Some(SymExpr::Add(terms))
}

/// `1 / (a s + b)^k`
fn linear_power(expr: &SymExpr, s: &str, t: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Exp(base, exp) = expr else {
        return None;
    };
    let power = (-exp.as_integer()?.clone()).to_usize().filter(|&k| k > 0)?;
    let (a, b) = as_linear(base, s)?;
    let scale = a.clone().pow(SymExpr::integer(-(power as i64)));
    Some(scale * pole(-b * a.recip(), power, t))
}

/// Matches a rational function with symbolic coefficients against the table of transforms.
fn symbolic(expr: &SymExpr, s: &str, t: &SymExpr) -> Option<SymExpr> {
    if let Some(found) = linear_power(expr, s, t) {
        return Some(found);
    }

    let (num, den) = as_numer_denom(expr);
    let n = coefficients(&num, s)?;
    let d = coefficients(&den, s)?;
    if n.is_empty() || n.len() > 2 || n.len() >= d.len() {
        return None;
    }
    let n0 = n[0].clone();
    let n1 = n.get(1).cloned().unwrap_or_else(SymExpr::zero);

    match d.as_slice() {
        [d0, d1] => Some(n0 * d1.clone().recip() * SymExpr::call1("exp", -d0.clone() * d1.clone().recip() * t.clone())),

        // (n1 s + n0) / (d2 s^2 + d0)
        [d0, d1, d2] if d1.is_zero() => {
            let ratio = normalize(&(d0.clone() * d2.clone().recip()));
            let (square, cos, sin) = match ratio.strip_negative() {
                Some(square) => (square, "cosh", "sinh"),
                None => (ratio, "cos", "sin"),
            };
            let omega = square.sqrt();
            let scale = d2.clone().recip();
            Some(scale * (
                n1 * SymExpr::call1(cos, omega.clone() * t.clone())
                    + n0 * omega.clone().recip() * SymExpr::call1(sin, omega * t.clone())
            ))
        },

        // n0 / (dk s^k)
        [zeros @ .., dk] if n.len() == 1 && zeros.iter().all(SymExpr::is_zero) => {
            Some(n0 * dk.clone().recip() * pole(SymExpr::zero(), zeros.len(), t))
        },

        _ => None,
    }
}

fn invert(expr: &SymExpr, s: &str, t: &SymExpr) -> Option<SymExpr> {
    if expr.is_zero() {
        return Some(SymExpr::zero());
    }
    if expr.is_free_of(s) || !expr.is_finite() {
        return None;
    }

    let found = match expr {
        SymExpr::Add(terms) => terms.iter()
            .map(|term| invert(term, s, t))
            .collect::<Option<Vec<_>>>()
            .map(SymExpr::Add),
        SymExpr::Mul(factors) => {
            let (constant, variable): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(|factor| factor.is_free_of(s));
            if constant.is_empty() {
                None
            } else {
                let rest = SymExpr::Mul(variable).downgrade();
                invert(&rest, s, t).map(|found| SymExpr::Mul(constant) * found)
            }
        },
        _ => None,
    };

    found
        .or_else(|| rational(expr, s, t))
        .or_else(|| symbolic(expr, s, t))
}

/// Computes the inverse Laplace transform of `expr`, a function of `frequency`, as a function of
/// `time`.
///
/// Returns an [`UnsupportedTransform`] error unless the expression is a proper rational function
/// whose denominator factors into linear and quadratic factors.
pub fn inverse_laplace(expr: &SymExpr, frequency: &str, time: &str) -> Result<SymExpr, Error> {
    let expr = normalize(expr);
    tracing::debug!(target: "laplace", expr = %expr, frequency, time, "inverse_laplace");
    let unsupported = || Error::unspanned(UnsupportedTransform {
        expr: expr.to_string(),
        inverse: true,
    });
    if expr.contains_symbol(time) {
        return Err(unsupported());
    }

    invert(&expr, frequency, &SymExpr::symbol(time))
        .map(|found| normalize(&found))
        .ok_or_else(unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::eval;
    use crate::primitive::float;
    use crate::symbolic::laplace::laplace;
    use crate::symbolic::simplify::tests::parse;
    use pretty_assertions::assert_eq;

    fn inverse_of(input: &str) -> SymExpr {
        inverse_laplace(&parse(input), "s", "t").unwrap()
    }

    /// Compares the inverse transform with the expected expression at a few times, with `a = 1/2`.
    fn assert_inverse(input: &str, expected: &str) {
        const TOL: f64 = 1e-12;

        let found = inverse_of(input);
        let expected_expr = parse(expected);
        let a = float(0.5);
        for t in [0.25, 1.0, 2.5] {
            let t = float(t);
            let bindings = [("t", &t), ("a", &a)];
            let actual = eval(&found, &bindings).unwrap().to_f64();
            let wanted = eval(&expected_expr, &bindings).unwrap().to_f64();
            assert!(
                (actual - wanted).abs() < TOL,
                "inverse of {input} was {found}, expected {expected}",
            );
        }
    }

    #[test]
    fn simple_poles() {
        assert_eq!(inverse_of("1/s"), SymExpr::one());
        assert_eq!(inverse_of("1/(s - 2)"), parse("exp(2t)"));
        assert_inverse("1/((s + 1)*(s + 2))", "exp(-t) - exp(-2t)");
    }

    #[test]
    fn repeated_poles() {
        assert_eq!(inverse_of("1/s^2"), parse("t"));
        assert_inverse("2/s^3", "t^2");
        assert_inverse("1/(s - 3)^2", "t*exp(3t)");
    }

    #[test]
    fn quadratic_factors() {
        assert_inverse("1/(s^2 + 4)", "sin(2t)/2");
        assert_inverse("s/(s^2 + 1)", "cos(t)");
        assert_inverse("(s + 1)/((s + 1)^2 + 4)", "exp(-t)*cos(2t)");
        assert_inverse("1/(s*(s^2 + 1))", "1 - cos(t)");
    }

    #[test]
    fn symbolic_parameters() {
        assert_inverse("1/(s - a)", "exp(a*t)");
        assert_inverse("1/(s - a)^2", "t*exp(a*t)");
        assert_inverse("s/(s^2 + a)", "cos(sqrt(a)*t)");
        assert_inverse("1/(s^2 - a)", "sinh(sqrt(a)*t)/sqrt(a)");
    }

    #[test]
    fn round_trip() {
        for input in ["t^2 + 3", "exp(-2t)*sin(3t)", "cosh(t)"] {
            let transformed = laplace(&parse(input), "t", "s").unwrap();
            let found = inverse_laplace(&transformed, "s", "t").unwrap();
            let expected = parse(input);
            for t in [0.5, 1.5] {
                let t = float(t);
                let actual = eval(&found, &[("t", &t)]).unwrap().to_f64();
                let wanted = eval(&expected, &[("t", &t)]).unwrap().to_f64();
                assert!((actual - wanted).abs() < 1e-12, "round trip of {input} produced {found}");
            }
        }
    }

    #[test]
    fn unsupported() {
        let err = inverse_laplace(&parse("s"), "s", "t").unwrap_err();
        assert!(err.downcast_ref::<UnsupportedTransform>().unwrap().inverse);
        assert!(inverse_laplace(&parse("exp(-s)/s"), "s", "t").is_err());
        assert!(inverse_laplace(&parse("1/(s^3 + s + 1)"), "s", "t").is_err());
    }
}
