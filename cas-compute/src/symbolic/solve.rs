//! Real solutions of polynomial and rational equations.
//!
//! The equation `lhs = rhs` is rearranged to `lhs - rhs = 0` and brought over a common
//! denominator. The numerator must be a polynomial in the variable. Rational roots are found with
//! the rational root theorem and divided out; a remaining quadratic (or biquadratic) factor is
//! solved in radicals. Roots that make the denominator vanish are discarded.

use cas_error::Error;
use rug::Rational;
use std::cmp::Ordering;
use crate::numerical::eval_constant;
use crate::symbolic::{
    error::UnsupportedEquation,
    expr::SymExpr,
    poly::{coefficients, Poly},
    simplify::{as_numer_denom, normalize},
};

fn unsupported(reason: &str) -> Error {
    Error::unspanned(UnsupportedEquation { reason: reason.to_string() })
}

/// The real roots of `a x^2 + b x + c`, in ascending order.
fn quadratic_roots(a: &Rational, b: &Rational, c: &Rational) -> Vec<SymExpr> {
    let discriminant = b.clone() * b.clone() - Rational::from(4) * a.clone() * c.clone();
    if discriminant < 0 {
        return Vec::new();
    }

    let root = |sign: i64| {
        let numerator = -SymExpr::rational(b.clone())
            + SymExpr::integer(sign) * SymExpr::rational(discriminant.clone()).sqrt();
        normalize(&(numerator * SymExpr::rational(Rational::from(2) * a.clone()).recip()))
    };
    if discriminant.is_zero() {
        vec![root(1)]
    } else {
        vec![root(-1), root(1)]
    }
}

/// Solves a polynomial with rational coefficients.
fn solve_rational(poly: &Poly, var: &str) -> Result<Vec<SymExpr>, Error> {
    let (roots, rest) = poly.rational_roots();
    let mut solutions = roots.into_iter()
        .map(|(root, _)| SymExpr::rational(root))
        .collect::<Vec<_>>();

    match rest.degree() {
        0 | 1 => (),
        2 => solutions.extend(quadratic_roots(&rest.coeff(2), &rest.coeff(1), &rest.coeff(0))),
        // a x^4 + b x^2 + c, solved as a quadratic in x^2
        4 if rest.coeff(3).is_zero() && rest.coeff(1).is_zero() => {
            for square in quadratic_roots(&rest.coeff(4), &rest.coeff(2), &rest.coeff(0)) {
                if eval_constant(&square).is_some_and(|value| value >= 0) {
                    let root = normalize(&square.sqrt());
                    if !root.is_zero() {
                        solutions.push(normalize(&-root.clone()));
                    }
                    solutions.push(root);
                }
            }
        },
        _ => {
            tracing::debug!(target: "solve", rest = %rest.to_expr(var), "irreducible_factor");
            return Err(unsupported("the equation has roots that are not expressible with square roots"));
        },
    }
    Ok(solutions)
}

/// Solves a polynomial of degree one or two with symbolic coefficients.
fn solve_symbolic(coeffs: &[SymExpr]) -> Result<Vec<SymExpr>, Error> {
    match coeffs {
        [c, b] => Ok(vec![normalize(&(-c.clone() * b.clone().recip()))]),
        [c, b, a] => {
            let discriminant = b.clone().pow(SymExpr::integer(2))
                - SymExpr::integer(4) * a.clone() * c.clone();
            let denominator = (SymExpr::integer(2) * a.clone()).recip();
            let root = |sign: i64| normalize(&(
                (-b.clone() + SymExpr::integer(sign) * discriminant.clone().sqrt()) * denominator.clone()
            ));
            Ok(vec![root(-1), root(1)])
        },
        _ => Err(unsupported("only linear and quadratic equations can have symbolic coefficients")),
    }
}

/// Sorts numeric roots in ascending order and removes duplicates. Roots without a numeric value
/// keep their relative order after the numeric ones.
fn sort_roots(mut roots: Vec<SymExpr>) -> Vec<SymExpr> {
    roots.sort_by(|a, b| match (eval_constant(a), eval_constant(b)) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    roots.dedup();
    roots
}

/// Finds the real solutions of `lhs = rhs` for `var`, in ascending order.
///
/// An empty list means the equation has no real solution. Equations that do not depend on `var`
/// also produce an empty list.
pub fn solve(lhs: &SymExpr, rhs: &SymExpr, var: &str) -> Result<Vec<SymExpr>, Error> {
    let difference = normalize(&(lhs.clone() - rhs.clone()));
    tracing::debug!(target: "solve", difference = %difference, var, "solve");
    if difference.is_free_of(var) {
        return Ok(Vec::new());
    }

    let (num, den) = as_numer_denom(&difference);
    let roots = match Poly::from_expr(&num, var) {
        Some(poly) => solve_rational(&poly, var)?,
        None => {
            let coeffs = coefficients(&num, var)
                .ok_or_else(|| unsupported("the equation is not polynomial in the variable"))?;
            if coeffs.iter().any(|c| !c.is_finite()) {
                return Err(unsupported("the equation has undefined coefficients"));
            }
            solve_symbolic(&coeffs)?
        },
    };

    let roots = roots.into_iter()
        .filter(|root| {
            let at_root = normalize(&den.substitute(var, root));
            at_root.is_finite() && !at_root.is_zero()
        })
        .collect();
    Ok(sort_roots(roots))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::simplify::tests::parse;
    use pretty_assertions::assert_eq;

    fn roots(lhs: &str, rhs: &str) -> Vec<SymExpr> {
        solve(&parse(lhs), &parse(rhs), "x").unwrap()
    }

    fn parse_all(inputs: &[&str]) -> Vec<SymExpr> {
        inputs.iter().map(|input| parse(input)).collect()
    }

    #[test]
    fn linear() {
        assert_eq!(roots("2x + 3", "7"), parse_all(&["2"]));
        assert_eq!(roots("x/3", "1/2"), parse_all(&["3/2"]));
    }

    #[test]
    fn quadratic() {
        assert_eq!(roots("x^2 - 4", "0"), parse_all(&["-2", "2"]));
        assert_eq!(roots("x^2", "2"), parse_all(&["-sqrt(2)", "sqrt(2)"]));
        assert_eq!(roots("x^2 - 2x + 1", "0"), parse_all(&["1"]));
        assert_eq!(roots("x^2 + 1", "0"), Vec::<SymExpr>::new());
    }

    #[test]
    fn higher_degree() {
        assert_eq!(roots("x^3 - 6x^2 + 11x - 6", "0"), parse_all(&["1", "2", "3"]));
        assert_eq!(roots("x^3", "2x"), parse_all(&["-sqrt(2)", "0", "sqrt(2)"]));
        assert_eq!(roots("x^4", "9"), parse_all(&["-sqrt(3)", "sqrt(3)"]));
    }

    #[test]
    fn rational_equations() {
        assert_eq!(roots("(x^2 - 1)/(x - 1)", "0"), parse_all(&["-1"]));
        assert_eq!(roots("1/x", "2"), parse_all(&["1/2"]));
    }

    #[test]
    fn symbolic_coefficients() {
        assert_eq!(roots("a*x + b", "0"), parse_all(&["-b/a"]));
    }

    #[test]
    fn no_dependence_on_variable() {
        assert_eq!(roots("1", "2"), Vec::<SymExpr>::new());
    }

    #[test]
    fn unsupported_equations() {
        assert!(solve(&parse("sin(x)"), &parse("0"), "x").unwrap_err().is::<UnsupportedEquation>());
        assert!(solve(&parse("x^5 - x - 1"), &parse("0"), "x").unwrap_err().is::<UnsupportedEquation>());
    }
}
