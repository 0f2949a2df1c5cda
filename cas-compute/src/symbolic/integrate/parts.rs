//! Integration by parts for products of a polynomial and one other factor.

use crate::symbolic::{
    derivative::differentiate,
    expr::SymExpr,
    poly::{as_linear, coefficients},
    simplify::normalize,
};
use super::{primitive, table};

/// Functions whose primitive does not grow in complexity, so that `u` should be the polynomial.
const DIFFERENTIATE_POLYNOMIAL: [&str; 5] = ["exp", "sin", "cos", "sinh", "cosh"];

/// Functions whose derivative is simpler than the function itself, so that `dv` should be the
/// polynomial.
const INTEGRATE_POLYNOMIAL: [&str; 4] = ["ln", "asin", "acos", "atan"];

fn is_polynomial(expr: &SymExpr, var: &str) -> bool {
    coefficients(expr, var).is_some_and(|coeffs| coeffs.len() >= 2)
}

/// Returns true if the factor is `f(a x + b)` for one of the given functions, or `c^(a x + b)`.
fn is_linear_in(factor: &SymExpr, var: &str, functions: &[&str]) -> bool {
    if let Some((name, arg)) = factor.as_call1() {
        return functions.contains(&name) && as_linear(arg, var).is_some();
    }
    match factor {
        SymExpr::Exp(base, exp) => base.is_free_of(var) && as_linear(exp, var).is_some(),
        _ => false,
    }
}

/// `∫ u dv = u v - ∫ v du`
pub(super) fn by_parts(factors: &[SymExpr], var: &str, depth: usize) -> Option<SymExpr> {
    let [first, second] = factors else {
        return None;
    };
    let (poly, other) = if is_polynomial(first, var) {
        (first, second)
    } else if is_polynomial(second, var) {
        (second, first)
    } else {
        return None;
    };

    if is_linear_in(other, var, &DIFFERENTIATE_POLYNOMIAL) {
        let v = table::single(other, var)?;
        let du = differentiate(poly, var, 1).ok()?;
        tracing::trace!(target: "integrate", u = %poly, v = %v, "by_parts");
        let rest = primitive(&normalize(&(du * v.clone())), var, depth + 1)?;
        return Some(poly.clone() * v - rest);
    }

    if other.as_call1().is_some() && is_linear_in(other, var, &INTEGRATE_POLYNOMIAL) {
        let v = primitive(poly, var, depth + 1)?;
        let du = differentiate(other, var, 1).ok()?;
        tracing::trace!(target: "integrate", u = %other, v = %v, "by_parts");
        let rest = primitive(&normalize(&(du * v.clone())), var, depth + 1)?;
        return Some(other.clone() * v - rest);
    }

    None
}
