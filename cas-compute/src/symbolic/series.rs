//! Taylor series expansion.

use cas_error::Error;
use rug::Integer;
use crate::symbolic::{
    derivative::differentiate,
    error::UnsupportedSeries,
    expr::SymExpr,
    limit::{limit, Direction},
    simplify::normalize,
};

/// One term of a Taylor expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct TaylorTerm {
    /// The `k`-th derivative of the expanded function.
    pub derivative: SymExpr,

    /// The derivative evaluated at the expansion point.
    pub value: SymExpr,
}

/// Evaluates `expr` at `var = point`, falling back to a limit if substitution is not finite.
fn value_at(expr: &SymExpr, var: &str, point: &SymExpr) -> Option<SymExpr> {
    let value = normalize(&expr.substitute(var, point));
    if value.is_finite() {
        return Some(value);
    }
    limit(expr, var, point, Direction::TwoSided)
        .ok()
        .filter(SymExpr::is_finite)
}

/// Computes the derivatives of orders `0..=order` and their values at `point`.
pub fn taylor_terms(expr: &SymExpr, var: &str, point: &SymExpr, order: usize) -> Result<Vec<TaylorTerm>, Error> {
    let unsupported = || Error::unspanned(UnsupportedSeries {
        expr: expr.to_string(),
        point: point.to_string(),
    });
    let point = normalize(point);
    if !point.is_finite() || point.contains_symbol(var) {
        return Err(unsupported());
    }

    let mut terms = Vec::with_capacity(order + 1);
    let mut current = normalize(expr);
    for k in 0..=order {
        if k > 0 {
            current = differentiate(&current, var, 1)?;
        }
        let value = value_at(&current, var, &point).ok_or_else(unsupported)?;
        terms.push(TaylorTerm { derivative: current.clone(), value });
    }
    Ok(terms)
}

/// Expands `expr` in a Taylor series around `point`, up to and including the term of degree
/// `order`. The remainder is dropped.
///
/// `exp(x) = 1 + x + x^2/2 + x^3/6 + ...`
pub fn series(expr: &SymExpr, var: &str, point: &SymExpr, order: usize) -> Result<SymExpr, Error> {
    let terms = taylor_terms(expr, var, point, order)?;
    let offset = SymExpr::symbol(var) - normalize(point);

    let mut factorial = Integer::from(1);
    let mut sum = Vec::with_capacity(terms.len());
    for (k, term) in terms.into_iter().enumerate() {
        if k > 0 {
            factorial *= Integer::from(k);
        }
        sum.push(
            term.value
                * SymExpr::integer(factorial.clone()).recip()
                * offset.clone().pow(SymExpr::integer(k)),
        );
    }

    let result = normalize(&SymExpr::Add(sum));
    tracing::debug!(target: "series", expr = %expr, point = %point, order, result = %result, "series");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::simplify::{equivalent, tests::parse};
    use pretty_assertions::assert_eq;

    fn expand_at(input: &str, point: &str, order: usize) -> SymExpr {
        series(&parse(input), "x", &parse(point), order).unwrap()
    }

    #[test]
    fn exponential() {
        assert_eq!(expand_at("exp(x)", "0", 4), parse("1 + x + x^2/2 + x^3/6 + x^4/24"));
    }

    #[test]
    fn sine() {
        assert_eq!(expand_at("sin(x)", "0", 5), parse("x - x^3/6 + x^5/120"));
    }

    #[test]
    fn shifted_point() {
        let result = expand_at("ln(x)", "1", 3);
        assert!(equivalent(&result, &parse("(x - 1) - (x - 1)^2/2 + (x - 1)^3/3")), "{result}");
    }

    #[test]
    fn removable_singularity_in_derivative() {
        // sin(x)/x is undefined at 0 by substitution, but has a limit
        let result = expand_at("sin(x)/x", "0", 2);
        assert_eq!(result, parse("1 - x^2/6"));
    }

    #[test]
    fn terms() {
        let terms = taylor_terms(&parse("x^3"), "x", &parse("2"), 3).unwrap();
        let values = terms.iter().map(|term| term.value.clone()).collect::<Vec<_>>();
        assert_eq!(values, vec![parse("8"), parse("12"), parse("12"), parse("6")]);
        assert_eq!(terms[1].derivative, parse("3x^2"));
    }

    #[test]
    fn singular_point() {
        let err = series(&parse("sqrt(x)"), "x", &parse("0"), 2).unwrap_err();
        assert!(err.is::<UnsupportedSeries>());
    }
}
