//! Finite sums over integer ranges.

use cas_error::Error;
use rug::Integer;
use crate::symbolic::{
    error::{NonIntegerBound, SummationTooLarge},
    expr::SymExpr,
    simplify::normalize,
};

/// The largest number of terms a summation may add.
pub const MAX_SUMMATION_TERMS: usize = 100_000;

/// Normalizes a summation bound and checks that it is an integer.
pub fn integer_bound(bound: &SymExpr) -> Result<Integer, Error> {
    let normalized = normalize(bound);
    normalized.as_integer()
        .cloned()
        .ok_or_else(|| Error::unspanned(NonIntegerBound { bound: normalized.to_string() }))
}

/// Computes `sum_{var = lower}^{upper} expr` by adding the terms one by one.
///
/// The bounds must normalize to integers. If `upper < lower` the sum is empty and its value is
/// zero.
pub fn summation(expr: &SymExpr, var: &str, lower: &SymExpr, upper: &SymExpr) -> Result<SymExpr, Error> {
    let lower = integer_bound(lower)?;
    let upper = integer_bound(upper)?;
    if upper < lower {
        return Ok(SymExpr::zero());
    }

    let terms: Integer = Integer::from(&upper - &lower) + 1;
    if terms > MAX_SUMMATION_TERMS as u64 {
        return Err(Error::unspanned(SummationTooLarge {
            terms: terms.to_string(),
            max: MAX_SUMMATION_TERMS,
        }));
    }

    let mut total = SymExpr::zero();
    let mut k = lower;
    while k <= upper {
        let term = normalize(&expr.substitute(var, &SymExpr::integer(k.clone())));
        total = normalize(&(total + term));
        k += 1;
    }

    tracing::debug!(target: "summation", expr = %expr, var, terms = %terms, total = %total, "summation");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::simplify::tests::parse;
    use pretty_assertions::assert_eq;

    fn sum(expr: &str, lower: &str, upper: &str) -> Result<SymExpr, Error> {
        summation(&parse(expr), "k", &parse(lower), &parse(upper))
    }

    #[test]
    fn squares() {
        assert_eq!(sum("k^2", "1", "10").unwrap(), SymExpr::integer(385));
    }

    #[test]
    fn geometric() {
        assert_eq!(sum("1/2^k", "0", "3").unwrap(), SymExpr::fraction(15, 8));
    }

    #[test]
    fn symbolic_terms() {
        assert_eq!(sum("a*k", "1", "3").unwrap(), parse("6a"));
        assert_eq!(sum("x^k", "0", "2").unwrap(), parse("x^2 + x + 1"));
    }

    #[test]
    fn empty_range() {
        assert_eq!(sum("k", "5", "1").unwrap(), SymExpr::zero());
    }

    #[test]
    fn bounds_must_be_integers() {
        let err = sum("k", "1/2", "3").unwrap_err();
        assert_eq!(err.downcast_ref::<NonIntegerBound>().unwrap().bound, "2^(-1)");
        assert!(sum("k", "1", "n").unwrap_err().is::<NonIntegerBound>());
    }

    #[test]
    fn too_many_terms() {
        let err = sum("k", "1", "1000000").unwrap_err();
        assert!(err.is::<SummationTooLarge>());
    }
}
