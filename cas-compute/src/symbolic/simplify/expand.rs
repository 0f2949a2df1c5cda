//! Expansion of products and integer powers of sums.

use crate::symbolic::expr::SymExpr;
use super::normalize;

/// Products of sums with more terms than this are left unexpanded.
const MAX_EXPANDED_TERMS: usize = 512;

/// Powers of sums with a larger exponent are left unexpanded.
const MAX_EXPANDED_POWER: u32 = 12;

/// Returns the terms of a sum, or the expression itself as a single term.
fn terms_of(expr: &SymExpr) -> Vec<SymExpr> {
    match expr {
        SymExpr::Add(terms) => terms.clone(),
        _ => vec![expr.clone()],
    }
}

/// Multiplies out a product of factors, distributing over every sum among them.
fn distribute(factors: &[SymExpr]) -> Option<SymExpr> {
    let mut products = vec![SymExpr::one()];
    for factor in factors {
        let terms = terms_of(factor);
        if products.len() * terms.len() > MAX_EXPANDED_TERMS {
            return None;
        }
        products = products.iter()
            .flat_map(|product| terms.iter().map(move |term| product.clone() * term.clone()))
            .collect();
    }
    Some(SymExpr::Add(products))
}

/// Expands the expression without normalizing the result.
fn expand_raw(expr: &SymExpr) -> SymExpr {
    match expr {
        SymExpr::Add(terms) => SymExpr::Add(terms.iter().map(expand_raw).collect()),
        SymExpr::Mul(factors) => {
            let factors = factors.iter()
                .map(|factor| normalize(&expand_raw(factor)))
                .collect::<Vec<_>>();
            distribute(&factors).unwrap_or(SymExpr::Mul(factors))
        },
        SymExpr::Exp(base, exp) => {
            let base = normalize(&expand_raw(base));
            let power = exp.as_integer()
                .and_then(|n| n.to_u32())
                .filter(|n| (2..=MAX_EXPANDED_POWER).contains(n));
            match (&base, power) {
                (SymExpr::Add(_), Some(n)) => {
                    let factors = vec![base.clone(); n as usize];
                    distribute(&factors).unwrap_or_else(|| base.pow((**exp).clone()))
                },
                _ => base.pow((**exp).clone()),
            }
        },
        SymExpr::Primary(_) | SymExpr::Special(_) => expr.clone(),
    }
}

/// Expands products and positive integer powers of sums, returning the normalized result.
///
/// `(x + 1)^2 = x^2 + 2x + 1`
/// `x(x - 1) = x^2 - x`
pub fn expand(expr: &SymExpr) -> SymExpr {
    normalize(&expand_raw(expr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::simplify::tests::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn square_of_sum() {
        assert_eq!(expand(&parse("(x + 1)^2")), parse("x^2 + 2x + 1"));
    }

    #[test]
    fn product_of_sums() {
        assert_eq!(expand(&parse("(x + 1)(x - 1)")), parse("x^2 - 1"));
        assert_eq!(expand(&parse("x*(x - 1)")), parse("x^2 - x"));
    }

    #[test]
    fn nested_sums() {
        assert_eq!(expand(&parse("2(x + 1)^3")), parse("2x^3 + 6x^2 + 6x + 2"));
    }
}
