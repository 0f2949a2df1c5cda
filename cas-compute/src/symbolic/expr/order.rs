//! Canonical ordering of terms and factors.
//!
//! Normalized sums list their terms by descending degree, with the constant term last, so that
//! `1 + x^2 + x` is written `x^2 + x + 1`. Normalized products list the numeric coefficient
//! first, followed by symbols, function calls and finally sums.

use rug::Rational;
use std::cmp::Ordering;
use super::{Primary, SymExpr, PI};

/// Coarse classification of a factor, in the order factors appear in a product.
fn factor_rank(factor: &SymExpr) -> u8 {
    match factor {
        SymExpr::Primary(Primary::Integer(_) | Primary::Float(_)) => 0,
        _ if factor.as_rational().is_some() => 1,
        SymExpr::Primary(Primary::Symbol(sym)) if sym == PI => 3,
        SymExpr::Primary(Primary::Symbol(_)) => 4,
        SymExpr::Primary(Primary::Call(..)) => 5,
        SymExpr::Add(_) | SymExpr::Mul(_) => 6,
        SymExpr::Exp(base, _) => match factor_rank(base) {
            0 | 1 => 2,
            rank => rank,
        },
        SymExpr::Special(_) => 7,
    }
}

/// Returns the base of a factor, treating a non-power as a power with exponent `1`.
fn base_of(factor: &SymExpr) -> &SymExpr {
    match factor {
        SymExpr::Exp(base, _) => base,
        _ => factor,
    }
}

/// Compares two factors of a product.
pub fn cmp_factors(a: &SymExpr, b: &SymExpr) -> Ordering {
    factor_rank(a).cmp(&factor_rank(b))
        .then_with(|| base_of(a).to_string().cmp(&base_of(b).to_string()))
        .then_with(|| a.to_string().cmp(&b.to_string()))
}

/// Returns the total degree of a term in the free symbols it contains. Function calls and
/// symbolic exponents count as degree zero.
fn degree(term: &SymExpr) -> Rational {
    match term {
        SymExpr::Primary(Primary::Symbol(sym)) if sym != PI => Rational::from(1),
        SymExpr::Mul(factors) => factors.iter().map(degree).sum(),
        SymExpr::Exp(base, exp) => match exp.as_rational() {
            Some(exp) => degree(base) * exp,
            None => Rational::new(),
        },
        SymExpr::Add(terms) => terms.iter().map(degree).max().unwrap_or_default(),
        _ => Rational::new(),
    }
}

/// Coarse classification of a term: `0` for terms depending on something, `1` for constant
/// terms, `2` for special values.
fn term_rank(term: &SymExpr) -> u8 {
    match term {
        SymExpr::Special(_) => 2,
        _ if term.is_number() => 1,
        _ => 0,
    }
}

/// Removes the numeric coefficient of a term, if it has one.
fn without_coefficient(term: &SymExpr) -> SymExpr {
    match term {
        SymExpr::Mul(factors) => SymExpr::Mul(
            factors.iter()
                .filter(|factor| !factor.is_number())
                .cloned()
                .collect(),
        ).downgrade(),
        _ => term.clone(),
    }
}

/// Compares two terms of a sum.
pub fn cmp_terms(a: &SymExpr, b: &SymExpr) -> Ordering {
    term_rank(a).cmp(&term_rank(b))
        .then_with(|| degree(b).cmp(&degree(a)))
        .then_with(|| without_coefficient(a).to_string().cmp(&without_coefficient(b).to_string()))
        .then_with(|| a.to_string().cmp(&b.to_string()))
}
