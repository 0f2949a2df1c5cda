//! Simplification rules for expressions involving addition, including combining like terms.

use std::cmp::Ordering;
use crate::symbolic::{
    expr::{cmp_terms, Special, SymExpr},
    simplify::{number::Number, rules::do_add, step::Step},
    step_collector::StepCollector,
};

/// Splits a term into its numeric coefficient and the remaining factors. If the term is not a
/// [`SymExpr::Mul`], the coefficient is 1.
///
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `sqrt(6)` -> `(1, sqrt(6))`
pub(crate) fn split_coefficient(term: &SymExpr) -> (Number, SymExpr) {
    match term {
        SymExpr::Mul(factors) => {
            let mut coefficient = Number::one();
            let mut rest = Vec::new();
            for factor in factors {
                match Number::from_expr(factor) {
                    Some(n) => coefficient = coefficient.mul(n),
                    None => rest.push(factor.clone()),
                }
            }
            (coefficient, SymExpr::Mul(rest).downgrade())
        },
        _ => (Number::one(), term.clone()),
    }
}

/// `a + (b + c) = a + b + c`
pub fn flatten(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                SymExpr::Add(inner) => new_terms.extend(inner.iter().cloned()),
                _ => new_terms.push(term.clone()),
            }
        }
        Some(SymExpr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FlattenAdd);
    Some(opt)
}

/// `oo + a = oo`
/// `oo - oo = nan`
/// `zoo + oo = nan`
pub fn add_infinities(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let specials = terms.iter().filter_map(SymExpr::as_special).collect::<Vec<_>>();
        let first = *specials.first()?;

        // an infinity only absorbs terms known to be finite
        if terms.iter().all(|t| t.as_special().is_some() || t.is_finite()) {
            let result = if specials.iter().all(|s| *s == first) {
                first
            } else {
                Special::Undefined
            };
            Some(SymExpr::Special(result))
        } else {
            None
        }
    })?;

    step_collector.push(Step::AddInfinities);
    Some(opt)
}

/// `2 + 3 = 5`
/// `1/2 + 1/3 = 5/6`
/// `a + 0 = a`
pub fn add_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let numbers = terms.iter().filter_map(Number::from_expr).collect::<Vec<_>>();
        let only_zero = numbers.len() == 1 && numbers[0].is_zero();
        if numbers.len() < 2 && !only_zero {
            return None;
        }

        let sum = numbers.into_iter().fold(Number::zero(), Number::add);
        let mut new_terms = terms.iter()
            .filter(|term| !term.is_number())
            .cloned()
            .collect::<Vec<_>>();
        if !sum.is_zero() {
            new_terms.push(sum.into_expr());
        }
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::AddNumbers);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `a-a = 0`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        // groups of (coefficient, factors, number of terms merged)
        let mut groups: Vec<(Number, SymExpr, usize)> = Vec::new();
        let mut numbers = Vec::new();
        for term in terms {
            if term.is_number() {
                numbers.push(term.clone());
                continue;
            }

            let (coefficient, rest) = split_coefficient(term);
            match groups.iter_mut().find(|(_, factors, _)| *factors == rest) {
                Some((sum, _, count)) => {
                    *sum = std::mem::replace(sum, Number::zero()).add(coefficient);
                    *count += 1;
                },
                None => groups.push((coefficient, rest, 1)),
            }
        }

        if groups.iter().all(|(_, _, count)| *count == 1) {
            return None;
        }

        let mut new_terms = groups.into_iter()
            .filter(|(coefficient, _, _)| !coefficient.is_zero())
            .map(|(coefficient, factors, _)| {
                if coefficient.is_one() {
                    factors
                } else {
                    coefficient.into_expr() * factors
                }
            })
            .collect::<Vec<_>>();
        new_terms.extend(numbers);
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Puts the terms in canonical order.
pub fn sort_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let sorted = terms.windows(2).all(|pair| cmp_terms(&pair[0], &pair[1]) != Ordering::Greater);
        if sorted {
            return None;
        }

        let mut new_terms = terms.to_vec();
        new_terms.sort_by(cmp_terms);
        Some(SymExpr::Add(new_terms))
    })?;

    step_collector.push(Step::SortTerms);
    Some(opt)
}

/// Applies all addition rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| add_infinities(expr, step_collector))
        .or_else(|| add_numbers(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
        .or_else(|| sort_terms(expr, step_collector))
}
