//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use std::cmp::Ordering;
use crate::symbolic::{
    expr::{cmp_factors, Special, SymExpr},
    simplify::{number::Number, rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// Splits a factor into its base and exponent. If the factor is not a [`SymExpr::Exp`], the
/// exponent is 1.
fn split_power(factor: &SymExpr) -> (SymExpr, SymExpr) {
    match factor {
        SymExpr::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
        _ => (factor.clone(), SymExpr::one()),
    }
}

/// `a * (b * c) = a * b * c`
pub fn flatten(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                SymExpr::Mul(inner) => new_factors.extend(inner.iter().cloned()),
                _ => new_factors.push(factor.clone()),
            }
        }
        Some(SymExpr::Mul(new_factors))
    })?;

    step_collector.push(Step::FlattenMul);
    Some(opt)
}

/// `2 * oo = oo`
/// `-1 * oo = -oo`
/// `0 * oo = nan`
/// `2 * zoo = zoo`
pub fn multiply_infinities(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let specials = factors.iter().filter_map(SymExpr::as_special).collect::<Vec<_>>();
        if specials.is_empty() {
            return None;
        }

        let numbers = factors.iter().filter_map(Number::from_expr).collect::<Vec<_>>();
        if numbers.iter().any(Number::is_zero) {
            return Some(SymExpr::Special(Special::Undefined));
        }

        // only a product of infinities and numbers has a known sign
        if specials.len() + numbers.len() != factors.len() {
            return None;
        }

        if specials.contains(&Special::ComplexInfinity) {
            return Some(SymExpr::Special(Special::ComplexInfinity));
        }

        let negatives = specials.iter().filter(|s| **s == Special::NegInfinity).count()
            + numbers.iter().filter(|n| n.is_negative()).count();
        Some(SymExpr::Special(if negatives % 2 == 0 {
            Special::Infinity
        } else {
            Special::NegInfinity
        }))
    })?;

    step_collector.push(Step::MultiplyInfinities);
    Some(opt)
}

/// `0 * a = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(SymExpr::is_zero) {
            Some(SymExpr::zero())
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `2 * 3 = 6`
/// `2 * 1/4 = 1/2`
/// `1 * a = a`
pub fn multiply_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let numbers = factors.iter()
            .filter(|factor| factor.is_number())
            .cloned()
            .collect::<Vec<_>>();
        if numbers.is_empty() {
            return None;
        }

        let product = numbers.iter()
            .filter_map(Number::from_expr)
            .fold(Number::one(), Number::mul);
        let canonical = if product.is_one() {
            Vec::new()
        } else {
            match product.into_expr() {
                SymExpr::Mul(parts) => parts,
                single => vec![single],
            }
        };

        // nothing to do if the numeric factors are already in canonical form
        if SymExpr::Mul(canonical.clone()) == SymExpr::Mul(numbers) {
            return None;
        }

        let mut new_factors = canonical;
        new_factors.extend(factors.iter().filter(|factor| !factor.is_number()).cloned());
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Combines like factors.
///
/// `a*a = a^2`
/// `a^2*a^3 = a^5`
/// `a*a^-1 = 1`
/// etc.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        // groups of (base, exponents)
        let mut groups: Vec<(SymExpr, Vec<SymExpr>)> = Vec::new();
        let mut numbers = Vec::new();
        for factor in factors {
            if factor.is_number() {
                numbers.push(factor.clone());
                continue;
            }

            let (base, exp) = split_power(factor);
            match groups.iter_mut().find(|(b, _)| *b == base) {
                Some((_, exps)) => exps.push(exp),
                None => groups.push((base, vec![exp])),
            }
        }

        if groups.iter().all(|(_, exps)| exps.len() == 1) {
            return None;
        }

        let mut new_factors = numbers;
        new_factors.extend(groups.into_iter().map(|(base, mut exps)| {
            if exps.len() == 1 {
                match exps.remove(0) {
                    exp if exp.is_one() => base,
                    exp => base.pow(exp),
                }
            } else {
                base.pow(SymExpr::Add(exps))
            }
        }));
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// `exp(a) * exp(b) = exp(a + b)`
pub fn combine_exponentials(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let is_exp = |factor: &SymExpr| matches!(factor.as_call1(), Some(("exp", _)));
        if factors.iter().filter(|factor| is_exp(factor)).count() < 2 {
            return None;
        }

        let mut exponents = Vec::new();
        let mut new_factors = Vec::new();
        for factor in factors {
            match factor.as_call1() {
                Some(("exp", arg)) => exponents.push(arg.clone()),
                _ => new_factors.push(factor.clone()),
            }
        }
        new_factors.push(SymExpr::call1("exp", SymExpr::Add(exponents)));
        Some(SymExpr::Mul(new_factors))
    })?;

    step_collector.push(Step::CombineExponentials);
    Some(opt)
}

/// `2(a + b) = 2a + 2b`
///
/// Only a product of exactly one number and one sum is distributed.
pub fn distribute_coefficient(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let [coefficient, SymExpr::Add(terms)] = factors else {
            return None;
        };
        if !coefficient.is_number() {
            return None;
        }

        Some(SymExpr::Add(
            terms.iter()
                .map(|term| coefficient.clone() * term.clone())
                .collect(),
        ))
    })?;

    step_collector.push(Step::DistributeCoefficient);
    Some(opt)
}

/// Puts the factors in canonical order.
pub fn sort_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let sorted = factors.windows(2).all(|pair| cmp_factors(&pair[0], &pair[1]) != Ordering::Greater);
        if sorted {
            return None;
        }

        let mut new_factors = factors.to_vec();
        new_factors.sort_by(cmp_factors);
        Some(SymExpr::Mul(new_factors))
    })?;

    step_collector.push(Step::SortFactors);
    Some(opt)
}

/// Applies all multiplication rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| multiply_infinities(expr, step_collector))
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
        .or_else(|| combine_exponentials(expr, step_collector))
        .or_else(|| distribute_coefficient(expr, step_collector))
        .or_else(|| sort_factors(expr, step_collector))
}
