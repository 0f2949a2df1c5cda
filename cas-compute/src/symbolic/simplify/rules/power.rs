//! Simplification rules for powers, including evaluation of numeric powers and extraction of
//! perfect powers out of roots.

use rug::{ops::Pow, Integer, Rational};
use crate::primitive::{float, int};
use crate::symbolic::{
    expr::{Special, SymExpr, MAX_EXACT_EXPONENT},
    simplify::{number::Number, rules::do_power, step::Step},
    step_collector::StepCollector,
};

/// Primes up to this bound are tried when extracting perfect powers from a root.
const TRIAL_DIVISION_LIMIT: u32 = 10_000;

/// Raises a rational number to an integer power, or returns [`None`] if the exponent is too large
/// or the result would divide by zero.
fn rational_pow(base: &Rational, exp: i64) -> Option<Rational> {
    let magnitude = u32::try_from(exp.unsigned_abs()).ok()?;
    if magnitude > MAX_EXACT_EXPONENT || (base.is_zero() && exp < 0) {
        return None;
    }

    let num = base.numer().clone().pow(magnitude);
    let den = base.denom().clone().pow(magnitude);
    Some(if exp < 0 {
        Rational::from((den, num))
    } else {
        Rational::from((num, den))
    })
}

/// Splits the positive integer `n` into `(a, m)` such that `n = a^q * m`, where `m` has no
/// `q`-th power factors of small primes.
fn extract_perfect_power(n: &Integer, q: u32) -> (Integer, Integer) {
    let root = n.clone().root(q);
    if root.clone().pow(q) == *n {
        return (root, int(1));
    }

    let mut outside = int(1);
    let mut inside = n.clone();
    let mut p = 2u32;
    while p < TRIAL_DIVISION_LIMIT && int(p).pow(q) <= inside {
        let power = int(p).pow(q);
        while inside.is_divisible(&power) {
            inside /= &power;
            outside *= p;
        }
        p += 1;
    }
    (outside, inside)
}

/// Returns the positive integer as a power with the given rational exponent, extracting perfect
/// powers: `8^(1/2) = 2 * 2^(1/2)`.
fn integer_root(n: Integer, exp_num: i64, exp_den: u32) -> SymExpr {
    let (outside, inside) = extract_perfect_power(&n, exp_den);
    let mut factors = Vec::new();
    if outside != 1 {
        factors.push(SymExpr::integer(outside).pow(SymExpr::integer(exp_num)));
    }
    if inside != 1 {
        factors.push(SymExpr::integer(inside).pow(SymExpr::fraction(exp_num, exp_den)));
    }
    SymExpr::Mul(factors).downgrade()
}

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, exp| {
        if exp.is_zero() {
            Some(SymExpr::one())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        if exp.is_one() {
            Some(base.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
/// `1^oo = nan`
pub fn one_to_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        if !base.is_one() {
            None
        } else if exp.is_finite() {
            Some(SymExpr::one())
        } else {
            Some(SymExpr::Special(Special::Undefined))
        }
    })?;

    step_collector.push(Step::OneToPower);
    Some(opt)
}

/// `0^a = 0` for positive `a`
/// `0^a = zoo` for negative `a`
pub fn zero_to_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        if !base.is_zero() {
            return None;
        }
        match exp.as_special() {
            Some(Special::Infinity) => return Some(SymExpr::zero()),
            Some(Special::NegInfinity) => return Some(SymExpr::Special(Special::ComplexInfinity)),
            _ => (),
        }
        let exp = Number::from_expr(exp)?;
        if exp.is_negative() {
            Some(SymExpr::Special(Special::ComplexInfinity))
        } else {
            Some(SymExpr::zero())
        }
    })?;

    step_collector.push(Step::ZeroToPower);
    Some(opt)
}

/// `oo^2 = oo`
/// `oo^-1 = 0`
/// `2^oo = oo`
/// `(1/2)^oo = 0`
pub fn power_infinities(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        if let Some(special) = base.as_special() {
            let exp = Number::from_expr(exp)?;
            if exp.is_negative() {
                return Some(SymExpr::zero());
            }
            return Some(SymExpr::Special(match special {
                Special::NegInfinity => match &exp {
                    Number::Exact(r) if r.is_integer() && r.numer().is_even() => Special::Infinity,
                    Number::Exact(r) if r.is_integer() => Special::NegInfinity,
                    _ => Special::ComplexInfinity,
                },
                other => other,
            }));
        }

        let exp = exp.as_special()?;
        let base = Number::from_expr(base)?.to_float();
        let magnitude = base.clone().abs();
        if magnitude == 1 {
            return Some(SymExpr::Special(Special::Undefined));
        }
        let grows = magnitude > 1;
        Some(match exp {
            Special::Infinity if grows && base > 0 => SymExpr::Special(Special::Infinity),
            Special::Infinity if grows => SymExpr::Special(Special::ComplexInfinity),
            Special::Infinity => SymExpr::zero(),
            Special::NegInfinity if grows => SymExpr::zero(),
            Special::NegInfinity if base > 0 => SymExpr::Special(Special::Infinity),
            _ => SymExpr::Special(Special::Undefined),
        })
    })?;

    step_collector.push(Step::PowerInfinities);
    Some(opt)
}

/// `2^3 = 8`
/// `(2/3)^-2 = 9/4`
/// `2.0^0.5 = 1.414...`
pub fn evaluate_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        if base.is_float() || exp.is_float() {
            let b = Number::from_expr(base)?.to_float();
            let e = Number::from_expr(exp)?.to_float();
            if b < 0 && !e.is_integer() {
                return None;
            }
            return Some(SymExpr::float(b.pow(&e)));
        }

        let e = exp.as_integer()?.to_i64()?;

        // `n^-1` is already the canonical form of `1/n`
        if e == -1 && base.as_integer().is_some_and(|n| *n > 1) {
            return None;
        }

        let r = base.as_rational()?;
        rational_pow(&r, e).map(SymExpr::rational)
    })?;

    step_collector.push(Step::EvaluatePower);
    Some(opt)
}

/// `8^(1/2) = 2 * 2^(1/2)`
/// `2^(3/2) = 2 * 2^(1/2)`
/// `2^(-1/2) = 2^(1/2) / 2`
/// `(1/4)^(1/2) = 1/2`
pub fn extract_root(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        let r = base.as_rational()?;
        let e = exp.as_rational()?;
        if r <= 0 || e.is_integer() {
            return None;
        }

        let p = e.numer().to_i64()?;
        let q = e.denom().to_u32()?;
        let whole = p.div_euclid(i64::from(q));
        let frac = p.rem_euclid(i64::from(q));
        let (num, den) = r.into_numer_denom();

        // an integer base with an exponent in (0, 1) is canonical unless a perfect power hides in it
        if whole == 0 && den == 1 && extract_perfect_power(&num, q).0 == 1 {
            return None;
        }

        let mut factors = Vec::new();
        let scale = rational_pow(&Rational::from((num.clone(), den.clone())), whole)?;
        factors.push(SymExpr::rational(scale));
        factors.push(integer_root(num, frac, q));
        if den != 1 {
            // rationalize the denominator: `b^(-f/q) = b^-1 * b^((q - f)/q)`
            factors.push(SymExpr::integer(den.clone()).recip());
            factors.push(integer_root(den, i64::from(q) - frac, q));
        }
        Some(SymExpr::Mul(factors))
    })?;

    step_collector.push(Step::ExtractRoot);
    Some(opt)
}

/// `(a^b)^c = a^(bc)` for integer `c`
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        let SymExpr::Exp(inner_base, inner_exp) = base else {
            return None;
        };
        if !exp.is_integer() {
            return None;
        }
        Some((**inner_base).clone().pow((**inner_exp).clone() * exp.clone()))
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// `(ab)^c = a^c b^c` for integer `c`
/// `(4x)^(1/2) = 4^(1/2) x^(1/2)`
pub fn power_of_product(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        let SymExpr::Mul(factors) = base else {
            return None;
        };

        if exp.is_integer() {
            return Some(SymExpr::Mul(
                factors.iter().map(|factor| factor.clone().pow(exp.clone())).collect(),
            ));
        }

        // only a positive numeric coefficient can be pulled out of a root
        let coefficient = factors.iter()
            .filter_map(Number::from_expr)
            .fold(Number::one(), Number::mul);
        if coefficient.is_one() || coefficient.is_negative() {
            return None;
        }
        let rest = factors.iter()
            .filter(|factor| !factor.is_number())
            .cloned()
            .collect::<Vec<_>>();
        Some(
            coefficient.into_expr().pow(exp.clone())
                * SymExpr::Mul(rest).downgrade().pow(exp.clone()),
        )
    })?;

    step_collector.push(Step::PowerOfProduct);
    Some(opt)
}

/// `exp(a)^b = exp(ab)`
pub fn power_of_exponential(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        match base.as_call1() {
            Some(("exp", arg)) => Some(SymExpr::call1("exp", arg.clone() * exp.clone())),
            _ => None,
        }
    })?;

    step_collector.push(Step::PowerOfExponential);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| one_to_power(expr, step_collector))
        .or_else(|| zero_to_power(expr, step_collector))
        .or_else(|| power_infinities(expr, step_collector))
        .or_else(|| evaluate_power(expr, step_collector))
        .or_else(|| extract_root(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
        .or_else(|| power_of_product(expr, step_collector))
        .or_else(|| power_of_exponential(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn perfect_powers() {
        assert_eq!(extract_perfect_power(&int(8), 2), (int(2), int(2)));
        assert_eq!(extract_perfect_power(&int(27), 3), (int(3), int(1)));
        assert_eq!(extract_perfect_power(&int(7), 2), (int(1), int(7)));
    }

    #[test]
    fn rational_powers() {
        let r = Rational::from((2, 3));
        assert_eq!(rational_pow(&r, -2), Some(Rational::from((9, 4))));
        assert_eq!(rational_pow(&Rational::new(), -1), None);
        assert!(float(2).pow(&float(0.5)) > 1.41);
    }
}
