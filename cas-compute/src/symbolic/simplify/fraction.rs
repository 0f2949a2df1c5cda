//! Tools to help manipulate fractions.

use rug::Rational;
use crate::symbolic::expr::SymExpr;
use super::{normalize, number::Number};

/// Returns the exponent of a factor if it is a negative number, negated.
fn negated_exponent(exp: &SymExpr) -> Option<SymExpr> {
    let exp = Number::from_expr(exp)?;
    exp.is_negative().then(|| exp.mul(Number::Exact(Rational::from(-1))).into_expr())
}

/// Splits a single factor into numerator and denominator, without normalizing.
fn split_factor(factor: &SymExpr) -> (SymExpr, SymExpr) {
    if let Some(r) = factor.as_rational() {
        let (num, den) = r.into_numer_denom();
        return (SymExpr::integer(num), SymExpr::integer(den));
    }

    match factor {
        // `(a/b + c)^n = ((a + bc) / b)^n`
        SymExpr::Exp(base, exp) if matches!(**base, SymExpr::Add(_)) && exp.is_integer() => {
            let (num, den) = as_numer_denom(base);
            let k = exp.as_integer().cloned().unwrap_or_default();
            let magnitude = SymExpr::integer(k.clone().abs());
            match (den.is_one(), k < 0) {
                (true, true) => (SymExpr::one(), (**base).clone().pow(magnitude)),
                (true, false) => (factor.clone(), SymExpr::one()),
                (false, true) => (den.pow(magnitude.clone()), num.pow(magnitude)),
                (false, false) => (num.pow(magnitude.clone()), den.pow(magnitude)),
            }
        },
        SymExpr::Exp(base, exp) => match negated_exponent(exp) {
            Some(positive) => (SymExpr::one(), (**base).clone().pow(positive)),
            None => match exp.strip_negative() {
                // `a^(-x) = 1 / a^x`
                Some(positive) => (SymExpr::one(), (**base).clone().pow(positive)),
                None => (factor.clone(), SymExpr::one()),
            },
        },
        SymExpr::Add(_) => as_numer_denom(factor),
        _ => match factor.as_call1() {
            // `exp(-x) = 1 / exp(x)`
            Some(("exp", arg)) => match arg.strip_negative() {
                Some(positive) => (SymExpr::one(), SymExpr::call1("exp", positive)),
                None => (factor.clone(), SymExpr::one()),
            },
            _ => (factor.clone(), SymExpr::one()),
        },
    }
}

/// Returns the factors of a product, or the expression itself as a single factor.
fn factors_of(expr: &SymExpr) -> Vec<SymExpr> {
    match expr {
        SymExpr::Mul(factors) => factors.clone(),
        _ => vec![expr.clone()],
    }
}

/// Splits a factor into base and exponent, if the exponent is a rational number.
fn rational_power(factor: &SymExpr) -> Option<(SymExpr, Rational)> {
    match factor {
        SymExpr::Exp(base, exp) => Some(((**base).clone(), exp.as_rational()?)),
        _ if factor.is_number() => None,
        _ => Some((factor.clone(), Rational::from(1))),
    }
}

/// Cancels factors that appear in both the numerator and the denominator.
///
/// `x^3 / x = x^2 / 1`
/// `(x + 1) / (2(x + 1)) = 1 / 2`
pub fn cancel(num: &SymExpr, den: &SymExpr) -> (SymExpr, SymExpr) {
    let mut num_factors = factors_of(num);
    let mut den_factors = factors_of(den);

    let mut i = 0;
    while i < den_factors.len() {
        let Some((base, den_exp)) = rational_power(&den_factors[i]) else {
            i += 1;
            continue;
        };
        let matching = num_factors.iter().position(|factor| {
            rational_power(factor).is_some_and(|(b, _)| b == base)
        });
        let Some(j) = matching else {
            i += 1;
            continue;
        };
        let Some((_, num_exp)) = rational_power(&num_factors[j]) else {
            i += 1;
            continue;
        };

        num_factors.remove(j);
        den_factors.remove(i);
        let remaining = num_exp - den_exp;
        if remaining > 0 {
            num_factors.push(base.pow(SymExpr::rational(remaining)));
        } else if remaining < 0 {
            den_factors.push(base.pow(SymExpr::rational(-remaining)));
        }
    }

    let num = normalize(&SymExpr::Mul(num_factors));
    let den = normalize(&SymExpr::Mul(den_factors));

    // a purely numeric denominator is folded into the numerator
    match den.as_rational() {
        Some(r) if r != 1 && !r.is_zero() => {
            (normalize(&(num * SymExpr::rational(r.recip()))), SymExpr::one())
        },
        _ => (num, den),
    }
}

/// Splits an expression into its numerator and denominator, bringing sums of fractions over a
/// common denominator. Both parts are normalized and common factors are cancelled.
///
/// `x/2 + 1/x = (x^2 + 2) / (2x)`
/// `exp(-x) = 1 / exp(x)`
pub fn as_numer_denom(expr: &SymExpr) -> (SymExpr, SymExpr) {
    let (num, den) = match expr {
        SymExpr::Add(terms) => {
            let mut num = SymExpr::zero();
            let mut den = SymExpr::one();
            for term in terms {
                let (n, d) = as_numer_denom(term);
                if d == den {
                    num = normalize(&(num + n));
                } else {
                    num = normalize(&(num * d.clone() + n * den.clone()));
                    den = normalize(&(den * d));
                }
            }
            (num, den)
        },
        SymExpr::Mul(factors) => {
            let mut num = SymExpr::one();
            let mut den = SymExpr::one();
            for factor in factors {
                let (n, d) = split_factor(factor);
                num = num * n;
                den = den * d;
            }
            (normalize(&num), normalize(&den))
        },
        _ => {
            let (n, d) = split_factor(expr);
            (normalize(&n), normalize(&d))
        },
    };
    cancel(&num, &den)
}
