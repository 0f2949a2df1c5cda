//! Recognition of exact values from floating-point approximations.

use rug::{Float, Integer, Rational};
use crate::consts::PI;
use crate::primitive::float;
use crate::symbolic::expr::{SymExpr, PI as PI_SYMBOL};

/// Continued-fraction convergents with a larger denominator are not accepted as exact values.
const MAX_DENOMINATOR: u32 = 1000;

/// Computes the [`Rational`] from the continued fraction form of a float.
fn rational_from_continued_fraction(continued_fraction_form: &[Integer]) -> Rational {
    let mut iter = continued_fraction_form.iter().rev();
    let Some(last) = iter.next() else {
        return Rational::new();
    };

    let mut rational = Rational::from(last);
    for integer in iter {
        rational = rational.recip() + integer;
    }
    rational
}

/// Approximates the given float as a rational fraction with a small denominator.
///
/// This function applies the continued fraction algorithm to the given float until the
/// convergent is within `tolerance` of the float. Returns [`None`] if no convergent with a
/// denominator of at most 1000 is close enough.
///
/// See
/// [Wikipedia](https://en.wikipedia.org/wiki/Continued_fraction#Calculating_continued_fraction_representations)
/// for more information.
pub fn approximate_rational(n: &Float, tolerance: &Float) -> Option<Rational> {
    let mut continued_fraction_form = Vec::new();
    let mut rest = n.clone();
    loop {
        let (integer, fractional) = rest.trunc_fract(float(0));
        continued_fraction_form.push(integer.to_integer()?);

        let rational = rational_from_continued_fraction(&continued_fraction_form);
        if *rational.denom() > MAX_DENOMINATOR {
            return None;
        }

        let error = float(n - rational.clone()).abs();
        if fractional.is_zero() || error < *tolerance {
            return Some(rational);
        }

        rest = fractional.recip();
    }
}

/// Recognizes a float as a small rational, or a small rational multiple of `pi`.
pub fn recognize(n: &Float, tolerance: &Float) -> Option<SymExpr> {
    if let Some(r) = approximate_rational(n, tolerance) {
        return Some(SymExpr::rational(r));
    }

    let multiple = approximate_rational(&float(n / &*PI), tolerance)?;
    Some(SymExpr::rational(multiple) * SymExpr::symbol(PI_SYMBOL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_fractions() {
        let tolerance = float(1e-12);
        assert_eq!(approximate_rational(&float(0.75), &tolerance), Some(Rational::from((3, 4))));
        assert_eq!(approximate_rational(&(float(1) / 3), &tolerance), Some(Rational::from((1, 3))));
        assert_eq!(approximate_rational(&float(-2.5), &tolerance), Some(Rational::from((-5, 2))));
    }

    #[test]
    fn irrationals_are_rejected() {
        let tolerance = float(1e-12);
        assert_eq!(approximate_rational(&float(2).sqrt(), &tolerance), None);
    }

    #[test]
    fn multiples_of_pi() {
        let tolerance = float(1e-12);
        let half_pi = float(&*PI) / 2;
        assert_eq!(
            recognize(&half_pi, &tolerance),
            Some(SymExpr::fraction(1, 2) * SymExpr::symbol(PI_SYMBOL)),
        );
    }
}
