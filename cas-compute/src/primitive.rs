//! Functions to construct [`Integer`]s, [`Rational`]s and [`Float`]s from various types.

use rug::{Assign, Float, Integer, Rational};

/// The number of bits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string slice of decimal digits.
///
/// Returns [`None`] if the string contains anything other than decimal digits.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::from_str_radix(s, 10).ok()
}

/// Creates a [`Rational`] with the given numerator and denominator.
///
/// The denominator must be nonzero.
pub fn rational(num: impl Into<Integer>, den: impl Into<Integer>) -> Rational {
    Rational::from((num.into(), den.into()))
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string slice.
///
/// Returns [`None`] if the string is not a valid floating-point number.
pub fn float_from_str(s: &str) -> Option<Float> {
    Float::parse(s).ok().map(|parsed| Float::with_val(PRECISION, parsed))
}

/// Converts a finite [`Float`] into the exact [`Rational`] it represents.
pub fn rational_from_float(f: &Float) -> Option<Rational> {
    f.to_rational()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_integers() {
        assert_eq!(int_from_str("144"), Some(int(144)));
        assert_eq!(int_from_str("1e3"), None);
    }

    #[test]
    fn parse_floats() {
        assert_eq!(float_from_str("0.5"), Some(float(0.5)));
        assert_eq!(float_from_str("."), None);
    }

    #[test]
    fn reduced_rationals() {
        assert_eq!(rational(6, 4), rational(3, 2));
        assert_eq!(rational_from_float(&float(0.25)), Some(rational(1, 4)));
    }
}
