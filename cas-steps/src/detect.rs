//! Detection of indeterminate forms before a limit is computed.
//!
//! The detector only decides which narrative a limit walkthrough shows. The value of the limit
//! always comes from one call to [`Cas::limit`].

use cas_compute::symbolic::SymExpr;
use crate::cas::Cas;
use crate::request::Direction;
use std::fmt;

/// The form obtained by substituting the limit point into numerator and denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// `0/0`
    ZeroOverZero,

    /// `∞/∞`, with either sign.
    InfinityOverInfinity,

    /// Any other form involving an infinite or undefined value.
    Undefined,
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroOverZero => write!(f, "\\frac{{0}}{{0}}"),
            Self::InfinityOverInfinity => write!(f, "\\frac{{\\infty}}{{\\infty}}"),
            Self::Undefined => write!(f, "\\text{{undefined}}"),
        }
    }
}

/// The outcome of [`detect`].
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    /// Direct substitution gives an indeterminate form.
    Indeterminate(Form),

    /// Direct substitution is determinate. `substituted` holds the value of the expression at the
    /// point, if that value is finite.
    Determinate {
        substituted: Option<SymExpr>,
    },

    /// The limits of numerator and denominator could not be computed on their own.
    Unknown,
}

/// Examines `expr` at `var = point` by splitting it into numerator and denominator and taking the
/// limit of each.
pub fn detect(cas: &impl Cas, expr: &SymExpr, var: &str, point: &SymExpr, direction: Direction) -> Detection {
    let (numer, denom) = cas.numer_denom(expr);
    let limits = cas.limit(&numer, var, point, direction)
        .and_then(|numer| Ok((numer, cas.limit(&denom, var, point, direction)?)));
    let (numer, denom) = match limits {
        Ok(limits) => limits,
        Err(err) => {
            tracing::debug!(%expr, error = %err, "detect_sub_limit_failed");
            return Detection::Unknown;
        },
    };

    let detection = if numer.is_zero() && denom.is_zero() {
        Detection::Indeterminate(Form::ZeroOverZero)
    } else if numer.is_infinite() && denom.is_infinite() {
        Detection::Indeterminate(Form::InfinityOverInfinity)
    } else if !numer.is_finite() || !denom.is_finite() {
        Detection::Indeterminate(Form::Undefined)
    } else {
        let substituted = cas.substitute(expr, var, point);
        Detection::Determinate {
            substituted: substituted.is_finite().then_some(substituted),
        }
    };
    tracing::debug!(%expr, %numer, %denom, ?detection, "detect");
    detection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cas::SymbolicEngine;
    use pretty_assertions::assert_eq;

    fn detect_from(input: &str, point: &str, direction: Direction) -> Detection {
        let engine = SymbolicEngine;
        let expr = engine.parse(input).unwrap();
        let point = engine.parse(point).unwrap();
        detect(&engine, &expr, "x", &point, direction)
    }

    fn detect_at(input: &str, point: &str) -> Detection {
        detect_from(input, point, Direction::TwoSided)
    }

    #[test]
    fn zero_over_zero() {
        assert_eq!(detect_at("sin(x)/x", "0"), Detection::Indeterminate(Form::ZeroOverZero));
        assert_eq!(detect_at("(x^2 - 1)/(x - 1)", "1"), Detection::Indeterminate(Form::ZeroOverZero));
    }

    #[test]
    fn infinity_over_infinity() {
        assert_eq!(
            detect_at("(2*x^2 + 1)/(x^2 + 3)", "oo"),
            Detection::Indeterminate(Form::InfinityOverInfinity),
        );
    }

    #[test]
    fn undefined() {
        assert_eq!(detect_at("x^2", "oo"), Detection::Indeterminate(Form::Undefined));
    }

    #[test]
    fn determinate() {
        assert_eq!(
            detect_at("x^2 + 1", "2"),
            Detection::Determinate { substituted: Some(SymExpr::integer(5)) },
        );
        assert_eq!(
            detect_at("(x + 1)/(x + 2)", "0"),
            Detection::Determinate { substituted: Some(SymExpr::fraction(1, 2)) },
        );
    }

    #[test]
    fn determinate_without_finite_value() {
        // both parts have finite limits, but `0 * ln(0)` is not a value
        assert_eq!(
            detect_from("x*ln(x)", "0", Direction::Right),
            Detection::Determinate { substituted: None },
        );
    }

    #[test]
    fn sub_limit_fails() {
        // `sin(x)` has no limit at infinity
        assert_eq!(detect_at("sin(x)/x", "oo"), Detection::Unknown);
    }
}
