//! Walkthrough builders, one per kind of operation.
//!
//! Each builder parses its input, asks the [`Cas`] for every result it shows, and returns the
//! complete [`Walkthrough`]. A failure anywhere aborts the builder with a single [`Error`]; no
//! partial walkthrough is ever returned.
//!
//! [`Walkthrough`]: crate::step::Walkthrough

mod arithmetic;
mod derivative;
mod integral;
mod limit;
mod series;
mod solve;
mod summation;
mod transform;

pub use arithmetic::arithmetic;
pub use derivative::derivative;
pub use integral::integral;
pub use limit::limit;
pub use series::series;
pub use solve::solve;
pub use summation::summation;
pub use transform::transform;

use cas_compute::symbolic::SymExpr;
use crate::cas::Cas;
use crate::config::StepConfig;
use crate::error::{Error, InvalidOrder, InvalidVariable};
use crate::step::Rendered;

/// Names that parse to constants rather than to symbols.
const RESERVED_NAMES: [&str; 4] = ["e", "E", "pi", "oo"];

/// Checks that `name` can be used as the variable of an operation: it must be a name the
/// tokenizer reads as a single symbol, `[a-zA-Z_][a-zA-Z_0-9]*`.
pub(crate) fn check_variable(name: &str) -> Result<(), Error> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED_NAMES.contains(&name);
    if valid {
        Ok(())
    } else {
        Err(Error::invalid_parameter(InvalidVariable { name: name.to_string() }))
    }
}

/// Checks that a derivative or series order is accepted.
pub(crate) fn check_order(order: usize, config: &StepConfig) -> Result<(), Error> {
    if (1..=config.max_order).contains(&order) {
        Ok(())
    } else {
        Err(Error::invalid_parameter(InvalidOrder { order, max: config.max_order }))
    }
}

/// Renders an expression for the answer of a walkthrough.
pub(crate) fn rendered(cas: &impl Cas, expr: &SymExpr) -> Rendered {
    Rendered {
        text: expr.to_string(),
        latex: cas.latex(expr),
    }
}

/// The English ordinal of `n`: `1st`, `2nd`, `3rd`, `4th`, ..., `11th`, ..., `21st`.
pub(crate) fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn variables() {
        assert!(check_variable("x").is_ok());
        assert!(check_variable("theta").is_ok());
        assert!(check_variable("x_1").is_ok());
        assert!(check_variable("").is_err());
        assert!(check_variable("2x").is_err());
        assert!(check_variable("pi").is_err());
        assert!(check_variable("x+y").is_err());

        // only names the tokenizer reads as one symbol
        assert!(check_variable("_t").is_ok());
        assert!(check_variable("θ").is_err());
        assert!(check_variable("x²").is_err());
    }

    #[test]
    fn orders() {
        let config = StepConfig::default();
        assert!(check_order(1, &config).is_ok());
        assert!(check_order(10, &config).is_ok());

        let err = check_order(0, &config).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert_eq!(err.to_string(), "invalid order `0`");
        assert!(check_order(11, &config).is_err());
    }

    #[test]
    fn ordinals() {
        let ordinals = [1, 2, 3, 4, 11, 12, 13, 21, 22, 101, 111]
            .map(ordinal);
        assert_eq!(ordinals, ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "101st", "111th"]);
    }
}
