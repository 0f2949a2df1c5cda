//! Errors surfaced to the presentation layer.
//!
//! Every failure of a walkthrough is reported as a single [`Error`]. The variants are the
//! categories a user sees; each wraps the [`cas_error::Error`] (or errors, for the parser) that
//! caused it, so that a report can still point at the offending part of the input.

use cas_attrs::ErrorKind;
use cas_compute::symbolic::error::{
    DivisionByZero as EngineDivisionByZero,
    InvalidLimitPoint,
    InvalidNumber,
    NonIntegerBound,
    SummationTooLarge,
    UnknownFunction,
    WrongArgumentCount,
};
use std::{fmt, io};

/// The requested derivative or series order is outside the accepted range.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid order `{}`", order),
    help = format!("the order must be between 1 and {}", max),
)]
pub struct InvalidOrder {
    /// The requested order.
    pub order: usize,

    /// The largest accepted order.
    pub max: usize,
}

/// A variable name is empty or is not a plain symbol.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid variable name", name),
    help = "variable names are made of letters, such as `x` or `theta`",
)]
pub struct InvalidVariable {
    /// The name that was given.
    pub name: String,
}

/// Division by zero in basic arithmetic.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "division by zero", help = "the divisor must not be zero")]
pub struct DivisionByZero;

/// The result of an arithmetic operation is not a finite real number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "the result is not a real number")]
pub struct NonRealResult;

/// A failed operation, in one of the categories shown to the user.
#[derive(Debug)]
pub enum Error {
    /// The input text could not be parsed, or names an unknown function.
    Parse {
        /// The text that failed to parse.
        input: String,

        /// The errors, with spans into `input`.
        errors: Vec<cas_error::Error>,
    },

    /// Basic arithmetic divided by zero.
    DivisionByZero(cas_error::Error),

    /// The engine could not carry out the operation, such as an integral without an elementary
    /// primitive.
    Unsupported(cas_error::Error),

    /// A parameter of the request is out of range, such as a derivative of order zero.
    InvalidParameter(cas_error::Error),
}

impl Error {
    /// Categorizes an error raised by the engine while working on `input`.
    pub fn from_engine(input: &str, err: cas_error::Error) -> Self {
        if err.is::<UnknownFunction>() || err.is::<WrongArgumentCount>() || err.is::<InvalidNumber>() {
            Self::Parse { input: input.to_string(), errors: vec![err] }
        } else if err.is::<EngineDivisionByZero>() || err.is::<DivisionByZero>() {
            Self::DivisionByZero(err)
        } else if err.is::<NonIntegerBound>()
            || err.is::<SummationTooLarge>()
            || err.is::<InvalidLimitPoint>()
            || err.is::<InvalidOrder>()
            || err.is::<InvalidVariable>()
        {
            Self::InvalidParameter(err)
        } else {
            Self::Unsupported(err)
        }
    }

    /// Creates an [`Error::InvalidParameter`] from the given kind.
    pub fn invalid_parameter(kind: impl cas_error::ErrorKind + 'static) -> Self {
        Self::InvalidParameter(cas_error::Error::unspanned(kind))
    }

    /// Returns the underlying errors.
    pub fn errors(&self) -> &[cas_error::Error] {
        match self {
            Self::Parse { errors, .. } => errors,
            Self::DivisionByZero(err) | Self::Unsupported(err) | Self::InvalidParameter(err) => {
                std::slice::from_ref(err)
            },
        }
    }

    /// The text the errors point into, if they have spans.
    fn input(&self) -> &str {
        match self {
            Self::Parse { input, .. } => input,
            _ => "",
        }
    }

    /// The one-line message describing this error.
    pub fn message(&self) -> String {
        self.errors()
            .first()
            .map(cas_error::Error::message)
            .unwrap_or_default()
    }

    /// Report this error to stderr.
    pub fn report_to_stderr(&self, src_id: &str) -> io::Result<()> {
        for err in self.errors() {
            err.report_to_stderr(src_id, self.input())?;
        }
        Ok(())
    }

    /// Render the reports for this error into a plain string, without any terminal colors.
    pub fn report_to_string(&self, src_id: &str) -> io::Result<String> {
        let mut out = String::new();
        for err in self.errors() {
            out.push_str(&err.report_to_string(src_id, self.input())?);
        }
        Ok(out)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use cas_compute::symbolic::error::UnsupportedIntegral;
    use pretty_assertions::assert_eq;

    #[test]
    fn categories() {
        let err = Error::from_engine("exp(x^2)", cas_error::Error::unspanned(UnsupportedIntegral {
            integrand: "exp(x^2)".to_string(),
        }));
        assert!(matches!(err, Error::Unsupported(_)));

        let err = Error::from_engine("foo(x)", cas_error::Error::new(vec![0..3], UnknownFunction {
            name: "foo".to_string(),
            suggestions: Vec::new(),
        }));
        assert!(matches!(err, Error::Parse { .. }));

        let err = Error::invalid_parameter(InvalidOrder { order: 0, max: 10 });
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn single_message() {
        let err = Error::DivisionByZero(cas_error::Error::unspanned(DivisionByZero));
        assert_eq!(err.to_string(), "division by zero");
    }

    #[test]
    fn report_points_into_input() {
        let err = Error::from_engine("foo(x)", cas_error::Error::new(vec![0..3], UnknownFunction {
            name: "foo".to_string(),
            suggestions: vec!["cos".to_string()],
        }));
        let report = err.report_to_string("input").unwrap();
        assert!(report.contains("unknown function `foo`"));
        assert!(report.contains("did you mean `cos`?"));
    }
}
