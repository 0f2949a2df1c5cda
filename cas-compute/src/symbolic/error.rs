//! Errors raised by the symbolic engine.
//!
//! Most of these have no source spans, since they describe a property of the whole expression
//! (an integral without an elementary primitive, a limit whose sides disagree). The exceptions are
//! errors raised while converting a parsed expression, which point at the offending call.

use cas_attrs::ErrorKind;

/// A function call names a function the engine does not know.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = ["this function"],
    help = if suggestions.is_empty() {
        "supported functions are sin, cos, tan, sec, csc, cot, asin, acos, atan, sinh, cosh, tanh, exp, ln, log, sqrt and abs".to_string()
    } else {
        format!("did you mean {}?", suggestions.iter().map(|s| format!("`{}`", s)).collect::<Vec<_>>().join(" or "))
    },
)]
pub struct UnknownFunction {
    /// The name of the function that was called.
    pub name: String,

    /// Known function names close to the one that was called.
    pub suggestions: Vec<String>,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {} argument(s), but {} were given", name, expected, given),
    labels = ["this call"],
)]
pub struct WrongArgumentCount {
    /// The name of the function.
    pub name: String,

    /// A description of the accepted argument counts.
    pub expected: String,

    /// The number of arguments given.
    pub given: usize,
}

/// A numeric literal could not be represented.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", literal),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The literal as written.
    pub literal: String,
}

/// An expression divides by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "division by zero")]
pub struct DivisionByZero;

/// The derivative of a function is not known.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate `{}`", function),
    help = "only the elementary functions can be differentiated",
)]
pub struct UnsupportedDerivative {
    /// The function that could not be differentiated.
    pub function: String,
}

/// No elementary primitive was found for an integrand.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("no elementary antiderivative found for `{}`", integrand),
    help = "the integrand may not have a primitive expressible with elementary functions",
)]
pub struct UnsupportedIntegral {
    /// The integrand, in calculator syntax.
    pub integrand: String,
}

/// The one-sided limits of a two-sided limit disagree.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the limit does not exist",
    help = format!("the limit from the left is `{}`, but the limit from the right is `{}`", left, right),
)]
pub struct LimitDoesNotExist {
    /// The limit from the left.
    pub left: String,

    /// The limit from the right.
    pub right: String,
}

/// A limit could not be determined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("could not determine the limit of `{}`", expr))]
pub struct LimitNotFound {
    /// The expression whose limit was requested.
    pub expr: String,
}

/// A limit was requested at a point that is not a number or a signed infinity.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("cannot take a limit at `{}`", point))]
pub struct InvalidLimitPoint {
    /// The requested point.
    pub point: String,
}

/// The Taylor coefficients of an expression could not be computed at the expansion point.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot expand `{}` in a series around `{}`", expr, point),
    help = "the function or one of its derivatives is undefined at this point",
)]
pub struct UnsupportedSeries {
    /// The expression to expand.
    pub expr: String,

    /// The expansion point.
    pub point: String,
}

/// An equation is outside of the class of equations the solver handles.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot solve this equation",
    help = reason.clone(),
)]
pub struct UnsupportedEquation {
    /// Why the equation could not be solved.
    pub reason: String,
}

/// A summation bound is not an integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("summation bound `{}` is not an integer", bound),
    help = "summation bounds must evaluate to integers",
)]
pub struct NonIntegerBound {
    /// The bound, in calculator syntax.
    pub bound: String,
}

/// A summation has too many terms to add one by one.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("summation has {} terms, more than the maximum of {}", terms, max),
)]
pub struct SummationTooLarge {
    /// The number of terms in the summation.
    pub terms: String,

    /// The maximum number of terms.
    pub max: usize,
}

/// A Laplace transform (or its inverse) is not in the supported table.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = if *inverse {
        format!("cannot compute the inverse Laplace transform of `{}`", expr)
    } else {
        format!("cannot compute the Laplace transform of `{}`", expr)
    },
)]
pub struct UnsupportedTransform {
    /// The expression to transform.
    pub expr: String,

    /// Whether the inverse transform was requested.
    pub inverse: bool,
}
