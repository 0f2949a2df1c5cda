use ariadne::Fmt;
use cas_attrs::ErrorKind;
use cas_error::EXPR;
use crate::tokenizer::TokenKind;

/// The input stopped in the middle of an expression, such as after a trailing operator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the input ends too early",
    labels = [format!("an {} is missing here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// A complete expression was parsed, but more input follows it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected input after the expression",
    labels = [format!("this does not continue the {} before it", "expression".fg(EXPR))],
    help = "check for a missing operator or an extra parenthesis",
)]
pub struct ExpectedEof;

/// A token that cannot appear at this position.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected {:?}", found),
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
)]
pub struct UnexpectedToken {
    /// The kinds of token that would have been accepted.
    pub expected: &'static [TokenKind],

    /// The kind of token that was found instead.
    pub found: TokenKind,
}

/// A parenthesis without its partner.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unbalanced parentheses",
    labels = ["this parenthesis has no partner"],
    help = if *opening {
        "add a `)` to close it"
    } else {
        "remove it, or add a `(` before it"
    },
)]
pub struct UnclosedParenthesis {
    /// True for an unclosed `(`, false for a stray `)`.
    pub opening: bool,
}

/// `()` with nothing inside.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty parentheses",
    labels = [format!("an {} is expected inside", "expression".fg(EXPR))],
)]
pub struct EmptyParenthesis;

/// The input is empty or only whitespace.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "nothing to calculate",
    help = format!("type an {}, such as `x^2 + 1`", "expression".fg(EXPR)),
)]
pub struct EmptyInput;

/// An equation with more than one `=`, such as `x = 1 = 2`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an equation can only have one `=`",
    labels = ["second `=` here"],
    help = "write each equation separately",
)]
pub struct ChainedEquation;
