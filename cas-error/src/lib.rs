//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Errors carry the regions of the input text they originate from, so that a report can point at
//! the offending part of an expression. Errors raised by the computer-algebra engine itself
//! (for example, an integral with no elementary primitive) usually have no spans; their report
//! is just the message and optional help text.

#[cfg(test)]
extern crate self as cas_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt, fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns `self` as [`Any`], so callers can inspect the concrete kind of an error.
    fn as_any(&self) -> &dyn Any;

    /// The one-line message describing this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that is not attached to any region of the source code.
    pub fn unspanned(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// The one-line message describing this error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr, highlighting the regions of `input` it originated from.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }

    /// Render the report for this error into a plain string, without any terminal colors.
    pub fn report_to_string(&self, src_id: &str, input: &str) -> io::Result<String> {
        let mut buf = Vec::new();
        self.build_report(src_id).write((src_id, Source::from(input)), &mut buf)?;
        Ok(String::from_utf8_lossy(&strip_ansi_escapes::strip(buf)).into_owned())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use cas_attrs::ErrorKind;
    use pretty_assertions::assert_eq;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("unknown function `{}`", self.name),
        labels = ["this function"],
        help = "check the spelling of the function name",
    )]
    struct UnknownThing {
        name: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "no spans here")]
    struct Unspanned;

    #[test]
    fn message_and_downcast() {
        let err = Error::new(vec![0..3], UnknownThing { name: "foo".to_string() });
        assert_eq!(err.message(), "unknown function `foo`");
        assert_eq!(err.to_string(), "unknown function `foo`");
        assert!(err.is::<UnknownThing>());
        assert!(!err.is::<Unspanned>());
        assert_eq!(err.downcast_ref::<UnknownThing>().map(|k| k.name.as_str()), Some("foo"));
    }

    #[test]
    fn report_points_at_span() {
        let err = Error::new(vec![0..3], UnknownThing { name: "foo".to_string() });
        let report = err.report_to_string("input", "foo(x) + 1").unwrap();
        assert!(report.contains("unknown function `foo`"));
        assert!(report.contains("this function"));
        assert!(report.contains("check the spelling"));
    }

    #[test]
    fn report_without_spans() {
        let err = Error::unspanned(Unspanned);
        let report = err.report_to_string("input", "x^2").unwrap();
        assert!(report.contains("no spans here"));
    }
}
