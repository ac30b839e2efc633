//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that carries an error kind along with the regions of input
//! it originated from.

extern crate self as gcalc_error;

use ariadne::{Color, Report};
use std::{any::Any, fmt::{self, Debug, Display, Formatter}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// The broad class an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// The input string is malformed.
    Syntax,

    /// A value lies outside the domain of the function it was given to, or a required value is
    /// missing.
    Domain,

    /// An imaginary value was produced or consumed while evaluating in real-only mode.
    Nonreal,

    /// The function is unknown, or the requested operation is not supported for it.
    Function,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Category::Syntax => write!(f, "SyntaxError"),
            Category::Domain => write!(f, "DomainError"),
            Category::Nonreal => write!(f, "NonrealError"),
            Category::Function => write!(f, "FunctionError"),
        }
    }
}

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// The category of this error.
    fn category(&self) -> Category;

    /// The human-readable message of this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;

    /// Returns `self` as [`Any`], so the concrete kind can be recovered.
    fn as_any(&self) -> &dyn Any;
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

    /// Creates a new error that is not associated with any region of the source code.
    pub fn spanless(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// The category of the error.
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// The human-readable message of the error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Attaches the given spans to this error if it does not already carry any.
    pub fn with_spans(mut self, spans: Vec<Range<usize>>) -> Self {
        if self.spans.is_empty() {
            self.spans = spans;
        }
        self
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use gcalc_attrs::ErrorKind;
    use pretty_assertions::assert_eq;

    #[derive(Debug, ErrorKind)]
    #[error(
        category = Domain,
        message = format!("No value provided for {}.", name),
        labels = ["this variable"],
        help = "bind a value first",
    )]
    struct Unbound {
        name: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(category = Syntax, message = "Mismatched parentheses.")]
    struct Mismatched;

    #[test]
    fn category_and_message() {
        let err = Error::new(vec![0..1], Unbound { name: "x".to_string() });
        assert_eq!(err.category(), Category::Domain);
        assert_eq!(err.message(), "No value provided for x.");
        assert_eq!(err.to_string(), "DomainError: No value provided for x.");
        assert!(err.is::<Unbound>());
        assert!(!err.is::<Mismatched>());
    }

    #[test]
    fn report_without_spans() {
        let err = Error::spanless(Mismatched);
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", ariadne::Source::from("(1+2")), &mut buf)
            .unwrap();
        let text = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
        assert!(text.contains("SyntaxError: Mismatched parentheses."));
    }

    #[test]
    fn report_with_label() {
        let err = Error::new(vec![4..5], Unbound { name: "y".to_string() });
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", ariadne::Source::from("2 + y")), &mut buf)
            .unwrap();
        let text = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
        assert!(text.contains("this variable"));
        assert!(text.contains("bind a value first"));
    }
}
