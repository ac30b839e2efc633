use ariadne::{Fmt, Source};
use gcalc_attrs::ErrorKind;
use gcalc_error::EXPR;

/// A line started with `:` but named no known command.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = format!("Unknown command: {}", name),
    labels = ["this command"],
    help = format!("type {} to list the commands", ":help".fg(EXPR)),
)]
pub struct UnknownCommand {
    /// The command that was typed.
    pub name: String,
}

/// A `:let` command was not of the form `:let x = <expression>`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = "Expected a binding such as :let x = 2.",
    help = format!("write {}", ":let <variable> = <expression>".fg(EXPR)),
)]
pub struct MalformedLet;

/// The value given to `:let` did not evaluate to a number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Domain,
    message = format!("{} must be bound to a number.", name),
    labels = ["this expression still has free variables"],
)]
pub struct NonnumericBinding {
    /// The variable being bound.
    pub name: String,
}

/// A [`gcalc_error::Error`] along with the text its spans point into.
#[derive(Debug)]
pub struct Error {
    /// The error itself.
    pub inner: gcalc_error::Error,

    /// The text the error was raised on: the whole line, or the argument of a command.
    pub source: String,
}

impl Error {
    /// Packages an error raised on `source`.
    pub fn new(inner: gcalc_error::Error, source: &str) -> Self {
        Self { inner, source: source.to_string() }
    }

    /// Report the error to stderr.
    ///
    /// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
    /// implementation, so we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self) {
        let report = self.inner.build_report("input");
        if let Err(err) = report.eprint(("input", Source::from(self.source.as_str()))) {
            eprintln!("{}: {}", self.inner, err);
        }
    }
}
