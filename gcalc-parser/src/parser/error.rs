use ariadne::Fmt;
use gcalc_attrs::ErrorKind;
use gcalc_error::EXPR;

/// The input contained nothing to parse.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = "Enter something...",
    help = format!("type an {}, such as {}", "expression".fg(EXPR), "2x + 1".fg(EXPR)),
)]
pub struct EmptyInput;

/// A character that is not part of the input language was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = format!("Invalid character: {}", character),
    labels = ["this character is not allowed"],
)]
pub struct InvalidCharacter {
    /// The offending character.
    pub character: String,
}

/// A bare identifier of more than one letter was used as a variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = format!("Variable: {} must be a single character.", name),
    labels = ["this identifier"],
    help = format!(
        "if you meant a function, add parentheses: {}; to multiply variables, write {}",
        format!("{}(...)", name).fg(EXPR),
        name.chars().map(String::from).collect::<Vec<_>>().join("*").fg(EXPR),
    ),
)]
pub struct MultiCharVariable {
    /// The identifier that was found.
    pub name: String,
}

/// Parentheses do not pair up.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = "Mismatched parentheses.",
    labels = ["this parenthesis has no partner"],
)]
pub struct MismatchedParentheses;

/// A token appeared where it cannot be used.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = format!("Unexpected token: {}", lexeme),
    labels = ["I could not understand this"],
    help = if lexeme == "," {
        "commas can only separate the arguments of a function call"
    } else {
        "check for a missing operator or parenthesis"
    },
)]
pub struct UnexpectedToken {
    /// The raw text of the token.
    pub lexeme: String,
}

/// The input nests deeper than the parser is willing to recurse.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = "Expression is nested too deeply.",
    labels = ["nesting limit exceeded here"],
)]
pub struct TooDeep;
