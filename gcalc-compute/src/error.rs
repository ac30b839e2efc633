//! Errors raised while evaluating, differentiating or simplifying expressions.

use ariadne::Fmt;
use gcalc_attrs::ErrorKind;
use gcalc_error::EXPR;

/// A combinatoric function was given a negative or fractional argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Domain,
    message = "Nonnegative integers only.",
    help = format!("{}, {} and {} are defined for 0, 1, 2, ...", "fac".fg(EXPR), "npr".fg(EXPR), "ncr".fg(EXPR)),
)]
pub struct NonnegativeIntegersOnly;

/// A permutation or combination chose more items than there are.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(category = Domain, message = "r cannot be greater than n.")]
pub struct PermutationOrder;

/// A function that orders or counts values was given a nonreal argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(category = Domain, message = "Real numbers only.")]
pub struct RealNumbersOnly;

/// An operand or argument was left empty.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(category = Domain, message = "Missing operand or argument.")]
pub struct MissingOperand;

/// A variable was bound without a value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Domain,
    message = format!("No value provided for {}.", name),
)]
pub struct UnboundVariable {
    /// The name of the variable.
    pub name: String,
}

/// A function was called with more arguments than it accepts.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Domain,
    message = format!("Max number of arguments expected for {}: {}.", name, max),
)]
pub struct TooManyArguments {
    /// The name of the function.
    pub name: String,

    /// The maximum number of arguments it accepts.
    pub max: usize,
}

/// The variable of differentiation is a constant.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(category = Domain, message = "Cannot differentiate with respect to a constant.")]
pub struct ConstantDifferential;

/// A nonreal value was produced while evaluating in real mode.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Nonreal,
    message = "Nonreal answer or argument.",
    help = "switch to complex mode to allow imaginary results",
)]
pub struct NonrealResult;

/// The function is not known.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Function,
    message = format!("Function: {} is not supported.", name),
    help = if suggestions.is_empty() {
        "type :help for a list of available functions".to_string()
    } else if suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,

    /// A list of similarly named functions, if any.
    pub suggestions: Vec<String>,
}

/// The function has no derivative rule and does not reduce to a constant.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(category = Function, message = format!("{} is not differentiable.", name))]
pub struct NotDifferentiable {
    /// The name of the function.
    pub name: String,
}

/// The simplifier hit its iteration cap without reaching a fixed point.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(category = Function, message = "Simplification did not converge.")]
pub struct SimplifyDiverged;
