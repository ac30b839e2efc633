use std::fmt::{self, Display, Formatter};

/// A builtin operation that an [`Expr::Call`](super::Expr::Call) node applies to its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
    Abs,
    Max,
    Min,
    Floor,
    Ceil,
    Fac,
    Npr,
    Ncr,
    Gcd,
    Exp,
    Ln,
    Log,
    Pow,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
    Arcsin,
    Arccos,
    Arctan,
    Arccsc,
    Arcsec,
    Arccot,

    /// Symbolic differentiation, `diff(f)`, `diff(f, x)` or `diff(f, y, x)`.
    Diff,
}

impl Op {
    /// Every builtin operation.
    pub const ALL: [Op; 31] = [
        Op::Add, Op::Subtract, Op::Multiply, Op::Divide, Op::Abs, Op::Max, Op::Min, Op::Floor,
        Op::Ceil, Op::Fac, Op::Npr, Op::Ncr, Op::Gcd, Op::Exp, Op::Ln, Op::Log, Op::Pow, Op::Sqrt,
        Op::Sin, Op::Cos, Op::Tan, Op::Csc, Op::Sec, Op::Cot, Op::Arcsin, Op::Arccos, Op::Arctan,
        Op::Arccsc, Op::Arcsec, Op::Arccot, Op::Diff,
    ];

    /// The name of the operation, as written in canonical form.
    pub fn name(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Subtract => "subtract",
            Op::Multiply => "multiply",
            Op::Divide => "divide",
            Op::Abs => "abs",
            Op::Max => "max",
            Op::Min => "min",
            Op::Floor => "floor",
            Op::Ceil => "ceil",
            Op::Fac => "fac",
            Op::Npr => "npr",
            Op::Ncr => "ncr",
            Op::Gcd => "gcd",
            Op::Exp => "exp",
            Op::Ln => "ln",
            Op::Log => "log",
            Op::Pow => "pow",
            Op::Sqrt => "sqrt",
            Op::Sin => "sin",
            Op::Cos => "cos",
            Op::Tan => "tan",
            Op::Csc => "csc",
            Op::Sec => "sec",
            Op::Cot => "cot",
            Op::Arcsin => "arcsin",
            Op::Arccos => "arccos",
            Op::Arctan => "arctan",
            Op::Arccsc => "arccsc",
            Op::Arcsec => "arcsec",
            Op::Arccot => "arccot",
            Op::Diff => "diff",
        }
    }

    /// Looks up an operation by its canonical name.
    pub fn from_name(name: &str) -> Option<Op> {
        Op::ALL.iter().copied().find(|op| op.name() == name)
    }

    /// The maximum number of arguments the operation accepts, or [`None`] if it is variadic.
    pub fn max_args(self) -> Option<usize> {
        match self {
            Op::Add | Op::Multiply | Op::Max | Op::Min | Op::Gcd => None,
            Op::Subtract | Op::Divide | Op::Npr | Op::Ncr | Op::Pow => Some(2),
            Op::Diff => Some(3),
            _ => Some(1),
        }
    }

    /// The minimum number of arguments the operation needs to be evaluated.
    pub fn min_args(self) -> usize {
        match self {
            Op::Subtract | Op::Divide | Op::Npr | Op::Ncr | Op::Pow => 2,
            _ => 1,
        }
    }

    /// Returns true if the operation depends on the [`TrigMode`](crate::mode::TrigMode).
    pub fn is_trig(self) -> bool {
        matches!(
            self,
            Op::Sin | Op::Cos | Op::Tan | Op::Csc | Op::Sec | Op::Cot
                | Op::Arcsin | Op::Arccos | Op::Arctan | Op::Arccsc | Op::Arcsec | Op::Arccot
        )
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn names_round_trip() {
        for op in Op::ALL {
            assert_eq!(Op::from_name(op.name()), Some(op));
        }
        assert_eq!(Op::from_name("sinh"), None);
    }

    #[test]
    fn arity() {
        assert_eq!(Op::Add.max_args(), None);
        assert_eq!(Op::Pow.max_args(), Some(2));
        assert_eq!(Op::Diff.max_args(), Some(3));
        assert_eq!(Op::Sin.max_args(), Some(1));
        assert_eq!(Op::Divide.min_args(), 2);
    }
}
