//! Expression trees built from the parser's canonical form.
//!
//! An [`Expr`] is either a [`Leaf`] (a complex literal, a named constant, a variable or a
//! missing operand) or a call of an [`Op`] on a list of arguments. Names the kernel does not know
//! are kept as [`Expr::Unknown`] so that the tree can still be displayed; they only fail once the
//! tree is evaluated or differentiated.
//!
//! Trees are immutable values. Every transformation in [`crate::symbolic`] builds a new tree.

pub mod eval;
pub mod fmt;
pub mod op;

use crate::complex::Complex;
use crate::consts::{E, PI};
use crate::mode::EvalMode;
use gcalc_error::Error;
use gcalc_parser::{LitNum, Node, Scalar};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub use eval::{Binding, Value};
pub use op::Op;

/// A named constant, kept symbolic until evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    /// The value of the constant, computed by the real kernel.
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => *PI,
            Constant::E => *E,
        }
    }

    /// The name of the constant.
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }
}

/// An identity node: the leaves of an expression tree.
#[derive(Debug, Clone)]
pub enum Leaf {
    /// A complex literal.
    Number(Complex),

    /// `pi` or `e`.
    Constant(Constant),

    /// A variable such as `x`, or a differential such as `dx`.
    Variable(String),

    /// A missing operand.
    Empty,
}

/// An expression tree.
#[derive(Debug, Clone)]
pub enum Expr {
    /// An identity node.
    Leaf(Leaf),

    /// A builtin operation applied to its arguments.
    Call(Op, Vec<Expr>),

    /// A call to a function that does not exist.
    Unknown(String, Vec<Expr>),
}

impl Expr {
    /// Creates a literal leaf. Negative zero parts are stored as `0`.
    pub fn number(value: impl Into<Complex>) -> Self {
        let c = value.into();
        Expr::Leaf(Leaf::Number(Complex::new(c.re + 0.0, c.im + 0.0)))
    }

    /// Creates a variable leaf.
    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Leaf(Leaf::Variable(name.into()))
    }

    /// Creates a call node.
    pub fn call(op: Op, args: Vec<Expr>) -> Self {
        Expr::Call(op, args)
    }

    /// Builds a tree from the parser's canonical tree.
    pub fn create_tree(node: &Node) -> Self {
        match node {
            Node::Number(LitNum { re: Scalar::Pi, im }) if im.is_zero() => {
                Expr::Leaf(Leaf::Constant(Constant::Pi))
            },
            Node::Number(LitNum { re: Scalar::E, im }) if im.is_zero() => {
                Expr::Leaf(Leaf::Constant(Constant::E))
            },
            Node::Number(LitNum { re, im }) => {
                Expr::number(Complex::new(scalar_value(*re), scalar_value(*im)))
            },
            Node::Symbol(name) => Expr::variable(name.as_str()),
            Node::Empty => Expr::Leaf(Leaf::Empty),
            Node::Call(call) => {
                let args = call.args.iter().map(Expr::create_tree).collect();
                match Op::from_name(&call.name) {
                    Some(op) => Expr::Call(op, args),
                    None => Expr::Unknown(call.name.clone(), args),
                }
            },
        }
    }

    /// The name of the operation at the root of this tree. Leaves are `identity` nodes.
    pub fn name(&self) -> &str {
        match self {
            Expr::Leaf(_) => "identity",
            Expr::Call(op, _) => op.name(),
            Expr::Unknown(name, _) => name,
        }
    }

    /// The arguments of the root operation. Leaves have none.
    pub fn args(&self) -> &[Expr] {
        match self {
            Expr::Leaf(_) => &[],
            Expr::Call(_, args) | Expr::Unknown(_, args) => args,
        }
    }

    /// Returns the literal this tree holds, if it is a [`Leaf::Number`].
    pub fn as_number(&self) -> Option<Complex> {
        match self {
            Expr::Leaf(Leaf::Number(c)) => Some(*c),
            _ => None,
        }
    }

    /// Returns the name of the variable this tree holds, if it is a [`Leaf::Variable`].
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Expr::Leaf(Leaf::Variable(name)) => Some(name),
            _ => None,
        }
    }

    /// Returns true if this tree is the literal `value`.
    pub fn is_literal(&self, value: f64) -> bool {
        self.as_number().is_some_and(|c| c == Complex::real(value))
    }

    /// Returns true if this tree is a differential leaf, such as `dx`.
    pub fn is_differential(&self) -> bool {
        self.as_variable().is_some_and(|name| name.len() > 1 && name.starts_with('d'))
    }

    /// Returns true if this tree is a literal or a named constant.
    pub fn is_constant(&self) -> bool {
        matches!(self, Expr::Leaf(Leaf::Number(_) | Leaf::Constant(_)))
    }

    /// Evaluates the tree with no bindings in the default mode, returning [`None`] if the
    /// evaluation fails or does not produce a number.
    pub fn try_evaluate(&self) -> Option<Complex> {
        match self.evaluate(None, EvalMode::default()) {
            Ok(Value::Number(c)) => Some(c),
            _ => None,
        }
    }

    /// Returns true if the tree evaluates to a number.
    pub fn is_number(&self) -> bool {
        self.try_evaluate().is_some()
    }

    /// Returns true if the tree contains no variables, missing operands or unknown functions,
    /// so that evaluating it cannot leave anything symbolic behind.
    pub fn is_evaluable(&self) -> bool {
        match self {
            Expr::Leaf(leaf) => matches!(leaf, Leaf::Number(_) | Leaf::Constant(_)),
            Expr::Call(Op::Diff, _) | Expr::Unknown(..) => false,
            Expr::Call(_, args) => args.iter().all(Expr::is_evaluable),
        }
    }

    /// With `only` set, returns true if every leaf is either `variable` or a constant. Otherwise,
    /// returns true if `variable` appears anywhere in the tree.
    pub fn is_function_of(&self, variable: &str, only: bool) -> bool {
        match self {
            Expr::Leaf(Leaf::Variable(name)) => name == variable,
            Expr::Leaf(Leaf::Number(_) | Leaf::Constant(_)) => only,
            Expr::Leaf(Leaf::Empty) => false,
            Expr::Call(_, args) | Expr::Unknown(_, args) => {
                if only {
                    args.iter().all(|arg| arg.is_function_of(variable, only))
                } else {
                    args.iter().any(|arg| arg.is_function_of(variable, only))
                }
            },
        }
    }

    /// Structural equality: the same operations in the same places, with literals compared
    /// component-wise (`NaN` matches `NaN`) and variables compared by name.
    pub fn is_identical_to(&self, other: &Expr) -> bool {
        match (self, other) {
            (Expr::Leaf(a), Expr::Leaf(b)) => match (a, b) {
                (Leaf::Number(a), Leaf::Number(b)) => a.same(b),
                (Leaf::Constant(a), Leaf::Constant(b)) => a == b,
                (Leaf::Variable(a), Leaf::Variable(b)) => a == b,
                (Leaf::Empty, Leaf::Empty) => true,
                _ => false,
            },
            (Expr::Call(op_a, args_a), Expr::Call(op_b, args_b)) => {
                op_a == op_b && identical_args(args_a, args_b)
            },
            (Expr::Unknown(name_a, args_a), Expr::Unknown(name_b, args_b)) => {
                name_a == name_b && identical_args(args_a, args_b)
            },
            _ => false,
        }
    }

    /// Returns every leaf of the tree, from left to right.
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                Expr::Leaf(leaf) => leaves.push(leaf),
                Expr::Call(_, args) | Expr::Unknown(_, args) => stack.extend(args.iter().rev()),
            }
        }
        leaves
    }

    /// The number of nodes in the tree.
    pub fn complexity(&self) -> usize {
        1 + self.args().iter().map(Expr::complexity).sum::<usize>()
    }

    /// Replaces every occurrence of `variable` with `replacement`.
    pub fn substitute(&self, variable: &str, replacement: &Expr) -> Expr {
        match self {
            Expr::Leaf(Leaf::Variable(name)) if name == variable => replacement.clone(),
            Expr::Leaf(_) => self.clone(),
            Expr::Call(op, args) => Expr::Call(
                *op,
                args.iter().map(|arg| arg.substitute(variable, replacement)).collect(),
            ),
            Expr::Unknown(name, args) => Expr::Unknown(
                name.clone(),
                args.iter().map(|arg| arg.substitute(variable, replacement)).collect(),
            ),
        }
    }
}

fn identical_args(a: &[Expr], b: &[Expr]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.is_identical_to(b))
}

fn scalar_value(scalar: Scalar) -> f64 {
    match scalar {
        Scalar::Value(v) => v,
        Scalar::Pi => *PI,
        Scalar::E => *E,
    }
}

/// [`PartialEq`] is structural, see [`Expr::is_identical_to`].
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.is_identical_to(other)
    }
}

impl From<&Node> for Expr {
    fn from(node: &Node) -> Self {
        Expr::create_tree(node)
    }
}

impl From<Complex> for Expr {
    fn from(c: Complex) -> Self {
        Expr::number(c)
    }
}

impl FromStr for Expr {
    type Err = Error;

    /// Reads a tree from its canonical form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Expr::create_tree(&s.parse::<Node>()?))
    }
}

/// Writes the canonical form of the tree, such as `add(x,multiply([2,0],y))`.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let write_call = |f: &mut Formatter, name: &str, args: &[Expr]| {
            write!(f, "{}(", name)?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ")")
        };

        match self {
            Expr::Leaf(Leaf::Number(c)) => write!(f, "[{},{}]", c.re, c.im),
            Expr::Leaf(Leaf::Constant(constant)) => write!(f, "[{},0]", constant.name()),
            Expr::Leaf(Leaf::Variable(name)) => write!(f, "{}", name),
            Expr::Leaf(Leaf::Empty) => Ok(()),
            Expr::Call(op, args) => write_call(f, op.name(), args),
            Expr::Unknown(name, args) => write_call(f, name, args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcalc_parser::parse;
    use pretty_assertions::assert_eq;

    fn tree(input: &str) -> Expr {
        Expr::create_tree(&parse(input).unwrap())
    }

    #[test]
    fn canonical_round_trip() {
        for input in [
            "2+3*4",
            "2x^2 + sin(x)",
            "-x/(1+x)",
            "e^(2i) - pi",
            "fac(5)!",
            "max(1, 2, x)",
            "1.5e-3 * y",
            "foo(x)",
            "2+",
            "!",
            "sin()",
            "max(,)",
        ] {
            let expr = tree(input);
            let reparsed = expr.to_string().parse::<Expr>().unwrap();
            assert!(expr.is_identical_to(&reparsed), "{input}: {expr} vs {reparsed}");
        }
    }

    #[test]
    fn negative_zero_literals() {
        assert_eq!(Expr::number(Complex::new(-0.0, -0.0)).to_string(), "[0,0]");
        assert_eq!(Expr::number(-Complex::real(1.0)).to_string(), "[-1,0]");
        assert_eq!(tree("0*-1").to_string(), "multiply([0,0],subtract([0,0],[1,0]))");
    }

    #[test]
    fn constants_stay_symbolic() {
        assert_eq!(tree("pi"), Expr::Leaf(Leaf::Constant(Constant::Pi)));
        assert_eq!(tree("pi").to_string(), "[pi,0]");
    }

    #[test]
    fn unknown_function_is_kept() {
        let expr = tree("foo(x)");
        assert_eq!(expr.name(), "foo");
        assert_eq!(expr.args(), &[Expr::variable("x")]);
    }

    #[test]
    fn function_of() {
        let expr = tree("x^2 + 3x");
        assert!(expr.is_function_of("x", true));
        assert!(expr.is_function_of("x", false));
        assert!(!expr.is_function_of("y", false));

        let mixed = tree("x + y");
        assert!(!mixed.is_function_of("x", true));
        assert!(mixed.is_function_of("y", false));
    }

    #[test]
    fn probes() {
        assert!(tree("2+3").is_number());
        assert!(tree("2+3").is_evaluable());
        assert!(!tree("x+1").is_number());
        assert!(!tree("x+1").is_evaluable());
        assert!(!tree("fac(-1)").is_number());
        assert!(tree("fac(-1)").is_evaluable());
    }

    #[test]
    fn identical() {
        assert!(tree("x+1").is_identical_to(&tree("x+1")));
        assert!(!tree("x+1").is_identical_to(&tree("1+x")));
        assert!(Expr::number(Complex::NAN).is_identical_to(&Expr::number(Complex::NAN)));
    }

    #[test]
    fn counting() {
        let expr = tree("sin(x) + 2y");
        assert_eq!(expr.leaves().len(), 3);
        assert_eq!(expr.complexity(), 6);
    }

    #[test]
    fn substitution() {
        let expr = tree("x^2 + x").substitute("x", &tree("y+1"));
        assert_eq!(expr, tree("(y+1)^2 + (y+1)"));
    }
}
