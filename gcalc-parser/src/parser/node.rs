use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One component of a complex literal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scalar {
    /// A plain real value.
    Value(f64),

    /// The circle constant.
    Pi,

    /// Euler's number.
    E,
}

impl Scalar {
    /// Returns true if this is exactly the value zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Scalar::Value(v) if *v == 0.0)
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Scalar::Value(v) => write!(f, "{}", v),
            Scalar::Pi => write!(f, "pi"),
            Scalar::E => write!(f, "e"),
        }
    }
}

/// A complex literal, written `[re,im]` in canonical form.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The real part.
    pub re: Scalar,

    /// The imaginary part.
    pub im: Scalar,
}

impl LitNum {
    /// Creates a real literal.
    pub fn real(value: f64) -> Self {
        Self { re: Scalar::Value(value), im: Scalar::Value(0.0) }
    }
}

/// A call to a named function, written `name(arg1,arg2,...)` in canonical form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function.
    pub name: String,

    /// The arguments, in order.
    pub args: Vec<Node>,
}

/// The canonical tree produced by the parser.
///
/// Its [`Display`] implementation produces the canonical prefix-notation string, which
/// [`Node::from_str`](std::str::FromStr) reads back.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// A function call, such as `add(x,[2,0])`.
    Call(Call),

    /// A complex literal, such as `[2,0]`.
    Number(LitNum),

    /// A free variable, such as `x`, or a differential, such as `dx`.
    Symbol(String),

    /// A missing operand, such as the right-hand side of `2+`.
    Empty,
}

impl Node {
    /// Creates a function call node.
    pub fn call(name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Call(Call { name: name.into(), args })
    }

    /// The name of the operation this node represents. Leaves are `identity` nodes.
    pub fn name(&self) -> &str {
        match self {
            Node::Call(call) => &call.name,
            _ => "identity",
        }
    }

    /// The arguments of this node. Leaves have none.
    pub fn args(&self) -> &[Node] {
        match self {
            Node::Call(call) => &call.args,
            _ => &[],
        }
    }

    /// The number of calls on the longest path from this node down to a leaf.
    pub fn height(&self) -> usize {
        self.args().iter().map(|arg| arg.height() + 1).max().unwrap_or(0)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Node::Call(call) => {
                write!(f, "{}(", call.name)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            },
            Node::Number(num) => write!(f, "[{},{}]", num.re, num.im),
            Node::Symbol(name) => write!(f, "{}", name),
            Node::Empty => Ok(()),
        }
    }
}
