//! Parser for calculator input.
//!
//! Raw text such as `2x^2 + sin(x)` is normalized into classified lexemes, then rewritten by
//! operator precedence into a [`Node`] tree whose [`Display`](std::fmt::Display) form is the
//! canonical prefix notation `add(multiply([2,0],pow(x,[2,0])),sin(x))`. Canonical strings can
//! be read back with [`Node::from_str`](std::str::FromStr).

pub mod parser;
pub mod tokenizer;

pub use parser::{canonical::{parse_exp, ParsedExp}, node::{Call, LitNum, Node, Scalar}, parse};
