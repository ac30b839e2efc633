//! Structural parsing of canonical prefix-notation strings.

use gcalc_error::Error;
use std::str::FromStr;
use super::error::{MismatchedParentheses, UnexpectedToken};
use super::node::{LitNum, Node, Scalar};

/// A canonical string split into its top-level operation name and argument strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExp {
    /// The name of the operation, or `identity` for a leaf.
    pub name: String,

    /// The raw argument strings. A leaf has exactly one argument, its own text.
    pub args: Vec<String>,
}

fn mismatched(input: &str) -> Error {
    Error::new(vec![0..input.len()], MismatchedParentheses)
}

/// Splits a canonical string `name(arg1,arg2,...)` into its name and top-level arguments,
/// tracking `(`/`[` nesting. A string with no `(` is an `identity` leaf.
pub fn parse_exp(input: &str) -> Result<ParsedExp, Error> {
    let Some(open) = input.find('(') else {
        return Ok(ParsedExp { name: "identity".to_string(), args: vec![input.to_string()] });
    };

    if !input.ends_with(')') {
        return Err(mismatched(input));
    }

    let name = input[..open].to_string();
    let inner = &input[open + 1..input.len() - 1];
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, c) in inner.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.checked_sub(1).ok_or_else(|| mismatched(input))?,
            ',' if depth == 0 => {
                args.push(inner[start..idx].to_string());
                start = idx + 1;
            },
            _ => {},
        }
    }
    if depth != 0 {
        return Err(mismatched(input));
    }
    args.push(inner[start..].to_string());

    Ok(ParsedExp { name, args })
}

/// Parses one component of a bracketed literal.
fn parse_scalar(text: &str) -> Result<Scalar, Error> {
    match text {
        "pi" => Ok(Scalar::Pi),
        "e" => Ok(Scalar::E),
        _ => text.parse::<f64>()
            .map(Scalar::Value)
            .map_err(|_| Error::new(vec![0..text.len()], UnexpectedToken { lexeme: text.to_string() })),
    }
}

/// Parses a bracketed literal pair `[re,im]`.
fn parse_literal(text: &str) -> Result<LitNum, Error> {
    let inner = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| mismatched(text))?;
    let (re, im) = inner
        .split_once(',')
        .ok_or_else(|| Error::new(vec![0..text.len()], UnexpectedToken { lexeme: text.to_string() }))?;
    Ok(LitNum { re: parse_scalar(re)?, im: parse_scalar(im)? })
}

impl FromStr for Node {
    type Err = Error;

    /// Reads a canonical string, as produced by the [`Display`](std::fmt::Display)
    /// implementation of [`Node`], back into a tree.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = parse_exp(s)?;
        if parsed.name != "identity" {
            let args = parsed.args
                .iter()
                .map(|arg| arg.parse())
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Node::call(parsed.name, args));
        }

        let leaf = parsed.args.first().map(String::as_str).unwrap_or_default();
        if leaf.is_empty() {
            Ok(Node::Empty)
        } else if leaf.starts_with('[') {
            Ok(Node::Number(parse_literal(leaf)?))
        } else {
            Ok(Node::Symbol(leaf.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_top_level() {
        let parsed = parse_exp("add(x,multiply([2,0],y))").unwrap();
        assert_eq!(parsed, ParsedExp {
            name: "add".to_string(),
            args: vec!["x".to_string(), "multiply([2,0],y)".to_string()],
        });
    }

    #[test]
    fn identity_leaf() {
        let parsed = parse_exp("[1.5,-2]").unwrap();
        assert_eq!(parsed.name, "identity");
        assert_eq!(parsed.args, vec!["[1.5,-2]".to_string()]);
        assert_eq!("[1.5,-2]".parse::<Node>().unwrap(), Node::Number(LitNum {
            re: Scalar::Value(1.5),
            im: Scalar::Value(-2.0),
        }));
    }

    #[test]
    fn empty_argument() {
        assert_eq!(parse_exp("sin()").unwrap().args, vec![String::new()]);
        assert_eq!("fac()".parse::<Node>().unwrap(), Node::call("fac", vec![Node::Empty]));
    }

    #[test]
    fn lone_operators_round_trip() {
        for input in ["!", "sin()", "2+", "-", "max(,)"] {
            let node = parse(input).unwrap();
            assert_eq!(node.to_string().parse::<Node>().unwrap(), node, "{}", input);
        }
        assert_eq!(parse("!").unwrap().to_string(), "fac()");
    }

    #[test]
    fn mismatched() {
        assert_eq!(parse_exp("add(x,y").unwrap_err().message(), "Mismatched parentheses.");
        assert_eq!(parse_exp("add(x,y))").unwrap_err().message(), "Mismatched parentheses.");
    }

    #[test]
    fn round_trip() {
        for input in [
            "2+3*4",
            "sin(x)^2+cos(x)^2",
            "e^(-x^2/2)",
            "3!-pi*i",
            "(x+1)(x-1)/2x",
            "max(1,2,)",
            "diff(x^3,x)",
            "1.5e-3dx",
            "inf-infinity",
        ] {
            let node = parse(input).unwrap();
            let reparsed = node.to_string().parse::<Node>().unwrap();
            assert_eq!(reparsed, node, "round trip of {input}");
        }
    }
}
