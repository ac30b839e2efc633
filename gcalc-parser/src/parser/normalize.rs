//! Lexical normalization of raw input.
//!
//! Whitespace is removed, every token is classified (literal, variable, function name,
//! punctuation or operator), parentheses are balanced, and redundant doubled parentheses are
//! collapsed. Spans always refer back to the raw input.

use gcalc_error::Error;
use std::ops::Range;
use super::error::{EmptyInput, InvalidCharacter, MismatchedParentheses, MultiCharVariable, UnexpectedToken};
use super::node::{LitNum, Scalar};
use crate::tokenizer::{tokenize_complete, Token, TokenKind};

/// The classification of a normalized lexeme.
#[derive(Debug, Clone, PartialEq)]
pub enum LexKind {
    /// A numeric literal or a named constant (`pi`, `e`, `i`, `inf`).
    Literal(LitNum),

    /// A single-letter variable or a differential such as `dx`.
    Variable(String),

    /// The name of a function; always followed by [`LexKind::OpenParen`].
    Function(String),

    OpenParen,
    CloseParen,
    Comma,

    /// One of `+ - * / ^ !`.
    Operator(TokenKind),
}

/// A normalized lexeme.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The kind of lexeme.
    pub kind: LexKind,

    /// The region of the raw input this lexeme came from. Parentheses inserted while balancing
    /// have an empty span at the start or end of the input.
    pub span: Range<usize>,

    /// The text of the lexeme, with whitespace removed.
    pub text: String,
}

impl Lexeme {
    fn new(kind: LexKind, span: Range<usize>, text: impl Into<String>) -> Self {
        Self { kind, span, text: text.into() }
    }

    /// Returns true if this lexeme can begin an operand, i.e. if juxtaposing it after another
    /// operand means multiplication.
    pub fn starts_operand(&self) -> bool {
        matches!(
            self.kind,
            LexKind::Literal(_) | LexKind::Variable(_) | LexKind::Function(_) | LexKind::OpenParen
        )
    }
}

/// The direction in which to scan for a matching parenthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Returns the index of the parenthesis matching the one at `idx`, scanning in the given
/// direction.
pub fn match_paren(lexemes: &[Lexeme], idx: usize, direction: Direction) -> Result<usize, Error> {
    let mismatched = || Error::new(
        lexemes.get(idx).map(|lexeme| vec![lexeme.span.clone()]).unwrap_or_default(),
        MismatchedParentheses,
    );
    let (open, close) = match direction {
        Direction::Forward => (LexKind::OpenParen, LexKind::CloseParen),
        Direction::Backward => (LexKind::CloseParen, LexKind::OpenParen),
    };

    let mut depth = 0usize;
    let mut i = idx;
    loop {
        let lexeme = lexemes.get(i).ok_or_else(mismatched)?;
        if lexeme.kind == open {
            depth += 1;
        } else if lexeme.kind == close {
            depth = depth.checked_sub(1).ok_or_else(mismatched)?;
            if depth == 0 {
                return Ok(i);
            }
        }

        if depth == 0 {
            // the starting lexeme is not a parenthesis of the expected kind
            return Err(mismatched());
        }

        i = match direction {
            Direction::Forward => i + 1,
            Direction::Backward => i.checked_sub(1).ok_or_else(mismatched)?,
        };
    }
}

/// Removes whitespace from the input, returning the stripped text and, for each byte of it, the
/// offset of that byte in the raw input. The offset table has one extra trailing entry equal to
/// the length of the raw input.
fn strip_whitespace(raw: &str) -> (String, Vec<usize>) {
    let mut stripped = String::with_capacity(raw.len());
    let mut offsets = Vec::with_capacity(raw.len() + 1);
    for (idx, c) in raw.char_indices().filter(|(_, c)| !c.is_whitespace()) {
        stripped.push(c);
        offsets.extend((0..c.len_utf8()).map(|k| idx + k));
    }
    offsets.push(raw.len());
    (stripped, offsets)
}

/// Returns true if the name has the shape of a differential, one or more `d`s followed by a
/// single letter.
fn is_differential(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2
        && bytes[..bytes.len() - 1].iter().all(|&b| b == b'd')
        && bytes[bytes.len() - 1].is_ascii_lowercase()
}

/// Returns the literal a constant name stands for.
fn constant(name: &str) -> Option<LitNum> {
    match name {
        "pi" => Some(LitNum { re: Scalar::Pi, im: Scalar::Value(0.0) }),
        "e" => Some(LitNum { re: Scalar::E, im: Scalar::Value(0.0) }),
        "i" => Some(LitNum { re: Scalar::Value(0.0), im: Scalar::Value(1.0) }),
        "inf" | "infinity" => Some(LitNum::real(f64::INFINITY)),
        _ => None,
    }
}

/// Parses the text of a decimal literal.
fn parse_number(mantissa: &str, exponent: Option<&str>, span: &Range<usize>) -> Result<f64, Error> {
    let mut text = String::new();
    if mantissa.starts_with('.') {
        text.push('0');
    }
    text.push_str(mantissa);
    if mantissa.ends_with('.') {
        text.push('0');
    }
    if let Some(exponent) = exponent {
        text.push('e');
        text.push_str(exponent);
    }

    text.parse::<f64>().map_err(|_| Error::new(
        vec![span.clone()],
        UnexpectedToken { lexeme: mantissa.to_string() },
    ))
}

/// If the tokens starting at `i` form the tail of a scientific literal (`e`, a sign, and up to
/// three digits), returns the signed exponent text.
fn scientific_exponent<'a>(tokens: &[Token<'a>], i: usize) -> Option<String> {
    match tokens.get(i..i + 3)? {
        [e, sign, digits]
            if e.kind == TokenKind::Name
                && e.lexeme == "e"
                && matches!(sign.kind, TokenKind::Add | TokenKind::Sub)
                && digits.kind == TokenKind::Number
                && (1..=3).contains(&digits.lexeme.len())
                && digits.lexeme.bytes().all(|b| b.is_ascii_digit()) =>
            Some(format!("{}{}", sign.lexeme, digits.lexeme)),
        _ => None,
    }
}

/// Classifies the tokens of the stripped input.
fn classify(tokens: &[Token], raw_span: impl Fn(&Range<usize>) -> Range<usize>) -> Result<Vec<Lexeme>, Error> {
    let mut lexemes = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        let span = raw_span(&token.span);
        let kind = match token.kind {
            TokenKind::Symbol => return Err(Error::new(
                vec![span],
                InvalidCharacter { character: token.lexeme.to_string() },
            )),
            TokenKind::Number => {
                if let Some(exponent) = scientific_exponent(tokens, i + 1) {
                    let end = raw_span(&tokens[i + 3].span).end;
                    let value = parse_number(token.lexeme, Some(&exponent), &span)?;
                    let text = format!("{}e{}", token.lexeme, exponent);
                    lexemes.push(Lexeme::new(LexKind::Literal(LitNum::real(value)), span.start..end, text));
                    i += 4;
                    continue;
                }
                LexKind::Literal(LitNum::real(parse_number(token.lexeme, None, &span)?))
            },
            TokenKind::Name => {
                let name = token.lexeme;
                let before_paren = tokens.get(i + 1).map(|t| t.kind) == Some(TokenKind::OpenParen);
                if let Some(literal) = constant(name) {
                    LexKind::Literal(literal)
                } else if name.len() == 1 || is_differential(name) {
                    LexKind::Variable(name.to_string())
                } else if before_paren {
                    LexKind::Function(name.to_string())
                } else {
                    return Err(Error::new(vec![span], MultiCharVariable { name: name.to_string() }));
                }
            },
            TokenKind::OpenParen => LexKind::OpenParen,
            TokenKind::CloseParen => LexKind::CloseParen,
            TokenKind::Comma => LexKind::Comma,
            kind => LexKind::Operator(kind),
        };
        lexemes.push(Lexeme::new(kind, span, token.lexeme));
        i += 1;
    }

    Ok(lexemes)
}

/// Adds opening parentheses at the start and closing parentheses at the end until every
/// parenthesis has a partner.
fn balance(lexemes: &mut Vec<Lexeme>, input_len: usize) {
    let mut depth = 0isize;
    let mut missing_open = 0usize;
    for lexeme in lexemes.iter() {
        match lexeme.kind {
            LexKind::OpenParen => depth += 1,
            LexKind::CloseParen if depth == 0 => missing_open += 1,
            LexKind::CloseParen => depth -= 1,
            _ => {},
        }
    }

    if missing_open > 0 {
        let prefix = (0..missing_open).map(|_| Lexeme::new(LexKind::OpenParen, 0..0, "("));
        lexemes.splice(0..0, prefix);
    }
    for _ in 0..depth {
        lexemes.push(Lexeme::new(LexKind::CloseParen, input_len..input_len, ")"));
    }
}

/// Collapses `((...))` into `(...)` wherever the inner pair spans exactly the same operand as the
/// outer pair.
fn collapse_doubled(lexemes: &mut Vec<Lexeme>) -> Result<(), Error> {
    let mut i = 0;
    while i + 1 < lexemes.len() {
        if lexemes[i].kind == LexKind::OpenParen && lexemes[i + 1].kind == LexKind::OpenParen {
            let outer = match_paren(lexemes, i, Direction::Forward)?;
            let inner = match_paren(lexemes, i + 1, Direction::Forward)?;
            if inner + 1 == outer {
                lexemes.remove(outer);
                lexemes.remove(i);
                continue;
            }
        }
        i += 1;
    }
    Ok(())
}

/// Normalizes the raw input into a balanced sequence of classified lexemes.
pub fn normalize(raw: &str) -> Result<Vec<Lexeme>, Error> {
    let (stripped, offsets) = strip_whitespace(raw);
    if stripped.is_empty() {
        return Err(Error::spanless(EmptyInput));
    }

    let tokens = tokenize_complete(&stripped);
    let raw_span = |span: &Range<usize>| {
        let start = offsets[span.start];
        let end = span.end.checked_sub(1).map_or(start, |last| offsets[last] + 1);
        start..end
    };

    let mut lexemes = classify(&tokens, raw_span)?;
    balance(&mut lexemes, raw.len());
    collapse_doubled(&mut lexemes)?;
    Ok(lexemes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcalc_error::Category;
    use pretty_assertions::assert_eq;

    fn texts(input: &str) -> Vec<String> {
        normalize(input).unwrap().into_iter().map(|lexeme| lexeme.text).collect()
    }

    #[test]
    fn strips_whitespace_and_maps_spans() {
        let lexemes = normalize(" 2 +  xy").unwrap_err();
        assert_eq!(lexemes.spans, vec![6..8]);

        let lexemes = normalize("2 + x").unwrap();
        assert_eq!(lexemes[2].span, 4..5);
    }

    #[test]
    fn empty_input() {
        let err = normalize("   ").unwrap_err();
        assert_eq!(err.message(), "Enter something...");
        assert_eq!(err.category(), Category::Syntax);
    }

    #[test]
    fn invalid_character() {
        let err = normalize("2 $ 3").unwrap_err();
        assert_eq!(err.message(), "Invalid character: $");
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn multi_letter_variable() {
        let err = normalize("ab+1").unwrap_err();
        assert_eq!(err.message(), "Variable: ab must be a single character.");
    }

    #[test]
    fn classification() {
        let kinds = normalize("sin(x)+pi*dx").unwrap()
            .into_iter()
            .map(|lexeme| lexeme.kind)
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec![
            LexKind::Function("sin".to_string()),
            LexKind::OpenParen,
            LexKind::Variable("x".to_string()),
            LexKind::CloseParen,
            LexKind::Operator(TokenKind::Add),
            LexKind::Literal(LitNum { re: Scalar::Pi, im: Scalar::Value(0.0) }),
            LexKind::Operator(TokenKind::Mul),
            LexKind::Variable("dx".to_string()),
        ]);
    }

    #[test]
    fn scientific_literal() {
        let lexemes = normalize("1.5e+3").unwrap();
        assert_eq!(lexemes.len(), 1);
        assert_eq!(lexemes[0].kind, LexKind::Literal(LitNum::real(1500.0)));
        assert_eq!(lexemes[0].span, 0..6);
    }

    #[test]
    fn auto_balance() {
        assert_eq!(texts("(2+3"), vec!["(", "2", "+", "3", ")"]);
        assert_eq!(texts("2+3)"), vec!["(", "2", "+", "3", ")"]);
    }

    #[test]
    fn collapse_doubled_parens() {
        assert_eq!(texts("((x))"), vec!["(", "x", ")"]);
        assert_eq!(texts("sin((x))"), vec!["sin", "(", "x", ")"]);
        assert_eq!(texts("((x)+(y))"), vec!["(", "(", "x", ")", "+", "(", "y", ")", ")"]);
    }

    #[test]
    fn match_paren_both_ways() {
        let lexemes = normalize("(a(b)c)").unwrap();
        assert_eq!(match_paren(&lexemes, 0, Direction::Forward).unwrap(), 6);
        assert_eq!(match_paren(&lexemes, 6, Direction::Backward).unwrap(), 0);
        assert_eq!(match_paren(&lexemes, 2, Direction::Forward).unwrap(), 4);
        let err = match_paren(&lexemes, 1, Direction::Forward).unwrap_err();
        assert_eq!(err.message(), "Mismatched parentheses.");
    }
}
