pub mod canonical;
pub mod error;
pub mod node;
pub mod normalize;

use error::{TooDeep, UnexpectedToken};
use gcalc_error::{Error, ErrorKind};
use node::{Node, Scalar};
use normalize::{normalize, LexKind, Lexeme};
use std::ops::Range;
use crate::tokenizer::TokenKind;

/// The maximum nesting depth of parentheses, function calls and prefix operators.
pub const MAX_DEPTH: usize = 128;

/// Turns a normalized lexeme stream into a canonical [`Node`] tree.
///
/// Operators are rewritten into function calls with the following precedence, from loosest to
/// tightest:
///
/// | Operator            | Function      | Associativity |
/// | ------------------- | ------------- | ------------- |
/// | `+`                 | `add`         | n-ary         |
/// | `-` (binary)        | `subtract`    | left          |
/// | `*`, juxtaposition  | `multiply`    | n-ary         |
/// | `/`                 | `divide`      | left          |
/// | `-` (prefix)        | `subtract(0,…)` | right       |
/// | `^`                 | `pow`         | right         |
/// | `!` (postfix)       | `fac`         | left          |
///
/// `e^x` becomes `exp(x)`. A missing operand is kept as [`Node::Empty`].
#[derive(Debug, Clone)]
pub struct Parser {
    /// The lexemes that this parser is currently parsing.
    lexemes: Vec<Lexeme>,

    /// The index of the **next** lexeme to be parsed.
    cursor: usize,

    /// Current recursion depth.
    depth: usize,

    /// Length of the raw input, used for end-of-input spans.
    input_len: usize,
}

impl Parser {
    /// Creates a new parser for the given raw input, normalizing it first.
    pub fn new(source: &str) -> Result<Self, Error> {
        Ok(Self {
            lexemes: normalize(source)?,
            cursor: 0,
            depth: 0,
            input_len: source.len(),
        })
    }

    /// Creates an error that points at the current lexeme, or the end of the input if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns the span of the current lexeme, or the end of the input.
    pub fn span(&self) -> Range<usize> {
        self.lexemes
            .get(self.cursor)
            .map_or(self.input_len..self.input_len, |lexeme| lexeme.span.clone())
    }

    /// Returns the current lexeme without advancing.
    pub fn current(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.cursor)
    }

    /// Returns true if the current lexeme is the given operator.
    fn at_operator(&self, op: TokenKind) -> bool {
        matches!(self.current(), Some(Lexeme { kind: LexKind::Operator(kind), .. }) if *kind == op)
    }

    /// Returns true if the current lexeme has the given kind.
    fn at(&self, kind: &LexKind) -> bool {
        self.current().map(|lexeme| &lexeme.kind) == Some(kind)
    }

    /// Advances past the current lexeme, returning it.
    fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.lexemes.get(self.cursor).cloned();
        if lexeme.is_some() {
            self.cursor += 1;
        }
        lexeme
    }

    /// Runs `f` one recursion level deeper, failing if the nesting limit is exceeded.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, Error>) -> Result<T, Error> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(TooDeep));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Folds `lhs op rhs op rhs ...` into left-nested calls to `name`, parsing each right-hand
    /// side with `operand`. The chain fails once the tree it builds is deeper than the
    /// remaining nesting allowance.
    fn left_chain(
        &mut self,
        mut lhs: Node,
        op: TokenKind,
        name: &str,
        operand: fn(&mut Self) -> Result<Node, Error>,
    ) -> Result<Node, Error> {
        if !self.at_operator(op) {
            return Ok(lhs);
        }

        let mut height = lhs.height();
        while self.at_operator(op) {
            if self.depth + height >= MAX_DEPTH {
                return Err(self.error(TooDeep));
            }
            self.advance();
            let rhs = operand(self)?;
            height = height.max(rhs.height()) + 1;
            lhs = Node::call(name, vec![lhs, rhs]);
        }
        Ok(lhs)
    }

    /// Parses the whole input. Anything left over after a complete expression is an error.
    pub fn parse_full(&mut self) -> Result<Node, Error> {
        let node = self.parse_sum()?;
        match self.current() {
            Some(lexeme) => Err(self.error(UnexpectedToken { lexeme: lexeme.text.clone() })),
            None => Ok(node),
        }
    }

    /// `sum := difference ('+' difference)*`
    fn parse_sum(&mut self) -> Result<Node, Error> {
        let first = self.parse_difference()?;
        if !self.at_operator(TokenKind::Add) {
            return Ok(first);
        }

        let mut terms = vec![first];
        while self.at_operator(TokenKind::Add) {
            self.advance();
            terms.push(self.parse_difference()?);
        }
        Ok(Node::call("add", terms))
    }

    /// `difference := signed ('-' product)*`
    fn parse_difference(&mut self) -> Result<Node, Error> {
        let lhs = self.parse_signed()?;
        self.left_chain(lhs, TokenKind::Sub, "subtract", Self::parse_product)
    }

    /// `signed := '-' product | product`
    ///
    /// A leading minus negates the whole first product, so `-2x` is `subtract(0, 2x)`.
    fn parse_signed(&mut self) -> Result<Node, Error> {
        if self.at_operator(TokenKind::Sub) {
            self.advance();
            let operand = self.nested(Self::parse_product)?;
            return Ok(negate(operand));
        }
        self.parse_product()
    }

    /// `product := quotient (('*' | juxtaposition) quotient)*`
    fn parse_product(&mut self) -> Result<Node, Error> {
        let first = self.parse_quotient()?;
        let mut factors = vec![first];
        loop {
            if self.at_operator(TokenKind::Mul) {
                self.advance();
            } else if !self.current().is_some_and(Lexeme::starts_operand) {
                break;
            }
            factors.push(self.parse_quotient()?);
        }

        if factors.len() == 1 {
            Ok(factors.remove(0))
        } else {
            Ok(Node::call("multiply", factors))
        }
    }

    /// `quotient := unary ('/' unary)*`
    fn parse_quotient(&mut self) -> Result<Node, Error> {
        let lhs = self.parse_unary()?;
        self.left_chain(lhs, TokenKind::Div, "divide", Self::parse_unary)
    }

    /// `unary := '-' unary | power`
    fn parse_unary(&mut self) -> Result<Node, Error> {
        if self.at_operator(TokenKind::Sub) {
            self.advance();
            let operand = self.nested(Self::parse_unary)?;
            return Ok(negate(operand));
        }
        self.parse_power()
    }

    /// `power := postfix ('^' unary)?`
    fn parse_power(&mut self) -> Result<Node, Error> {
        let base = self.parse_postfix()?;
        if !self.at_operator(TokenKind::Exp) {
            return Ok(base);
        }

        self.advance();
        let exponent = self.nested(Self::parse_unary)?;
        match base {
            Node::Number(num) if num.re == Scalar::E && num.im.is_zero() => {
                Ok(Node::call("exp", vec![exponent]))
            },
            base => Ok(Node::call("pow", vec![base, exponent])),
        }
    }

    /// `postfix := primary '!'*`
    fn parse_postfix(&mut self) -> Result<Node, Error> {
        let mut operand = self.parse_primary()?;
        if !self.at_operator(TokenKind::Factorial) {
            return Ok(operand);
        }

        let mut height = operand.height();
        while self.at_operator(TokenKind::Factorial) {
            if self.depth + height >= MAX_DEPTH {
                return Err(self.error(TooDeep));
            }
            height += 1;
            self.advance();
            operand = Node::call("fac", vec![operand]);
        }
        Ok(operand)
    }

    /// `primary := literal | variable | function '(' args ')' | '(' sum ')' | ε`
    fn parse_primary(&mut self) -> Result<Node, Error> {
        let Some(lexeme) = self.current().cloned() else {
            return Ok(Node::Empty);
        };

        match lexeme.kind {
            LexKind::Literal(num) => {
                self.advance();
                Ok(Node::Number(num))
            },
            LexKind::Variable(name) => {
                self.advance();
                Ok(Node::Symbol(name))
            },
            LexKind::Function(name) => {
                self.advance();
                let args = self.nested(Self::parse_args)?;
                Ok(Node::call(name, args))
            },
            LexKind::OpenParen => {
                self.advance();
                let inner = self.nested(Self::parse_sum)?;
                self.expect_close()?;
                Ok(inner)
            },
            LexKind::CloseParen | LexKind::Comma | LexKind::Operator(_) => Ok(Node::Empty),
        }
    }

    /// Parses a parenthesized, comma-separated argument list. `f()` has one empty argument.
    fn parse_args(&mut self) -> Result<Vec<Node>, Error> {
        if !self.at(&LexKind::OpenParen) {
            let text = self.current().map(|lexeme| lexeme.text.clone()).unwrap_or_default();
            return Err(self.error(UnexpectedToken { lexeme: text }));
        }
        self.advance();

        let mut args = vec![self.parse_sum()?];
        while self.at(&LexKind::Comma) {
            self.advance();
            args.push(self.parse_sum()?);
        }
        self.expect_close()?;
        Ok(args)
    }

    /// Consumes a closing parenthesis.
    fn expect_close(&mut self) -> Result<(), Error> {
        match self.current() {
            Some(Lexeme { kind: LexKind::CloseParen, .. }) => {
                self.advance();
                Ok(())
            },
            Some(lexeme) => Err(self.error(UnexpectedToken { lexeme: lexeme.text.clone() })),
            None => Err(self.error(error::MismatchedParentheses)),
        }
    }
}

/// `-x` is written `subtract(0, x)`.
fn negate(operand: Node) -> Node {
    Node::call("subtract", vec![Node::Number(node::LitNum::real(0.0)), operand])
}

/// Parses raw calculator input into its canonical tree.
pub fn parse(input: &str) -> Result<Node, Error> {
    Parser::new(input)?.parse_full()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Parses the input and returns its canonical string.
    fn canonical(input: &str) -> String {
        parse(input).unwrap().to_string()
    }

    #[test]
    fn literal() {
        assert_eq!(canonical("16"), "[16,0]");
        assert_eq!(canonical("3.25"), "[3.25,0]");
        assert_eq!(canonical("i"), "[0,1]");
        assert_eq!(canonical("pi"), "[pi,0]");
    }

    #[test]
    fn precedence() {
        assert_eq!(canonical("2+3*4"), "add([2,0],multiply([3,0],[4,0]))");
        assert_eq!(canonical("a-b+c"), "add(subtract(a,b),c)");
        assert_eq!(canonical("a+b-c"), "add(a,subtract(b,c))");
        assert_eq!(canonical("a-b-c"), "subtract(subtract(a,b),c)");
        assert_eq!(canonical("a/b*c"), "multiply(divide(a,b),c)");
        assert_eq!(canonical("a/b/c"), "divide(divide(a,b),c)");
    }

    #[test]
    fn n_ary_flattening() {
        assert_eq!(canonical("a+b+c"), "add(a,b,c)");
        assert_eq!(canonical("a*b*c"), "multiply(a,b,c)");
    }

    #[test]
    fn power_right_associative() {
        assert_eq!(canonical("a^b^c"), "pow(a,pow(b,c))");
        assert_eq!(canonical("2x^2"), "multiply([2,0],pow(x,[2,0]))");
    }

    #[test]
    fn euler_power_is_exp() {
        assert_eq!(canonical("e^(2x)"), "exp(multiply([2,0],x))");
        assert_eq!(canonical("e^x"), "exp(x)");
    }

    #[test]
    fn unary_minus() {
        assert_eq!(canonical("-x^2"), "subtract([0,0],pow(x,[2,0]))");
        assert_eq!(canonical("2*-3"), "multiply([2,0],subtract([0,0],[3,0]))");
        assert_eq!(canonical("2^-1"), "pow([2,0],subtract([0,0],[1,0]))");
        assert_eq!(canonical("-2x"), "subtract([0,0],multiply([2,0],x))");
    }

    #[test]
    fn factorial() {
        assert_eq!(canonical("3!"), "fac([3,0])");
        assert_eq!(canonical("3!!"), "fac(fac([3,0]))");
        assert_eq!(canonical("x!^2"), "pow(fac(x),[2,0])");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(canonical("2x"), "multiply([2,0],x)");
        assert_eq!(canonical("(x+1)(x-1)"), "multiply(add(x,[1,0]),subtract(x,[1,0]))");
        assert_eq!(canonical("2sin(x)"), "multiply([2,0],sin(x))");
        assert_eq!(canonical("x(2)"), "multiply(x,[2,0])");
        assert_eq!(canonical("2pi"), "multiply([2,0],[pi,0])");
    }

    #[test]
    fn function_calls() {
        assert_eq!(canonical("max(1,2,3)"), "max([1,0],[2,0],[3,0])");
        assert_eq!(canonical("sin()"), "sin()");
        assert_eq!(canonical("diff(x^2,x)"), "diff(pow(x,[2,0]),x)");
    }

    #[test]
    fn empty_operands() {
        assert_eq!(parse("2+").unwrap(), Node::call("add", vec![Node::Number(node::LitNum::real(2.0)), Node::Empty]));
        assert_eq!(canonical("*3"), "multiply(,[3,0])");
        assert_eq!(canonical("sin(,x)"), "sin(,x)");
    }

    #[test]
    fn auto_balanced() {
        assert_eq!(canonical("(2+3"), "add([2,0],[3,0])");
        assert_eq!(canonical("sin(x"), "sin(x)");
    }

    #[test]
    fn stray_comma() {
        let err = parse("1,2").unwrap_err();
        assert_eq!(err.message(), "Unexpected token: ,");
        assert_eq!(err.spans, vec![1..2]);
    }

    #[test]
    fn too_deep() {
        let input = "-".repeat(MAX_DEPTH + 10) + "1";
        let err = parse(&input).unwrap_err();
        assert_eq!(err.message(), "Expression is nested too deeply.");
    }

    #[test]
    fn long_left_chains_too_deep() {
        for input in [
            format!("1{}", "-1".repeat(5_000)),
            format!("1{}", "/1".repeat(5_000)),
            format!("1{}", "!".repeat(5_000)),
            format!("x{}", "-x/x".repeat(5_000)),
        ] {
            let err = parse(&input).unwrap_err();
            assert_eq!(err.message(), "Expression is nested too deeply.");
        }

        let input = format!("1{}", "-1".repeat(MAX_DEPTH / 2));
        assert_eq!(parse(&input).unwrap().height(), MAX_DEPTH / 2);
    }

    #[test]
    fn chains_count_towards_nesting() {
        let input = format!("{}1{}", "-".repeat(MAX_DEPTH - 10), "/1".repeat(20));
        let err = parse(&input).unwrap_err();
        assert_eq!(err.message(), "Expression is nested too deeply.");
    }
}
