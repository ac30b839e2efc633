//! The state of one interactive session, and the commands that change it.

use crate::error::{Error, MalformedLet, NonnumericBinding, UnknownCommand};
use gcalc_compute::{
    complex::Complex,
    mode::{EvalMode, TrigMode},
    symbolic::{derivative, differentiate, simplify::step::Step, simplify_with, simplify_with_steps, SimplifyOptions},
    tree::{fmt::{display, display_complex}, Binding, Expr, Value},
};
use gcalc_parser::{parse, Node};

/// The number of significant digits printed for results.
pub const PRECISION: i32 = 12;

const HELP: &str = "\
<expression>        evaluate with the current mode and binding
:let x = <expr>     bind the variable x to a value
:d <expr>           differentiate with respect to the bound variable, or x
:dd <expr>          differential form, where each variable v becomes dv
:s <expr>           simplify, listing the rules applied
:tree <expr>        print the canonical form
:deg / :rad         measure angles in degrees or radians
:real / :complex    reject or allow nonreal results
:factor             toggle factoring while simplifying
:help               show this message
:quit               leave";

/// The result of one line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Nothing to print.
    Nothing,

    /// A numeric result.
    Number(Complex),

    /// An expression that still contains free variables.
    Expr(Expr),

    /// A simplified expression with the rules that produced it.
    Simplified { result: Expr, steps: Vec<Step> },

    /// A message.
    Text(String),

    /// The session should end.
    Quit,
}

impl Output {
    /// Renders the output as text, or [`None`] if there is nothing to print.
    pub fn render(&self) -> Option<String> {
        match self {
            Output::Nothing | Output::Quit => None,
            Output::Number(c) => Some(display_complex(*c, PRECISION)),
            Output::Expr(expr) => Some(display(expr, PRECISION)),
            Output::Simplified { result, steps } => {
                let mut text = display(result, PRECISION);
                for step in steps {
                    text.push_str(&format!("\n  {:?}", step));
                }
                Some(text)
            },
            Output::Text(text) => Some(text.clone()),
        }
    }
}

/// Parses `input` into a tree.
fn tree(input: &str) -> Result<Expr, Error> {
    parse(input)
        .map(|node| Expr::create_tree(&node))
        .map_err(|err| Error::new(err, input))
}

/// Settings and the variable binding shared by every line of a session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The evaluation mode.
    pub mode: EvalMode,

    /// The simplifier options.
    pub options: SimplifyOptions,

    /// The bound variable, if any.
    pub binding: Option<Binding>,
}

impl Session {
    /// The variable that `:d` differentiates with respect to.
    fn variable(&self) -> &str {
        self.binding.as_ref().map_or("x", |binding| binding.variable.as_str())
    }

    /// Evaluates `input` under the session's mode and binding.
    fn evaluate(&self, input: &str) -> Result<Value, Error> {
        let expr = tree(input)?;
        expr.evaluate(self.binding.as_ref(), self.mode)
            .map_err(|err| Error::new(err.with_spans(vec![0..input.len()]), input))
    }

    /// `:let x = <expr>`
    fn bind(&mut self, arguments: &str) -> Result<Output, Error> {
        let malformed = || Error::new(gcalc_error::Error::spanless(MalformedLet), arguments);
        let (name, value) = arguments.split_once('=').ok_or_else(malformed)?;
        let name = match parse(name.trim()) {
            Ok(Node::Symbol(name)) => name,
            Ok(_) => return Err(malformed()),
            Err(err) => return Err(Error::new(err, name.trim())),
        };

        let value = value.trim();
        match self.evaluate(value)? {
            Value::Number(c) => {
                self.binding = Some(Binding::new(name.as_str(), c));
                Ok(Output::Text(format!("{} = {}", name, display_complex(c, PRECISION))))
            },
            Value::Expr(_) => Err(Error::new(
                gcalc_error::Error::new(vec![0..value.len()], NonnumericBinding { name }),
                value,
            )),
        }
    }

    /// Runs one command, named without its leading `:`.
    fn command(&mut self, line: &str, name: &str, arguments: &str) -> Result<Output, Error> {
        let text = |message: &str| Ok(Output::Text(message.to_string()));
        match name {
            "deg" => {
                self.mode.trig_mode = TrigMode::Degrees;
                text("angles in degrees")
            },
            "rad" => {
                self.mode.trig_mode = TrigMode::Radians;
                text("angles in radians")
            },
            "real" => {
                self.mode.complex_mode = false;
                text("nonreal results are errors")
            },
            "complex" => {
                self.mode.complex_mode = true;
                text("nonreal results allowed")
            },
            "factor" => {
                self.options.factor = !self.options.factor;
                text(if self.options.factor { "factoring on" } else { "factoring off" })
            },
            "let" => self.bind(arguments),
            "d" => {
                let expr = tree(arguments)?;
                let result = derivative(&expr, self.variable(), false)
                    .map_err(|err| Error::new(err, arguments))?;
                Ok(Output::Expr(simplify_with(&result, self.options)))
            },
            "dd" => {
                let expr = tree(arguments)?;
                let result = differentiate(&expr).map_err(|err| Error::new(err, arguments))?;
                Ok(Output::Expr(simplify_with(&result, self.options)))
            },
            "s" => {
                let (result, steps) = simplify_with_steps(&tree(arguments)?, self.options);
                Ok(Output::Simplified { result, steps })
            },
            "tree" => {
                let node = parse(arguments).map_err(|err| Error::new(err, arguments))?;
                Ok(Output::Text(node.to_string()))
            },
            "help" => text(HELP),
            "quit" | "q" => Ok(Output::Quit),
            _ => Err(Error::new(
                gcalc_error::Error::new(vec![0..name.len() + 1], UnknownCommand { name: name.to_string() }),
                line,
            )),
        }
    }

    /// Runs one line of input.
    pub fn execute(&mut self, line: &str) -> Result<Output, Error> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Output::Nothing);
        }

        match line.strip_prefix(':') {
            Some(command) => {
                let (name, arguments) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
                self.command(line, name, arguments.trim())
            },
            None => Ok(match self.evaluate(line)? {
                Value::Number(c) => Output::Number(c),
                Value::Expr(expr) => Output::Expr(expr),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use gcalc_compute::error::NonrealResult;
    use pretty_assertions::assert_eq;

    fn number(output: Output) -> Complex {
        match output {
            Output::Number(c) => c,
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[test]
    fn evaluates_lines() {
        let mut session = Session::default();
        assert_eq!(session.execute("2+3*4").unwrap(), Output::Number(Complex::real(14.0)));
        assert_eq!(session.execute("   ").unwrap(), Output::Nothing);
        assert_eq!(session.execute("x+1").unwrap().render().unwrap(), "x + 1");
    }

    #[test]
    fn let_binds_the_variable() {
        let mut session = Session::default();
        assert_eq!(session.execute(":let y = 1+2").unwrap().render().unwrap(), "y = 3");
        assert_eq!(number(session.execute("y^2").unwrap()), Complex::real(9.0));
        assert_eq!(session.execute("x").unwrap().render().unwrap(), "x");

        assert!(session.execute(":let y 2").unwrap_err().inner.is::<MalformedLet>());
        assert!(session.execute(":let y = z").unwrap_err().inner.is::<NonnumericBinding>());
    }

    #[test]
    fn modes() {
        let mut session = Session::default();
        session.execute(":deg").unwrap();
        assert_float_absolute_eq!(number(session.execute("sin(90)").unwrap()).re, 1.0, 1e-10);

        session.execute(":rad").unwrap();
        session.execute(":real").unwrap();
        let err = session.execute("sqrt(-1)").unwrap_err();
        assert!(err.inner.is::<NonrealResult>());
        assert_eq!(err.inner.spans, vec![0..8]);

        session.execute(":complex").unwrap();
        assert_eq!(session.execute("sqrt(-1)").unwrap().render().unwrap(), "i");
    }

    #[test]
    fn derivatives() {
        let mut session = Session::default();
        assert_eq!(session.execute(":d x^2").unwrap().render().unwrap(), "2x");
        assert_eq!(session.execute(":dd x^2").unwrap().render().unwrap(), "2x*dx");

        session.execute(":let t = 0").unwrap();
        assert_eq!(session.execute(":d t^3").unwrap().render().unwrap(), "3t^2");
    }

    #[test]
    fn simplify_lists_steps() {
        let mut session = Session::default();
        let output = session.execute(":s 0+x*1").unwrap();
        assert_eq!(output, Output::Simplified {
            result: Expr::variable("x"),
            steps: vec![Step::MultiplyOne, Step::AddZero],
        });

        session.execute(":factor").unwrap();
        assert_eq!(session.execute(":s x^2+x").unwrap().render().unwrap().lines().next(), Some("x(x + 1)"));
    }

    #[test]
    fn canonical_tree() {
        let mut session = Session::default();
        assert_eq!(session.execute(":tree 2x").unwrap().render().unwrap(), "multiply([2,0],x)");
    }

    #[test]
    fn unknown_command() {
        let mut session = Session::default();
        let err = session.execute(":frobnicate 2").unwrap_err();
        assert_eq!(err.inner.message(), "Unknown command: frobnicate");
        assert_eq!(err.inner.spans, vec![0..11]);
        assert_eq!(session.execute(":quit").unwrap(), Output::Quit);
    }
}
