//! Partial evaluation of expression trees.

use crate::complex::{self, Complex};
use crate::error::{MissingOperand, NonrealResult, TooManyArguments, UnboundVariable, UnknownFunction};
use crate::mode::{EvalMode, TrigMode};
use crate::symbolic;
use gcalc_error::Error;
use gcalc_parser::parser::error::MultiCharVariable;
use levenshtein::levenshtein;
use super::{Expr, Leaf, Op};

/// The value of the single variable an expression is evaluated at.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The name of the variable.
    pub variable: String,

    /// The value of the variable. A binding with no value makes any use of the variable fail.
    pub value: Option<Complex>,
}

impl Binding {
    /// Binds `variable` to `value`.
    pub fn new(variable: impl Into<String>, value: impl Into<Complex>) -> Self {
        Self { variable: variable.into(), value: Some(value.into()) }
    }
}

/// The result of evaluating an expression: a number, or the partially evaluated tree if a free
/// variable remains.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(Complex),
    Expr(Expr),
}

impl Value {
    /// Returns the number, if evaluation produced one.
    pub fn as_number(&self) -> Option<Complex> {
        match self {
            Value::Number(c) => Some(*c),
            Value::Expr(_) => None,
        }
    }

    /// Converts the value back into a tree, wrapping numbers in a literal leaf.
    pub fn into_expr(self) -> Expr {
        match self {
            Value::Number(c) => Expr::number(c),
            Value::Expr(expr) => expr,
        }
    }
}

/// Returns the names of all builtin operations similar to `name`.
pub fn similar_functions(name: &str) -> Vec<String> {
    Op::ALL
        .iter()
        .map(|op| op.name())
        .filter(|n| levenshtein(n, name) < 2)
        .map(str::to_string)
        .collect()
}

/// Fails if `op` cannot be applied to `args` because of their count.
pub(crate) fn check_arity(op: Op, args: &[Expr]) -> Result<(), Error> {
    if let Some(max) = op.max_args() {
        if args.len() > max {
            return Err(Error::spanless(TooManyArguments { name: op.name().to_string(), max }));
        }
    }
    if args.len() < op.min_args() {
        return Err(Error::spanless(MissingOperand));
    }
    Ok(())
}

/// Applies a builtin operation to numeric arguments.
fn apply(op: Op, args: &[Complex], trig_mode: TrigMode) -> Result<Complex, Error> {
    let a = args[0];
    let result = match op {
        Op::Add => complex::add(args),
        Op::Subtract => complex::subtract(a, args[1]),
        Op::Multiply => complex::multiply(args),
        Op::Divide => complex::divide(a, args[1]),
        Op::Abs => Complex::real(complex::abs(a)),
        Op::Max => complex::max(args)?,
        Op::Min => complex::min(args)?,
        Op::Floor => complex::floor(a),
        Op::Ceil => complex::ceil(a),
        Op::Fac => complex::fac(a)?,
        Op::Npr => complex::npr(a, args[1])?,
        Op::Ncr => complex::ncr(a, args[1])?,
        Op::Gcd => complex::gcd(args),
        Op::Exp => complex::exp(a),
        Op::Ln => complex::ln(a),
        Op::Log => complex::log(a),
        Op::Pow => complex::pow(a, args[1]),
        Op::Sqrt => complex::sqrt(a),
        Op::Sin => complex::sin(a, trig_mode),
        Op::Cos => complex::cos(a, trig_mode),
        Op::Tan => complex::tan(a, trig_mode),
        Op::Csc => complex::csc(a, trig_mode),
        Op::Sec => complex::sec(a, trig_mode),
        Op::Cot => complex::cot(a, trig_mode),
        Op::Arcsin => complex::arcsin(a, trig_mode),
        Op::Arccos => complex::arccos(a, trig_mode),
        Op::Arctan => complex::arctan(a, trig_mode),
        Op::Arccsc => complex::arccsc(a, trig_mode),
        Op::Arcsec => complex::arcsec(a, trig_mode),
        Op::Arccot => complex::arccot(a, trig_mode),

        // the derivative of a constant
        Op::Diff => Complex::ZERO,
    };
    Ok(result)
}

/// Fails if a nonreal number is produced in real mode.
fn check_real(c: Complex, mode: EvalMode) -> Result<Complex, Error> {
    if !mode.complex_mode && c.im != 0.0 {
        Err(Error::spanless(NonrealResult))
    } else {
        Ok(c)
    }
}

impl Expr {
    /// Evaluates the tree at the given binding.
    ///
    /// Arguments are evaluated first. If any of them still contains a free variable, the result
    /// is [`Value::Expr`]: the same operation applied to the partially evaluated arguments.
    pub fn evaluate(&self, binding: Option<&Binding>, mode: EvalMode) -> Result<Value, Error> {
        match self {
            Expr::Leaf(leaf) => self.evaluate_leaf(leaf, binding, mode),
            Expr::Unknown(name, _) => Err(Error::spanless(UnknownFunction {
                name: name.clone(),
                suggestions: similar_functions(name),
            })),
            Expr::Call(Op::Diff, args) => {
                check_arity(Op::Diff, args)?;
                symbolic::diff(args)?.evaluate(binding, mode)
            },
            Expr::Call(op, args) => {
                check_arity(*op, args)?;
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate(binding, mode))
                    .collect::<Result<Vec<_>, _>>()?;

                if values.iter().any(|value| matches!(value, Value::Expr(_))) {
                    let args = values.into_iter().map(Value::into_expr).collect();
                    return Ok(Value::Expr(Expr::Call(*op, args)));
                }

                let numbers = values.iter().filter_map(Value::as_number).collect::<Vec<_>>();
                let result = apply(*op, &numbers, mode.trig_mode)?;
                Ok(Value::Number(check_real(result, mode)?))
            },
        }
    }

    fn evaluate_leaf(&self, leaf: &Leaf, binding: Option<&Binding>, mode: EvalMode) -> Result<Value, Error> {
        match leaf {
            Leaf::Number(c) => Ok(Value::Number(check_real(*c, mode)?)),
            Leaf::Constant(constant) => Ok(Value::Number(Complex::real(constant.value()))),
            Leaf::Empty => Err(Error::spanless(MissingOperand)),
            Leaf::Variable(name) if name.len() > 1 && !self.is_differential() => {
                Err(Error::spanless(MultiCharVariable { name: name.clone() }))
            },
            Leaf::Variable(name) => match binding {
                Some(binding) if &binding.variable == name => binding.value
                    .map(Value::Number)
                    .ok_or_else(|| Error::spanless(UnboundVariable { name: name.clone() })),
                _ => Ok(Value::Expr(self.clone())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PI;
    use crate::error::{NonnegativeIntegersOnly, RealNumbersOnly};
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use gcalc_error::Category;
    use gcalc_parser::parse;
    use pretty_assertions::assert_eq;

    fn tree(input: &str) -> Expr {
        Expr::create_tree(&parse(input).unwrap())
    }

    fn eval(input: &str) -> Result<Value, Error> {
        tree(input).evaluate(None, EvalMode::default())
    }

    fn eval_number(input: &str) -> Complex {
        eval(input).unwrap().as_number().unwrap()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(eval("2+3*4").unwrap(), Value::Number(Complex::real(14.0)));
    }

    #[test]
    fn pythagorean_identity_at_one() {
        let value = tree("sin(x)^2+cos(x)^2")
            .evaluate(Some(&Binding::new("x", 1.0)), EvalMode::default())
            .unwrap()
            .as_number()
            .unwrap();
        assert_float_absolute_eq!(value.re, 1.0, 1e-12);
        assert_float_absolute_eq!(value.im, 0.0, 1e-12);
    }

    #[test]
    fn divide_by_zero_is_infinite() {
        assert_eq!(eval_number("1/0"), Complex::INFINITY);
    }

    #[test]
    fn four_arctan_one() {
        let value = eval_number("arctan(1)*4");
        assert_float_absolute_eq!(value.re, *PI, 1e-12);
        assert_eq!(value.im, 0.0);
    }

    #[test]
    fn negative_factorial() {
        let err = eval("fac(-2)").unwrap_err();
        assert_eq!(err.category(), Category::Domain);
        assert!(err.is::<NonnegativeIntegersOnly>());
    }

    #[test]
    fn zero_to_the_zero() {
        assert!(eval_number("0^0").is_nan());
    }

    #[test]
    fn partial_evaluation() {
        let value = eval("2*3 + x").unwrap();
        assert_eq!(value, Value::Expr(Expr::call(Op::Add, vec![
            Expr::number(6.0),
            Expr::variable("x"),
        ])));
    }

    #[test]
    fn binding_other_variable() {
        let value = tree("y + 1").evaluate(Some(&Binding::new("x", 2.0)), EvalMode::default()).unwrap();
        assert_eq!(value, Value::Expr(tree("y + 1")));
    }

    #[test]
    fn unbound_variable() {
        let binding = Binding { variable: "x".to_string(), value: None };
        let err = tree("x + 1").evaluate(Some(&binding), EvalMode::default()).unwrap_err();
        assert_eq!(err.message(), "No value provided for x.");
    }

    #[test]
    fn degree_mode() {
        let value = tree("sin(90)").evaluate(None, EvalMode::degrees()).unwrap().as_number().unwrap();
        assert_float_absolute_eq!(value.re, 1.0, 1e-12);
    }

    #[test]
    fn real_mode() {
        let err = tree("sqrt(-1)").evaluate(None, EvalMode::real()).unwrap_err();
        assert_eq!(err.category(), Category::Nonreal);
        assert_eq!(err.message(), "Nonreal answer or argument.");

        let value = tree("sqrt(4)").evaluate(None, EvalMode::real()).unwrap();
        assert_eq!(value, Value::Number(Complex::real(2.0)));
    }

    #[test]
    fn complex_mode() {
        assert_eq!(eval_number("sqrt(-4)"), Complex::new(0.0, 2.0));
        assert_eq!(eval_number("(1+i)(1-i)"), Complex::real(2.0));
    }

    #[test]
    fn unknown_function() {
        let err = eval("sinn(1)").unwrap_err();
        assert_eq!(err.category(), Category::Function);
        assert_eq!(err.message(), "Function: sinn is not supported.");
        assert_eq!(similar_functions("sinn"), vec!["sin".to_string()]);
    }

    #[test]
    fn too_many_arguments() {
        let err = eval("sin(1,2)").unwrap_err();
        assert_eq!(err.message(), "Max number of arguments expected for sin: 1.");
    }

    #[test]
    fn missing_operand() {
        assert_eq!(eval("2+").unwrap_err().message(), "Missing operand or argument.");
        assert_eq!(eval("pow(2)").unwrap_err().message(), "Missing operand or argument.");
    }

    #[test]
    fn real_only_functions() {
        assert!(eval("max(1, i)").unwrap_err().is::<RealNumbersOnly>());
        assert_eq!(eval_number("max(1, 5, 3)"), Complex::real(5.0));
    }

    #[test]
    fn multi_character_variable() {
        let expr = "add(xy,[1,0])".parse::<Expr>().unwrap();
        let err = expr.evaluate(None, EvalMode::default()).unwrap_err();
        assert_eq!(err.message(), "Variable: xy must be a single character.");
    }

    #[test]
    fn derivative_at_a_point() {
        let value = tree("diff(x^3, x)")
            .evaluate(Some(&Binding::new("x", 2.0)), EvalMode::default())
            .unwrap();
        assert_eq!(value, Value::Number(Complex::real(12.0)));
    }
}
