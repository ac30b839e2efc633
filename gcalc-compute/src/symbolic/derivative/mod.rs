//! Symbolic differentiation.
//!
//! Two kinds of derivative are supported. [`differentiate`] computes the differential of a tree:
//! every variable `v` becomes the differential `dv`, so `d(x^2)` is `2x dx`. [`derivative`]
//! differentiates with respect to one named variable, where the variable itself becomes `1` and
//! every other variable is either a constant or, in implicit mode, a function of it.
//!
//! Results are built with light cleanup (zero terms and unit factors are dropped) but are not
//! simplified; pass them through [`simplify`](crate::symbolic::simplify()) for a tidy result.

mod function;

use crate::error::{ConstantDifferential, MissingOperand};
use crate::mode::EvalMode;
use crate::symbolic::simplify::simplify;
use crate::tree::{eval::check_arity, Expr, Leaf, Op, Value};
use gcalc_error::Error;
use tracing::debug;

/// Which variables depend on the variable of differentiation.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Dependent<'a> {
    /// None; every other variable is a constant.
    Nothing,

    /// All of them.
    Everything,

    /// Only the named variable.
    Only(&'a str),
}

/// What a tree is differentiated with respect to.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Target<'a> {
    /// Every variable `v` differentiates to `dv`.
    Differential,

    /// The variable `name`.
    Variable { name: &'a str, dependent: Dependent<'a> },
}

/// Builds a product, dropping unit factors and collapsing to `0` if any factor is `0`.
#[derive(Default)]
struct MultBuilder(Vec<Expr>);

impl From<MultBuilder> for Expr {
    fn from(mut value: MultBuilder) -> Self {
        match value.0.len() {
            0 => Expr::number(1.0),
            1 => value.0.remove(0),
            _ => Expr::Call(Op::Multiply, value.0),
        }
    }
}

impl MultBuilder {
    fn mult(&mut self, e: Expr) {
        if e.is_literal(0.0) || self.0.first().is_some_and(|e| e.is_literal(0.0)) {
            self.0 = vec![Expr::number(0.0)];
            return;
        }

        if !e.is_literal(1.0) {
            self.0.push(e);
        }
    }

    fn with(mut self, e: Expr) -> Self {
        self.mult(e);
        self
    }
}

/// Builds a sum, dropping zero terms.
#[derive(Default)]
struct SumBuilder(Vec<Expr>);

impl From<SumBuilder> for Expr {
    fn from(mut value: SumBuilder) -> Self {
        match value.0.len() {
            0 => Expr::number(0.0),
            1 => value.0.remove(0),
            _ => Expr::Call(Op::Add, value.0),
        }
    }
}

impl SumBuilder {
    fn add(&mut self, e: Expr) {
        if !e.is_literal(0.0) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[Expr], target: Target) -> Result<Expr, Error> {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(d(term, target)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[Expr], target: Target) -> Result<Expr, Error> {
    let mut outer_sum = SumBuilder::default();
    for derivative_index in 0..product.len() {
        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(d(term, target)?);
            } else {
                inner_mult.mult(term.clone());
            }
        }
        outer_sum.add(inner_mult.into());
    }
    Ok(outer_sum.into())
}

/// Evaluates a node that has no rule of its own. A constant has a zero derivative; a node that
/// evaluates to a different tree (such as a nested `diff`) is differentiated in that form.
fn fold_ruleless(expr: &Expr, target: Target) -> Result<Expr, Error> {
    match expr.evaluate(None, EvalMode::default())? {
        Value::Number(_) => {
            debug!("folded `{}` to a constant", expr);
            Ok(Expr::number(0.0))
        },
        Value::Expr(evaluated) if !evaluated.is_identical_to(expr) => d(&evaluated, target),
        Value::Expr(_) => Err(function::not_differentiable(expr.name())),
    }
}

/// Folds an argument without a rule of its own into a literal, or into the tree it evaluates
/// to.
fn fold_arg(arg: &Expr) -> Result<Expr, Error> {
    let has_rule = match arg {
        Expr::Leaf(_) => true,
        Expr::Call(op, _) => function::has_rule(*op),
        Expr::Unknown(..) => false,
    };
    if has_rule {
        return Ok(arg.clone());
    }
    Ok(arg.evaluate(None, EvalMode::default())?.into_expr())
}

/// Differentiates `expr` with respect to `target`.
pub(crate) fn d(expr: &Expr, target: Target) -> Result<Expr, Error> {
    match expr {
        Expr::Leaf(Leaf::Number(_) | Leaf::Constant(_)) => Ok(Expr::number(0.0)),
        Expr::Leaf(Leaf::Empty) => Err(Error::spanless(MissingOperand)),
        Expr::Leaf(Leaf::Variable(v)) => Ok(match target {
            Target::Differential => Expr::variable(format!("d{}", v)),
            Target::Variable { name, .. } if name == v.as_str() => Expr::number(1.0),
            Target::Variable { name, dependent } => match dependent {
                Dependent::Everything => differential_ratio(v, name),
                Dependent::Only(y) if y == v.as_str() => differential_ratio(v, name),
                _ => Expr::number(0.0),
            },
        }),
        Expr::Call(op, args) if function::has_rule(*op) => {
            check_arity(*op, args)?;
            let args = args.iter().map(fold_arg).collect::<Result<Vec<_>, _>>()?;
            match *op {
                Op::Add => sum_rule(&args, target),
                Op::Multiply => product_rule(&args, target),
                op => function::function_derivative(op, &args, target),
            }
        },
        Expr::Call(..) | Expr::Unknown(..) => fold_ruleless(expr, target),
    }
}

/// `dy/dx`
fn differential_ratio(y: &str, x: &str) -> Expr {
    Expr::Call(Op::Divide, vec![
        Expr::variable(format!("d{}", y)),
        Expr::variable(format!("d{}", x)),
    ])
}

/// Computes the differential of `expr`, in which every variable `v` is replaced by `dv`.
pub fn differentiate(expr: &Expr) -> Result<Expr, Error> {
    d(expr, Target::Differential)
}

/// Computes the derivative of `expr` with respect to `variable`.
///
/// Other variables are constants, unless `implicit` is set, in which case each other variable
/// `y` is a function of `variable` with derivative `dy/dx`.
pub fn derivative(expr: &Expr, variable: &str, implicit: bool) -> Result<Expr, Error> {
    let dependent = if implicit { Dependent::Everything } else { Dependent::Nothing };
    d(expr, Target::Variable { name: variable, dependent })
}

/// Computes the derivative of `expr` with respect to `variable`, treating `dependent` as a
/// function of `variable` and every other variable as a constant.
pub fn implicit_derivative(expr: &Expr, dependent: &str, variable: &str) -> Result<Expr, Error> {
    d(expr, Target::Variable { name: variable, dependent: Dependent::Only(dependent) })
}

/// Fails if the variable of differentiation evaluates to a number.
fn check_differential(var: &Expr) -> Result<(), Error> {
    if var.is_number() {
        Err(Error::spanless(ConstantDifferential))
    } else {
        Ok(())
    }
}

/// The `diff` operation, applied to the arguments of a `diff` node.
///
/// - `diff(f)` is the simplified differential of `f`.
/// - `diff(f, x)` is the simplified derivative of `f` with respect to the variable `x`. If the
///   second argument is an expression rather than a variable, the result is the ratio of the two
///   differentials, `df / dg`.
/// - `diff(f, y, x)` is the derivative of `f` with respect to `x`, with `y` a function of `x`.
pub fn diff(args: &[Expr]) -> Result<Expr, Error> {
    check_arity(Op::Diff, args)?;
    let f = &args[0];
    match args {
        [_] => Ok(simplify(&differentiate(f)?)),
        [_, var] => {
            check_differential(var)?;
            match var.as_variable() {
                Some(name) => Ok(simplify(&derivative(f, name, false)?)),
                None => {
                    let ratio = Expr::Call(Op::Divide, vec![
                        simplify(&differentiate(f)?),
                        simplify(&differentiate(var)?),
                    ]);
                    Ok(simplify(&ratio))
                },
            }
        },
        [_, dependent, var] => {
            check_differential(dependent)?;
            check_differential(var)?;
            match (dependent.as_variable(), var.as_variable()) {
                (Some(y), Some(x)) => Ok(simplify(&implicit_derivative(f, y, x)?)),
                _ => diff(&[f.clone(), var.clone()]),
            }
        },
        _ => Err(Error::spanless(MissingOperand)),
    }
}
