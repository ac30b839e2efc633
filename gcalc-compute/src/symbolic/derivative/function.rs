//! Derivatives of the builtin functions, with the chain rule applied.

use crate::error::NotDifferentiable;
use crate::tree::{Expr, Op};
use gcalc_error::Error;
use super::{d, MultBuilder, Target};

pub(super) fn not_differentiable(name: &str) -> Error {
    Error::spanless(NotDifferentiable { name: name.to_string() })
}

/// Returns true if the operation has a differentiation rule.
pub(super) fn has_rule(op: Op) -> bool {
    matches!(
        op,
        Op::Add | Op::Subtract | Op::Multiply | Op::Divide | Op::Abs | Op::Exp | Op::Ln | Op::Log
            | Op::Pow | Op::Sqrt | Op::Sin | Op::Cos | Op::Tan | Op::Csc | Op::Sec | Op::Cot
            | Op::Arcsin | Op::Arccos | Op::Arctan
    )
}

fn call(op: Op, args: Vec<Expr>) -> Expr {
    Expr::Call(op, args)
}

fn unary(op: Op, arg: &Expr) -> Expr {
    Expr::Call(op, vec![arg.clone()])
}

/// `1 - f^2`
fn one_minus_square(f: &Expr) -> Expr {
    call(Op::Subtract, vec![
        Expr::number(1.0),
        call(Op::Multiply, vec![f.clone(), f.clone()]),
    ])
}

/// Computes the derivative of a call to `op` and performs the chain rule.
pub(super) fn function_derivative(op: Op, args: &[Expr], target: Target) -> Result<Expr, Error> {
    let f = &args[0];
    let df = d(f, target)?;
    let mut mult_group = MultBuilder::default();

    match op {
        Op::Subtract => {
            let dg = d(&args[1], target)?;
            if dg.is_literal(0.0) {
                return Ok(df);
            }
            return Ok(call(Op::Subtract, vec![df, dg]));
        },
        Op::Divide => {
            // (f/g)' = (g f' - f g') / g^2
            let g = &args[1];
            let dg = d(g, target)?;
            let left = MultBuilder::default().with(g.clone()).with(df);
            let right = MultBuilder::default().with(f.clone()).with(dg);
            let right = Expr::from(right);
            let numerator = if right.is_literal(0.0) {
                Expr::from(left)
            } else {
                call(Op::Subtract, vec![left.into(), right])
            };
            return Ok(call(Op::Divide, vec![
                numerator,
                call(Op::Pow, vec![g.clone(), Expr::number(2.0)]),
            ]));
        },
        Op::Abs => {
            mult_group.mult(f.clone());
            mult_group.mult(df);
            return Ok(call(Op::Divide, vec![mult_group.into(), unary(Op::Abs, f)]));
        },
        Op::Exp => {
            mult_group.mult(unary(Op::Exp, f));
            mult_group.mult(df);
        },
        Op::Ln => return Ok(call(Op::Divide, vec![df, f.clone()])),
        Op::Log => {
            return Ok(call(Op::Divide, vec![
                df,
                call(Op::Multiply, vec![unary(Op::Ln, &Expr::number(10.0)), f.clone()]),
            ]));
        },
        Op::Pow => {
            let g = &args[1];
            if g.is_number() {
                // power rule
                mult_group.mult(g.clone());
                mult_group.mult(call(Op::Pow, vec![
                    f.clone(),
                    call(Op::Subtract, vec![g.clone(), Expr::number(1.0)]),
                ]));
                mult_group.mult(df);
            } else {
                // (f^g)' = f^g (g ln f)'
                let exponent = call(Op::Multiply, vec![g.clone(), unary(Op::Ln, f)]);
                mult_group.mult(call(Op::Pow, vec![f.clone(), g.clone()]));
                mult_group.mult(d(&exponent, target)?);
            }
        },
        Op::Sqrt => {
            return Ok(call(Op::Divide, vec![
                df,
                call(Op::Multiply, vec![Expr::number(2.0), unary(Op::Sqrt, f)]),
            ]));
        },
        Op::Sin => {
            mult_group.mult(unary(Op::Cos, f));
            mult_group.mult(df);
        },
        Op::Cos => {
            mult_group.mult(Expr::number(-1.0));
            mult_group.mult(unary(Op::Sin, f));
            mult_group.mult(df);
        },
        Op::Tan => {
            mult_group.mult(unary(Op::Sec, f));
            mult_group.mult(unary(Op::Sec, f));
            mult_group.mult(df);
        },
        Op::Csc => {
            mult_group.mult(Expr::number(-1.0));
            mult_group.mult(unary(Op::Csc, f));
            mult_group.mult(unary(Op::Cot, f));
            mult_group.mult(df);
        },
        Op::Sec => {
            mult_group.mult(unary(Op::Sec, f));
            mult_group.mult(unary(Op::Tan, f));
            mult_group.mult(df);
        },
        Op::Cot => {
            mult_group.mult(Expr::number(-1.0));
            mult_group.mult(unary(Op::Csc, f));
            mult_group.mult(unary(Op::Csc, f));
            mult_group.mult(df);
        },
        Op::Arcsin => {
            return Ok(call(Op::Divide, vec![df, unary(Op::Sqrt, &one_minus_square(f))]));
        },
        Op::Arccos => {
            return Ok(call(Op::Divide, vec![
                MultBuilder::default().with(Expr::number(-1.0)).with(df).into(),
                unary(Op::Sqrt, &one_minus_square(f)),
            ]));
        },
        Op::Arctan => {
            return Ok(call(Op::Divide, vec![
                df,
                call(Op::Add, vec![Expr::number(1.0), call(Op::Multiply, vec![f.clone(), f.clone()])]),
            ]));
        },
        _ => return Err(not_differentiable(op.name())),
    };

    Ok(mult_group.into())
}
