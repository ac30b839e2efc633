//! Simplification rules for differences. Every difference is rewritten as a sum, so the
//! addition rules can take over.

use crate::symbolic::step_collector::StepCollector;
use crate::symbolic::simplify::step::Step;
use crate::tree::{Expr, Op};
use super::{do_call, negate};

/// `a-a = 0`
pub fn subtract_self(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Subtract, |args| match args {
        [a, b] if a.is_identical_to(b) => Some(Expr::number(0.0)),
        _ => None,
    })?;

    step_collector.push(Step::SubtractSelf);
    Some(opt)
}

/// `a-b = a + -1*b`
pub fn subtract_to_add(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Subtract, |args| match args {
        [a, b] => Some(Expr::Call(Op::Add, vec![a.clone(), negate(b)])),
        _ => None,
    })?;

    step_collector.push(Step::SubtractToAdd);
    Some(opt)
}

/// Applies the first subtraction rule that matches.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    subtract_self(expr, step_collector)
        .or_else(|| subtract_to_add(expr, step_collector))
}
