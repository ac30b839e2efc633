//! Simplification rules for powers.

use crate::symbolic::step_collector::StepCollector;
use crate::symbolic::simplify::step::Step;
use crate::tree::{Expr, Op};
use super::do_call;

/// `0^a = 0`, for a literal `a` with a positive real part
pub fn power_zero_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Pow, |args| match args {
        [base, exponent] if base.is_literal(0.0) => exponent.as_number()
            .filter(|c| c.re > 0.0)
            .map(|_| Expr::number(0.0)),
        _ => None,
    })?;

    step_collector.push(Step::PowerZeroLeft);
    Some(opt)
}

/// `a^0 = 1`
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Pow, |args| match args {
        [base, exponent] if exponent.is_literal(0.0) && !base.is_literal(0.0) => Some(Expr::number(1.0)),
        _ => None,
    })?;

    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `1^a = 1`, unless `a` is infinite or `NaN`
pub fn power_one_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Pow, |args| match args {
        [base, exponent] if base.is_literal(1.0) => {
            let finite = exponent.try_evaluate().map_or(true, |c| c.is_finite());
            finite.then(|| Expr::number(1.0))
        },
        _ => None,
    })?;

    step_collector.push(Step::PowerOneLeft);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Pow, |args| match args {
        [base, exponent] if exponent.is_literal(1.0) => Some(base.clone()),
        _ => None,
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// Applies the first power rule that matches.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    power_zero_left(expr, step_collector)
        .or_else(|| power_zero(expr, step_collector))
        .or_else(|| power_one_left(expr, step_collector))
        .or_else(|| power_one(expr, step_collector))
}
