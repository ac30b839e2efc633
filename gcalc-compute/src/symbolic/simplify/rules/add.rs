//! Simplification rules for sums, including combining like terms.

use crate::complex::{self, Complex};
use crate::symbolic::step_collector::StepCollector;
use crate::symbolic::simplify::{order::Context, step::Step, SimplifyOptions};
use crate::tree::{Expr, Op};
use super::{
    base_and_exponent,
    coefficient_and_rest,
    do_call,
    factors_of,
    flatten,
    power,
    product,
    real_exponent,
    reorder,
    sum,
    with_coefficient,
};

/// `add(a) = a`
/// `add() = 0`
pub fn unwrap(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Add, |terms| {
        (terms.len() < 2).then(|| sum(terms.to_vec()))
    })?;

    step_collector.push(Step::Unwrap);
    Some(opt)
}

/// `a+(b+c) = a+b+c`
pub fn flatten_sum(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Add, |terms| {
        flatten(Op::Add, terms).map(|terms| Expr::Call(Op::Add, terms))
    })?;

    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Add, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_literal(0.0))
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(sum(new_terms))
        }
    })?;

    // keep the step collection logic outside of the closure
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Adds all the literal terms together, in the position of the first one.
///
/// `2+x+3 = 5+x`
pub fn add_numbers(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Add, |terms| {
        let literals = terms.iter().filter_map(Expr::as_number).collect::<Vec<_>>();
        if literals.len() < 2 {
            return None;
        }

        let total = complex::add(&literals);
        let mut placed = false;
        let new_terms = terms.iter()
            .filter_map(|term| {
                if term.as_number().is_none() {
                    Some(term.clone())
                } else if !placed {
                    placed = true;
                    Some(Expr::number(total))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        Some(sum(new_terms))
    })?;

    step_collector.push(Step::AddNumbers);
    Some(opt)
}

/// Rewrites the sum over the denominator of its first fraction.
///
/// `a + b/c = (a*c + b)/c`
pub fn common_denominator(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Add, |terms| {
        let idx = terms.iter()
            .position(|term| matches!(term, Expr::Call(Op::Divide, args) if args.len() == 2))?;
        let (numerator, denominator) = match &terms[idx] {
            Expr::Call(_, args) => (args[0].clone(), args[1].clone()),
            _ => return None,
        };

        let mut new_terms = terms.iter()
            .enumerate()
            .filter(|(term_idx, _)| *term_idx != idx)
            .map(|(_, term)| product(vec![term.clone(), denominator.clone()]))
            .collect::<Vec<_>>();
        new_terms.push(numerator);

        Some(Expr::Call(Op::Divide, vec![sum(new_terms), denominator]))
    })?;

    step_collector.push(Step::CommonDenominator);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// `a-a = 0`
pub fn combine_like_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Add, |terms| {
        let mut groups: Vec<(Complex, Expr)> = Vec::with_capacity(terms.len());
        let mut combined = false;
        for term in terms {
            let (coefficient, rest) = coefficient_and_rest(term);
            match groups.iter_mut().find(|(_, other)| other.is_identical_to(&rest)) {
                Some(group) => {
                    group.0 = group.0 + coefficient;
                    combined = true;
                },
                None => groups.push((coefficient, rest)),
            }
        }

        if !combined {
            return None;
        }

        let new_terms = groups.into_iter()
            .filter(|(coefficient, _)| *coefficient != Complex::ZERO)
            .map(|(coefficient, rest)| with_coefficient(coefficient, rest))
            .collect::<Vec<_>>();
        Some(sum(new_terms))
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Factors one power of a non-constant base out of every term, if every term has that base with
/// a literal exponent of at least 1.
///
/// `a^2 + a*b = a*(a + b)`
pub fn factor_common_base(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Add, |terms| {
        let term_factors = terms.iter()
            .map(|term| factors_of(term).iter().map(base_and_exponent).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let shared_by_all = |base: &Expr| {
            term_factors.iter().all(|factors| {
                factors.iter()
                    .find(|(other, _)| other.is_identical_to(base))
                    .and_then(|(_, exponent)| real_exponent(exponent))
                    .is_some_and(|exponent| exponent >= 1.0)
            })
        };
        let base = term_factors.first()?
            .iter()
            .map(|(base, _)| base)
            .find(|base| !base.is_evaluable() && shared_by_all(*base))?
            .clone();

        let new_terms = term_factors.iter()
            .map(|factors| {
                let mut removed = false;
                let mut new_factors = Vec::with_capacity(factors.len());
                for (factor_base, exponent) in factors {
                    if removed || !factor_base.is_identical_to(&base) {
                        new_factors.push(power(factor_base.clone(), exponent.clone()));
                        continue;
                    }

                    removed = true;
                    match real_exponent(exponent) {
                        Some(value) if value > 1.0 => {
                            new_factors.push(power(factor_base.clone(), Expr::number(value - 1.0)));
                        },
                        _ => (),
                    }
                }
                product(new_factors)
            })
            .collect::<Vec<_>>();

        Some(Expr::Call(Op::Multiply, vec![base, sum(new_terms)]))
    })?;

    step_collector.push(Step::FactorCommonBase);
    Some(opt)
}

/// Sorts the terms into canonical order.
///
/// `2+x = x+2`
pub fn reorder_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Add, |terms| {
        reorder(terms, Context::Sum).map(|terms| Expr::Call(Op::Add, terms))
    })?;

    step_collector.push(Step::Reorder);
    Some(opt)
}

/// Applies the first addition rule that matches.
pub fn all(expr: &Expr, options: SimplifyOptions, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    unwrap(expr, step_collector)
        .or_else(|| flatten_sum(expr, step_collector))
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| add_numbers(expr, step_collector))
        .or_else(|| common_denominator(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
        .or_else(|| options.factor.then(|| factor_common_base(expr, step_collector)).flatten())
        .or_else(|| reorder_terms(expr, step_collector))
}
