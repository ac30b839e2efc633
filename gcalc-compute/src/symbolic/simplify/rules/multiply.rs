//! Simplification rules for products, including combining like factors.

use crate::complex::{self, Complex};
use crate::symbolic::step_collector::StepCollector;
use crate::symbolic::simplify::{order::Context, step::Step, SimplifyOptions};
use crate::tree::{Expr, Op};
use super::{base_and_exponent, do_call, flatten, power, product, real_exponent, reorder, sum};

/// `multiply(a) = a`
/// `multiply() = 1`
pub fn unwrap(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Multiply, |factors| {
        (factors.len() < 2).then(|| product(factors.to_vec()))
    })?;

    step_collector.push(Step::Unwrap);
    Some(opt)
}

/// `a*(b*c) = a*b*c`
pub fn flatten_product(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Multiply, |factors| {
        flatten(Op::Multiply, factors).map(|factors| Expr::Call(Op::Multiply, factors))
    })?;

    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
///
/// Not applied when another factor is an infinite or `NaN` literal.
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Multiply, |factors| {
        let has_zero = factors.iter().any(|factor| factor.is_literal(0.0));
        let has_non_finite = factors.iter()
            .filter_map(Expr::as_number)
            .any(|c| !c.is_finite());
        (has_zero && !has_non_finite).then(|| Expr::number(0.0))
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Multiply, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_literal(1.0))
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(product(new_factors))
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Multiplies all the literal factors together, in the position of the first one.
///
/// `2*x*3 = 6*x`
pub fn multiply_numbers(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Multiply, |factors| {
        let literals = factors.iter().filter_map(Expr::as_number).collect::<Vec<_>>();
        if literals.len() < 2 {
            return None;
        }

        let total = complex::multiply(&literals);
        let mut placed = false;
        let new_factors = factors.iter()
            .filter_map(|factor| {
                if factor.as_number().is_none() {
                    Some(factor.clone())
                } else if !placed {
                    placed = true;
                    Some(Expr::number(total))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        Some(product(new_factors))
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Moves the first fraction's denominator out of the product.
///
/// `a*(b/c) = (a*b)/c`
pub fn multiply_fraction(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Multiply, |factors| {
        let idx = factors.iter()
            .position(|factor| matches!(factor, Expr::Call(Op::Divide, args) if args.len() == 2))?;
        let (numerator, denominator) = match &factors[idx] {
            Expr::Call(_, args) => (args[0].clone(), args[1].clone()),
            _ => return None,
        };

        let mut new_factors = factors.to_vec();
        new_factors[idx] = numerator;
        Some(Expr::Call(Op::Divide, vec![product(new_factors), denominator]))
    })?;

    step_collector.push(Step::MultiplyFraction);
    Some(opt)
}

/// Distributes the product over its first sum.
///
/// `a*(b+c) = a*b + a*c`
pub fn distribute(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Multiply, |factors| {
        let idx = factors.iter().position(|factor| matches!(factor, Expr::Call(Op::Add, _)))?;
        let terms = factors[idx].args();

        let new_terms = terms.iter()
            .map(|term| {
                let mut new_factors = factors.to_vec();
                new_factors[idx] = term.clone();
                product(new_factors)
            })
            .collect::<Vec<_>>();
        Some(sum(new_terms))
    })?;

    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// Combines factors with identical bases by adding their exponents. Bare literal factors are
/// left to [`multiply_numbers`].
///
/// `a*a = a^2`
/// `a^b*a^c = a^(b+c)`
pub fn combine_like_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Multiply, |factors| {
        // each entry is a bare literal, or a base with the exponents collected for it
        let mut groups: Vec<(Expr, Vec<Expr>)> = Vec::with_capacity(factors.len());
        let mut combined = false;
        for factor in factors {
            if factor.as_number().is_some() {
                groups.push((factor.clone(), Vec::new()));
                continue;
            }

            let (base, exponent) = base_and_exponent(factor);
            match groups.iter_mut().find(|(other, exponents)| !exponents.is_empty() && other.is_identical_to(&base)) {
                Some((_, exponents)) => {
                    exponents.push(exponent);
                    combined = true;
                },
                None => groups.push((base, vec![exponent])),
            }
        }

        if !combined {
            return None;
        }

        let new_factors = groups.into_iter()
            .filter_map(|(base, exponents)| {
                if exponents.is_empty() {
                    return Some(base);
                }

                let literal = exponents.iter().map(real_exponent).sum::<Option<f64>>();
                let exponent = match literal {
                    Some(value) if value == 0.0 => return None,
                    Some(value) => Expr::number(value),
                    None if exponents.len() == 1 => exponents.into_iter().next()?,
                    None => Expr::Call(Op::Add, exponents),
                };
                Some(power(base, exponent))
            })
            .collect::<Vec<_>>();
        Some(product(new_factors))
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Combines powers of literal bases with identical exponents by multiplying the bases.
///
/// `2^x*3^x = 6^x`
pub fn combine_like_exponents(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Multiply, |factors| {
        // each entry is an untouched factor, or a literal base with the exponent it is raised to
        let mut groups: Vec<(Option<(Complex, Expr)>, Expr)> = Vec::with_capacity(factors.len());
        let mut combined = false;
        for factor in factors {
            let literal_power = match factor {
                Expr::Call(Op::Pow, args) if args.len() == 2 => args[0].as_number()
                    .map(|base| (base, args[1].clone())),
                _ => None,
            };
            let Some((base, exponent)) = literal_power else {
                groups.push((None, factor.clone()));
                continue;
            };

            let existing = groups.iter_mut()
                .find_map(|(group, _)| group.as_mut().filter(|(_, other)| other.is_identical_to(&exponent)));
            match existing {
                Some((product_base, _)) => {
                    *product_base = *product_base * base;
                    combined = true;
                },
                None => groups.push((Some((base, exponent)), factor.clone())),
            }
        }

        if !combined {
            return None;
        }

        let new_factors = groups.into_iter()
            .map(|(group, factor)| match group {
                Some((base, exponent)) => power(Expr::number(base), exponent),
                None => factor,
            })
            .collect::<Vec<_>>();
        Some(product(new_factors))
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Sorts the factors into canonical order.
///
/// `x*2 = 2*x`
pub fn reorder_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Multiply, |factors| {
        reorder(factors, Context::Product).map(|factors| Expr::Call(Op::Multiply, factors))
    })?;

    step_collector.push(Step::Reorder);
    Some(opt)
}

/// Applies the first multiplication rule that matches.
pub fn all(expr: &Expr, options: SimplifyOptions, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    unwrap(expr, step_collector)
        .or_else(|| flatten_product(expr, step_collector))
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| multiply_numbers(expr, step_collector))
        .or_else(|| multiply_fraction(expr, step_collector))
        .or_else(|| (!options.factor).then(|| distribute(expr, step_collector)).flatten())
        .or_else(|| combine_like_factors(expr, step_collector))
        .or_else(|| combine_like_exponents(expr, step_collector))
        .or_else(|| reorder_factors(expr, step_collector))
}
