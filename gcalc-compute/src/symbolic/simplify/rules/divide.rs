//! Simplification rules for fractions.

use crate::complex::Complex;
use crate::real;
use crate::symbolic::step_collector::StepCollector;
use crate::symbolic::simplify::step::Step;
use crate::tree::{Expr, Op};
use super::{
    base_and_exponent,
    coefficient_and_rest,
    do_call,
    factors_of,
    is_opposite,
    leading_coefficient,
    negate_terms,
    power,
    product,
    real_exponent,
    sign_coefficient,
    with_coefficient,
};

/// Builds `numerator / denominator`, writing `a/1` as `a`.
fn fraction(numerator: Expr, denominator: Expr) -> Expr {
    if denominator.is_literal(1.0) {
        numerator
    } else {
        Expr::Call(Op::Divide, vec![numerator, denominator])
    }
}

/// Replaces the first literal factor of the expression with `value`.
fn with_leading_coefficient(expr: &Expr, value: Complex) -> Expr {
    let mut factors = factors_of(expr);
    if let Some(idx) = factors.iter().position(|factor| factor.as_number().is_some()) {
        if value == Complex::ONE {
            factors.remove(idx);
        } else {
            factors[idx] = Expr::number(value);
        }
    }
    product(factors)
}

/// `0/a = 0`
pub fn divide_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Divide, |args| match args {
        [n, d] if n.is_literal(0.0) && !d.is_literal(0.0) => Some(Expr::number(0.0)),
        _ => None,
    })?;

    step_collector.push(Step::DivideZero);
    Some(opt)
}

/// `a/a = 1`
pub fn divide_self(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Divide, |args| match args {
        [n, d] if n.is_identical_to(d) => Some(Expr::number(1.0)),
        _ => None,
    })?;

    step_collector.push(Step::DivideSelf);
    Some(opt)
}

/// `(-a)/a = -1`
pub fn divide_opposite(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Divide, |args| match args {
        [n, d] if is_opposite(n, d) => Some(Expr::number(-1.0)),
        _ => None,
    })?;

    step_collector.push(Step::DivideOpposite);
    Some(opt)
}

/// Divides the coefficient of the numerator by a nonreal literal denominator.
///
/// `(2i*a)/i = 2a`
pub fn divide_number(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Divide, |args| match args {
        [n, d] => {
            let divisor = d.as_number().filter(|c| !c.is_real() && c.is_finite())?;
            let (coefficient, rest) = coefficient_and_rest(n);
            Some(with_coefficient(coefficient / divisor, rest))
        },
        _ => None,
    })?;

    step_collector.push(Step::DivideNumber);
    Some(opt)
}

/// `a/1 = a`
pub fn divide_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Divide, |args| match args {
        [n, d] if d.is_literal(1.0) => Some(n.clone()),
        _ => None,
    })?;

    step_collector.push(Step::DivideOne);
    Some(opt)
}

/// `(a/b)/c = a/(b*c)`
/// `a/(b/c) = (a*c)/b`
pub fn nested_fraction(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Divide, |args| match args {
        [Expr::Call(Op::Divide, inner), c] if inner.len() == 2 => Some(Expr::Call(Op::Divide, vec![
            inner[0].clone(),
            Expr::Call(Op::Multiply, vec![inner[1].clone(), c.clone()]),
        ])),
        [a, Expr::Call(Op::Divide, inner)] if inner.len() == 2 => Some(Expr::Call(Op::Divide, vec![
            Expr::Call(Op::Multiply, vec![a.clone(), inner[1].clone()]),
            inner[0].clone(),
        ])),
        _ => None,
    })?;

    step_collector.push(Step::NestedFraction);
    Some(opt)
}

/// Moves a negative sign out of the denominator. A sum is negated term by term.
///
/// `a/(-2b) = (-a)/(2b)`
/// `a/(1-b) = (-a)/(b-1)`
pub fn negate_denominator(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Divide, |args| match args {
        [n, d] => {
            let coefficient = sign_coefficient(d)?;
            (coefficient.is_real() && coefficient.re < 0.0)
                .then(|| Expr::Call(Op::Divide, vec![negate_terms(n), negate_terms(d)]))
        },
        _ => None,
    })?;

    step_collector.push(Step::NegateDenominator);
    Some(opt)
}

/// Cancels one pair of factors with identical bases, subtracting the exponents.
///
/// `a^3/a = a^2`
/// `a/a^3 = 1/a^2`
/// `(a*b)/(a*c) = b/c`
pub fn cancel_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Divide, |args| {
        let [n, d] = args else {
            return None;
        };
        let numerator = factors_of(n).iter().map(base_and_exponent).collect::<Vec<_>>();
        let denominator = factors_of(d).iter().map(base_and_exponent).collect::<Vec<_>>();

        for (d_idx, (d_base, d_exponent)) in denominator.iter().enumerate() {
            // bare literals are left to `reduce_fraction`
            if d_base.as_number().is_some() && d_exponent.is_literal(1.0) {
                continue;
            }

            let matching = numerator.iter().enumerate().find_map(|(n_idx, (n_base, n_exponent))| {
                if !n_base.is_identical_to(d_base) {
                    return None;
                }
                let difference = match (real_exponent(n_exponent), real_exponent(d_exponent)) {
                    (Some(a), Some(b)) => a - b,
                    _ if n_exponent.is_identical_to(d_exponent) => 0.0,
                    _ => return None,
                };
                Some((n_idx, difference))
            });
            let Some((n_idx, difference)) = matching else {
                continue;
            };

            let rebuild = |factors: &[(Expr, Expr)], idx: usize, remaining: f64| {
                let new_factors = factors.iter()
                    .enumerate()
                    .filter_map(|(i, (base, exponent))| {
                        if i != idx {
                            Some(power(base.clone(), exponent.clone()))
                        } else if remaining > 0.0 {
                            Some(power(base.clone(), Expr::number(remaining)))
                        } else {
                            None
                        }
                    })
                    .collect::<Vec<_>>();
                product(new_factors)
            };

            return Some(fraction(
                rebuild(&numerator, n_idx, difference),
                rebuild(&denominator, d_idx, -difference),
            ));
        }

        None
    })?;

    step_collector.push(Step::CancelFactors);
    Some(opt)
}

/// Divides the integer coefficients of the numerator and denominator by their greatest common
/// divisor.
///
/// `4a/6 = 2a/3`
pub fn reduce_fraction(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Op::Divide, |args| {
        let [n, d] = args else {
            return None;
        };
        let a = leading_coefficient(n)?;
        let b = leading_coefficient(d)?;
        let integral = |c: Complex| c.is_real() && c.is_gaussian_integer() && c.re != 0.0;
        if !integral(a) || !integral(b) {
            return None;
        }

        let divisor = real::gcd2(a.re, b.re);
        if divisor <= 1.0 {
            return None;
        }

        Some(fraction(
            with_leading_coefficient(n, Complex::real(a.re / divisor)),
            with_leading_coefficient(d, Complex::real(b.re / divisor)),
        ))
    })?;

    step_collector.push(Step::ReduceFraction);
    Some(opt)
}

/// Applies the first division rule that matches.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    divide_zero(expr, step_collector)
        .or_else(|| divide_self(expr, step_collector))
        .or_else(|| divide_opposite(expr, step_collector))
        .or_else(|| divide_one(expr, step_collector))
        .or_else(|| divide_number(expr, step_collector))
        .or_else(|| nested_fraction(expr, step_collector))
        .or_else(|| negate_denominator(expr, step_collector))
        .or_else(|| cancel_factors(expr, step_collector))
        .or_else(|| reduce_fraction(expr, step_collector))
}
