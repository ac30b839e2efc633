//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the arguments of the node to simplify, and
//! returns `Some(expr)` with the rewritten node if the rule applies, or `None` if it does not.
//! At most one rule is applied to a node per pass.

pub mod add;
pub mod divide;
pub mod multiply;
pub mod power;
pub mod subtract;

use crate::complex::Complex;
use crate::symbolic::step_collector::StepCollector;
use crate::tree::{Expr, Op};
use super::{order::{self, Context}, step::Step, SimplifyOptions};

/// If the expression is a call to `op`, calls the given transformation function with the
/// arguments.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_call(expr: &Expr, op: Op, f: impl FnOnce(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Call(target, args) if *target == op => f(args),
        _ => None,
    }
}

/// Builds a call to `op`, collapsing an empty argument list to `identity` and a single argument
/// to itself.
pub(crate) fn make(op: Op, mut args: Vec<Expr>, identity: f64) -> Expr {
    match args.len() {
        0 => Expr::number(identity),
        1 => args.remove(0),
        _ => Expr::Call(op, args),
    }
}

/// Builds a product, see [`make`].
pub(crate) fn product(factors: Vec<Expr>) -> Expr {
    make(Op::Multiply, factors, 1.0)
}

/// Builds a sum, see [`make`].
pub(crate) fn sum(terms: Vec<Expr>) -> Expr {
    make(Op::Add, terms, 0.0)
}

/// Returns the factors of a product, or the expression itself as the only factor.
pub(crate) fn factors_of(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Call(Op::Multiply, factors) => factors.clone(),
        expr => vec![expr.clone()],
    }
}

/// Splits a factor into its base and exponent. A factor that is not a power has exponent `1`.
///
/// - `a^b` -> `(a, b)`
/// - `a` -> `(a, 1)`
pub(crate) fn base_and_exponent(expr: &Expr) -> (Expr, Expr) {
    match expr {
        Expr::Call(Op::Pow, args) if args.len() == 2 => (args[0].clone(), args[1].clone()),
        expr => (expr.clone(), Expr::number(1.0)),
    }
}

/// Builds `base^exponent`, writing `base^1` as `base`.
pub(crate) fn power(base: Expr, exponent: Expr) -> Expr {
    if exponent.is_literal(1.0) {
        base
    } else {
        Expr::Call(Op::Pow, vec![base, exponent])
    }
}

/// Returns the literal exponent of a factor, if it is a real number.
pub(crate) fn real_exponent(exponent: &Expr) -> Option<f64> {
    exponent.as_number().filter(Complex::is_real).map(|c| c.re)
}

/// Splits a term into its literal coefficient and the product of its remaining factors. If the
/// term has no literal factor, the coefficient is 1.
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `a*-2*b` -> `(-2, a*b)`
pub(crate) fn coefficient_and_rest(term: &Expr) -> (Complex, Expr) {
    let mut coefficient = Complex::ONE;
    let mut rest = Vec::new();
    for factor in factors_of(term) {
        match factor.as_number() {
            Some(c) => coefficient = coefficient * c,
            None => rest.push(factor),
        }
    }
    (coefficient, product(rest))
}

/// Builds `coefficient * rest`, dropping a unit coefficient.
pub(crate) fn with_coefficient(coefficient: Complex, rest: Expr) -> Expr {
    if coefficient == Complex::ONE {
        return rest;
    }
    if rest.is_literal(1.0) {
        return Expr::number(coefficient);
    }
    let mut factors = vec![Expr::number(coefficient)];
    factors.extend(factors_of(&rest));
    product(factors)
}

/// Returns the first literal factor of the expression, if any.
pub(crate) fn leading_coefficient(expr: &Expr) -> Option<Complex> {
    factors_of(expr).iter().find_map(Expr::as_number)
}

/// Returns the coefficient that decides the sign of the expression: the first literal factor of
/// a product, or for a sum, the coefficient of its simplest non-constant term.
///
/// Terms are compared without their coefficients, so negating every term of a sum picks the
/// same term and flips the sign of its coefficient.
pub(crate) fn sign_coefficient(expr: &Expr) -> Option<Complex> {
    let Expr::Call(Op::Add, terms) = expr else {
        return leading_coefficient(expr);
    };

    terms.iter()
        .map(coefficient_and_rest)
        .min_by_key(|(_, rest)| (rest.as_number().is_some(), rest.complexity(), rest.to_string()))
        .map(|(coefficient, _)| coefficient)
}

/// Builds `-expr`, flipping the sign of a literal or of a product's literal factor where there
/// is one.
pub(crate) fn negate(expr: &Expr) -> Expr {
    if let Some(c) = expr.as_number() {
        return Expr::number(-c);
    }

    let mut factors = factors_of(expr);
    let literal = factors.iter()
        .enumerate()
        .find_map(|(idx, factor)| factor.as_number().map(|c| (idx, c)));
    match literal {
        Some((idx, c)) => {
            let negated = -c;
            if negated == Complex::ONE {
                factors.remove(idx);
            } else {
                factors[idx] = Expr::number(negated);
            }
            product(factors)
        },
        None => Expr::Call(Op::Multiply, vec![Expr::number(-1.0), expr.clone()]),
    }
}

/// Builds `-expr`, negating each term of a sum separately.
pub(crate) fn negate_terms(expr: &Expr) -> Expr {
    match expr {
        Expr::Call(Op::Add, terms) => Expr::Call(Op::Add, terms.iter().map(negate).collect()),
        _ => negate(expr),
    }
}

/// Returns true if `a` is `-b`, either as the same term with opposite coefficients or as sums
/// whose terms pair up that way.
pub(crate) fn is_opposite(a: &Expr, b: &Expr) -> bool {
    let (a_coefficient, a_rest) = coefficient_and_rest(a);
    let (b_coefficient, b_rest) = coefficient_and_rest(b);
    if a_rest.is_identical_to(&b_rest) {
        return a_coefficient != Complex::ZERO && a_coefficient == -b_coefficient;
    }

    match (a, b) {
        (Expr::Call(Op::Add, a_terms), Expr::Call(Op::Add, b_terms)) if a_terms.len() == b_terms.len() => {
            let mut unmatched = b_terms.iter().collect::<Vec<_>>();
            a_terms.iter().all(|term| {
                match unmatched.iter().position(|other| is_opposite(term, other)) {
                    Some(idx) => {
                        unmatched.swap_remove(idx);
                        true
                    },
                    None => false,
                }
            })
        },
        _ => false,
    }
}

/// Splices arguments that are themselves calls to `op` into the argument list. Returns [`None`]
/// if there are none.
pub(crate) fn flatten(op: Op, args: &[Expr]) -> Option<Vec<Expr>> {
    if !args.iter().any(|arg| matches!(arg, Expr::Call(inner, _) if *inner == op)) {
        return None;
    }

    let mut flat = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Expr::Call(inner, inner_args) if *inner == op => flat.extend(inner_args.iter().cloned()),
            arg => flat.push(arg.clone()),
        }
    }
    Some(flat)
}

/// Sorts the operands into canonical order. Returns [`None`] if they are already in order.
pub(crate) fn reorder(args: &[Expr], context: Context) -> Option<Vec<Expr>> {
    if order::is_sorted(args, context) {
        return None;
    }

    let mut sorted = args.to_vec();
    sorted.sort_by(|a, b| order::compare(a, b, context));
    Some(sorted)
}

/// Collapses an evaluable node to a literal if it evaluates to a Gaussian integer, or to `NaN`.
pub fn fold_constant(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    if !matches!(expr, Expr::Call(..)) || !expr.is_evaluable() {
        return None;
    }

    let value = expr.try_evaluate()?;
    let rounded = value.round(16);
    let folded = if value.is_nan() {
        Expr::number(Complex::NAN)
    } else if rounded.is_finite() && rounded.is_gaussian_integer() {
        Expr::number(rounded)
    } else {
        return None;
    };

    step_collector.push(Step::ConstantFold);
    Some(folded)
}

/// Applies the rules for the operation at the root of the expression.
pub fn all(expr: &Expr, options: SimplifyOptions, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match expr {
        Expr::Call(Op::Add, _) => add::all(expr, options, step_collector),
        Expr::Call(Op::Subtract, _) => subtract::all(expr, step_collector),
        Expr::Call(Op::Multiply, _) => multiply::all(expr, options, step_collector),
        Expr::Call(Op::Divide, _) => divide::all(expr, step_collector),
        Expr::Call(Op::Pow, _) => power::all(expr, step_collector),
        _ => None,
    }
}
