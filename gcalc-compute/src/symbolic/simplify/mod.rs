//! Module to simplify expressions.
//!
//! This module provides the [`simplify`] function, which rewrites an expression into a smaller,
//! canonical form. It does this in passes: each pass simplifies the arguments of every node
//! first, then applies at most one rewriting rule to the node itself. Passes repeat until one of
//! them returns a tree identical to its input.
//!
//! Evaluable subtrees whose value is a Gaussian integer (or `NaN`) are folded into a literal
//! before any rule is tried, so `2+3*4` simplifies straight to `14`.

pub mod order;
pub mod rules;
pub mod step;

use crate::error::SimplifyDiverged;
use crate::symbolic::step_collector::StepCollector;
use crate::tree::Expr;
use gcalc_error::Error;
use step::Step;
use tracing::{debug, warn};

/// The maximum number of passes before the simplifier gives up.
pub const MAX_PASSES: usize = 128;

/// Options that control which rewrites the simplifier prefers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimplifyOptions {
    /// Factor shared bases out of sums (`x^2 + x = x(x + 1)`) instead of distributing products
    /// over sums.
    pub factor: bool,
}

/// Runs one pass of the simplifier over the tree, bottom-up.
fn pass(expr: &Expr, options: SimplifyOptions, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let expr = match expr {
        Expr::Leaf(_) => return expr.clone(),
        Expr::Call(op, args) => Expr::Call(
            *op,
            args.iter().map(|arg| pass(arg, options, step_collector)).collect(),
        ),
        Expr::Unknown(name, args) => {
            return Expr::Unknown(
                name.clone(),
                args.iter().map(|arg| pass(arg, options, step_collector)).collect(),
            );
        },
    };

    rules::fold_constant(&expr, step_collector)
        .or_else(|| rules::all(&expr, options, step_collector))
        .unwrap_or(expr)
}

/// Base implementation of the simplification algorithm. Returns [`None`] if the tree is still
/// changing after [`MAX_PASSES`] passes.
fn inner_simplify(
    expr: &Expr,
    options: SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let mut expr = expr.clone();
    for pass_number in 0..MAX_PASSES {
        let next = pass(&expr, options, step_collector);
        if next.is_identical_to(&expr) {
            return Some(next);
        }
        debug!("simplify pass {}: `{}` -> `{}`", pass_number, expr, next);
        expr = next;
    }

    warn!("simplifier did not converge after {} passes: `{}`", MAX_PASSES, expr);
    None
}

/// Simplifies the given expression with the default options.
///
/// If the simplifier does not converge, the input is returned unchanged.
pub fn simplify(expr: &Expr) -> Expr {
    simplify_with(expr, SimplifyOptions::default())
}

/// Simplifies the given expression with the given options.
///
/// If the simplifier does not converge, the input is returned unchanged.
pub fn simplify_with(expr: &Expr, options: SimplifyOptions) -> Expr {
    inner_simplify(expr, options, &mut ()).unwrap_or_else(|| expr.clone())
}

/// Simplifies the given expression, also returning the steps taken by the simplifier, in the
/// order they were applied.
pub fn simplify_with_steps(expr: &Expr, options: SimplifyOptions) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = inner_simplify(expr, options, &mut steps).unwrap_or_else(|| expr.clone());
    (simplified, steps)
}

/// Simplifies the given expression, failing if the simplifier does not converge.
pub fn try_simplify(expr: &Expr, options: SimplifyOptions) -> Result<Expr, Error> {
    inner_simplify(expr, options, &mut ()).ok_or_else(|| Error::spanless(SimplifyDiverged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::Complex;
    use crate::symbolic::derivative::derivative;
    use gcalc_parser::parse;
    use pretty_assertions::assert_eq;

    fn tree(input: &str) -> Expr {
        Expr::create_tree(&parse(input).unwrap())
    }

    fn canonical(input: &str) -> String {
        simplify(&tree(input)).to_string()
    }

    #[test]
    fn constant_folding() {
        assert_eq!(canonical("2+3*4"), "[14,0]");
        assert_eq!(canonical("i*i"), "[-1,0]");
        assert_eq!(canonical("2^10*x"), "multiply([1024,0],x)");

        // not an integer, so left for the rules
        assert_eq!(canonical("2*pi"), "multiply([2,0],[pi,0])");
    }

    #[test]
    fn nan_folds_to_a_literal() {
        let simplified = simplify(&tree("0^0"));
        assert!(simplified.as_number().is_some_and(|c| c.is_nan()));
        assert!(simplified.is_identical_to(&Expr::number(Complex::NAN)));
    }

    #[test]
    fn add_rules() {
        assert_eq!(canonical("0+x+0"), "x");
        assert_eq!(canonical("x+x"), "multiply([2,0],x)");
        assert_eq!(canonical("2*x+3*x+y"), "add(y,multiply([5,0],x))");
        assert_eq!(canonical("x+(y+(2+z))+3"), "add(x,y,z,[5,0])");
    }

    #[test]
    fn subtract_rules() {
        assert_eq!(canonical("sin(x)-sin(x)"), "[0,0]");
        assert_eq!(canonical("2*x-x"), "x");
        assert_eq!(canonical("x-3"), "add(x,[-3,0])");
        assert_eq!(canonical("x-y"), "add(x,multiply([-1,0],y))");
    }

    #[test]
    fn multiply_rules() {
        assert_eq!(canonical("0*(3*x+5)"), "[0,0]");
        assert_eq!(canonical("1*3*1*x*1"), "multiply([3,0],x)");
        assert_eq!(canonical("x*x^2*x"), "pow(x,[4,0])");
        assert_eq!(canonical("2*(x+1)"), "add(multiply([2,0],x),[2,0])");
        assert_eq!(canonical("2^x*3^x"), "pow([6,0],x)");
    }

    #[test]
    fn divide_rules() {
        assert_eq!(canonical("0/x"), "[0,0]");
        assert_eq!(canonical("sin(x)/sin(x)"), "[1,0]");
        assert_eq!(canonical("x/1"), "x");
        assert_eq!(canonical("x^3/x"), "pow(x,[2,0])");
        assert_eq!(canonical("x/x^3"), "divide([1,0],pow(x,[2,0]))");
        assert_eq!(canonical("(4*x)/6"), "divide(multiply([2,0],x),[3,0])");
        assert_eq!(canonical("x/(-2)"), "divide(multiply([-1,0],x),[2,0])");
        assert_eq!(canonical("(x/y)/z"), "divide(x,multiply(y,z))");
        assert_eq!(canonical("1/2+1/3"), "divide([5,0],[6,0])");
    }

    #[test]
    fn negative_sum_denominators() {
        assert_eq!(canonical("(x-1)/(1-x)"), "[-1,0]");
        assert_eq!(canonical("1/(1-x)"), "divide([-1,0],add(x,[-1,0]))");
        assert_eq!(canonical("(1-x)/(x-1)"), "[-1,0]");

        let options = SimplifyOptions { factor: true };
        assert_eq!(simplify_with(&tree("(x-1)/(1-x)"), options), Expr::number(-1.0));
    }

    #[test]
    fn nonreal_denominators() {
        assert_eq!(canonical("i*x/(-i)"), "multiply([-1,0],x)");
        assert_eq!(canonical("x/(2i)"), "multiply([0,-0.5],x)");
    }

    #[test]
    fn common_denominator() {
        assert_eq!(canonical("x+1/x"), "divide(add(pow(x,[2,0]),[1,0]),x)");
    }

    #[test]
    fn power_rules() {
        assert_eq!(canonical("x^0"), "[1,0]");
        assert_eq!(canonical("x^1"), "x");
        assert_eq!(canonical("1^x"), "[1,0]");
        assert_eq!(canonical("0^(x^0+1)"), "[0,0]");
    }

    #[test]
    fn factor_option() {
        let options = SimplifyOptions { factor: true };
        assert_eq!(
            simplify_with(&tree("x^2+x"), options).to_string(),
            "multiply(x,add(x,[1,0]))",
        );
        assert_eq!(canonical("x^2+x"), "add(x,pow(x,[2,0]))");
        assert_eq!(canonical("x*(x+1)"), "add(x,pow(x,[2,0]))");
    }

    #[test]
    fn derivatives_simplify() {
        let d = |input: &str| simplify(&derivative(&tree(input), "x", false).unwrap());
        assert_eq!(d("x^2"), tree("2*x"));
        assert_eq!(
            d("sin(x)*cos(x)").to_string(),
            "add(pow(cos(x),[2,0]),multiply([-1,0],pow(sin(x),[2,0])))",
        );
    }

    #[test]
    fn idempotence() {
        let inputs = [
            "x+1/x",
            "sin(x)*cos(x)+x^2*3-x",
            "(x+1)*(x-1)",
            "2^x*3^x/y",
            "ln(x)/(x*(-4))",
            "diff(x^3, x)+foo(x)",
            "(x-1)/(1-x)",
            "y/(2-3x)",
            "(2i*x)/(1+i)",
        ];
        for input in inputs {
            let once = simplify(&tree(input));
            let twice = simplify(&once);
            assert_eq!(once, twice, "not a fixed point for `{input}`");
        }
    }

    #[test]
    fn unknown_functions_keep_their_shape() {
        assert_eq!(canonical("foo(1+1, x*1)"), "foo([2,0],x)");
    }

    #[test]
    fn steps_are_collected() {
        let (result, steps) = simplify_with_steps(&tree("0+x*1"), SimplifyOptions::default());
        assert_eq!(result, tree("x"));
        assert_eq!(steps, vec![Step::MultiplyOne, Step::AddZero]);
    }

    #[test]
    fn converging_input_succeeds() {
        let result = try_simplify(&tree("x-x"), SimplifyOptions::default()).unwrap();
        assert_eq!(result, tree("0"));
    }
}
