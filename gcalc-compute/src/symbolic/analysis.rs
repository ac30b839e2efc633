//! Numerical analysis on expression trees.

use crate::complex::Complex;
use crate::mode::EvalMode;
use crate::symbolic::{derivative::derivative, simplify::simplify};
use crate::tree::{Binding, Expr, Value};
use gcalc_error::Error;
use tracing::debug;

/// The maximum number of iterations of [`newtons_method`].
pub const MAX_ITERATIONS: usize = 100;

/// Evaluates `expr` at a real point, returning [`None`] if the result is not a real number.
fn real_at(expr: &Expr, variable: &str, x: f64) -> Result<Option<f64>, Error> {
    let value = expr.evaluate(Some(&Binding::new(variable, x)), EvalMode::default())?;
    Ok(match value {
        Value::Number(c) if c.is_real() => Some(c.re),
        Value::Number(Complex { im, re }) if im.abs() < 1e-12 => Some(re),
        _ => None,
    })
}

/// Finds a root of `expr`, as a function of `variable`, by Newton's method starting from
/// `start`.
///
/// Returns `NaN` if the iteration does not settle within [`MAX_ITERATIONS`] steps, reaches a
/// point where the derivative is zero, or leaves the real line.
pub fn newtons_method(expr: &Expr, variable: &str, start: f64) -> f64 {
    let Ok(slope) = derivative(expr, variable, false).map(|d| simplify(&d)) else {
        return f64::NAN;
    };

    let step = |x: f64| -> Result<Option<f64>, Error> {
        let (Some(y), Some(dy)) = (real_at(expr, variable, x)?, real_at(&slope, variable, x)?) else {
            return Ok(None);
        };
        if dy == 0.0 {
            return Ok(None);
        }
        Ok(Some(x - y / dy))
    };

    let mut root = start;
    for iteration in 0..MAX_ITERATIONS {
        let next = match step(root) {
            Ok(Some(next)) if next.is_finite() => next,
            _ => return f64::NAN,
        };
        if (next - root).abs() <= 1e-14 * root.abs().max(1.0) {
            debug!("newton's method settled at {} after {} iterations", next, iteration + 1);
            return next;
        }
        root = next;
    }

    f64::NAN
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use gcalc_parser::parse;

    fn tree(input: &str) -> Expr {
        Expr::create_tree(&parse(input).unwrap())
    }

    #[test]
    fn square_root_of_two() {
        let root = newtons_method(&tree("x^2-2"), "x", 1.0);
        assert_float_absolute_eq!(root, 2f64.sqrt(), 1e-10);
    }

    #[test]
    fn other_variable() {
        let root = newtons_method(&tree("cos(t)-t"), "t", 1.0);
        assert_float_absolute_eq!(root, 0.7390851332151607, 1e-10);
    }

    #[test]
    fn cube_root_diverges() {
        assert!(newtons_method(&tree("x^(1/3)"), "x", 100.0).is_nan());
    }

    #[test]
    fn flat_start() {
        // the derivative of x^2 + 1 is zero at the starting point
        assert!(newtons_method(&tree("x^2+1"), "x", 0.0).is_nan());
    }

    #[test]
    fn not_differentiable() {
        assert!(newtons_method(&tree("floor(x)-1"), "x", 0.5).is_nan());
    }
}
