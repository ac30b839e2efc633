//! Numeric kernels, expression trees and symbolic algebra for `gcalc`.
//!
//! - [`real`] and [`complex`] implement the elementary functions on doubles and on complex
//!   numbers, from arithmetic alone.
//! - [`tree`] builds an [`Expr`] from the parser's canonical output and evaluates it, partially
//!   if free variables remain.
//! - [`symbolic`] differentiates and simplifies trees.
//!
//! ```
//! use gcalc_compute::{mode::EvalMode, tree::{Expr, Value}};
//!
//! let expr: Expr = "add([2,0],multiply([3,0],[4,0]))".parse().unwrap();
//! let value = expr.evaluate(None, EvalMode::default()).unwrap();
//! assert_eq!(value.as_number().map(|c| c.re), Some(14.0));
//! ```

pub mod complex;
pub mod consts;
pub mod error;
pub mod mode;
pub mod real;
pub mod symbolic;
pub mod tree;

pub use complex::Complex;
pub use mode::{EvalMode, TrigMode};
pub use tree::{Binding, Expr, Op, Value};
