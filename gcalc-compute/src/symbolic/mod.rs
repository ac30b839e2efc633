//! Symbolic manipulation of expression trees.
//!
//! The [`derivative`] module differentiates trees, either into a differential (`d(x^2) = 2x dx`)
//! or with respect to one variable. The [`simplify`](mod@simplify) module rewrites trees into a
//! smaller canonical form and is applied to every derivative before it is returned from
//! [`diff`]. The [`analysis`] module builds numerical methods on top of both.

pub mod analysis;
pub mod derivative;
pub mod simplify;
pub mod step_collector;

pub use analysis::newtons_method;
pub use derivative::{derivative, diff, differentiate, implicit_derivative};
pub use simplify::{simplify, simplify_with, simplify_with_steps, try_simplify, SimplifyOptions};
pub use step_collector::StepCollector;
