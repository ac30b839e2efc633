//! Real-valued elementary functions, built only from arithmetic on doubles.
//!
//! Nothing here calls a host math intrinsic: every transcendental function is a truncated
//! series evaluated after argument reduction. Domain-restricted functions ([`fac`], [`npr`],
//! [`ncr`]) return an [`Error`](gcalc_error::Error); everything else answers `NaN` or an
//! infinity instead of failing.

pub mod combinatoric;
pub mod miscellaneous;
pub mod power;
pub mod trigonometry;

pub use combinatoric::{fac, gcd, gcd2, ncr, npr};
pub use miscellaneous::{abs, ceil, floor, is_integer, max, min, round, sgn};
pub use power::{exp, int_pow, ln, log, pow, sqrt};
pub use trigonometry::{arccos, arccot, arccsc, arcsec, arcsin, arctan, cos, cot, csc, sec, sin, tan};
