//! Constants derived from the real kernel. None of these are hard-coded: every value is computed
//! from the same series the kernel uses, so that the trigonometric functions are consistent with
//! [`PI`].

use once_cell::sync::Lazy;
use crate::real::{exp, ln, sqrt, trigonometry::arctan_radians};

/// The circle constant, defined as `6 * arctan(1 / sqrt(3))`.
pub static PI: Lazy<f64> = Lazy::new(|| 6.0 * arctan_radians(1.0 / sqrt(3.0)));

/// Half of [`PI`].
pub static HALF_PI: Lazy<f64> = Lazy::new(|| *PI / 2.0);

/// Twice [`PI`].
pub static TAU: Lazy<f64> = Lazy::new(|| *PI * 2.0);

/// Euler's number.
pub static E: Lazy<f64> = Lazy::new(|| exp(1.0));

/// The natural logarithm of 10.
pub static LN_10: Lazy<f64> = Lazy::new(|| ln(10.0));

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use super::*;

    #[test]
    fn derived_constants() {
        assert_float_absolute_eq!(*PI, std::f64::consts::PI, 1e-14);
        assert_float_absolute_eq!(*E, std::f64::consts::E, 1e-14);
        assert_float_absolute_eq!(*LN_10, std::f64::consts::LN_10, 1e-14);
    }
}
