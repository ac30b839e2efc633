//! Trigonometric functions and their inverses.

use crate::consts::{HALF_PI, PI, TAU};
use crate::mode::TrigMode;
use super::miscellaneous::{abs, round, sgn};
use super::power::sqrt;

/// Number of terms of the Maclaurin series for `sin`.
const SIN_TERMS: u32 = 15;

/// Number of terms of the Maclaurin series for `arctan`.
const ARCTAN_TERMS: u32 = 12;

/// Values whose magnitude is below this after rounding are treated as zero denominators.
const ZERO_DIGITS: i32 = 12;

/// Truncated Maclaurin series of `sin`, accurate on `[-pi/2, pi/2]`.
fn sin_series(x: f64) -> f64 {
    let x2 = x * x;
    let mut term = x;
    let mut sum = x;
    for i in 1..SIN_TERMS {
        let k = (2 * i) as f64;
        term *= -x2 / (k * (k + 1.0));
        sum += term;
    }
    sum
}

/// Truncated Maclaurin series of `arctan`, accurate for small `|x|`.
fn arctan_series(x: f64) -> f64 {
    let x2 = x * x;
    let mut power = x;
    let mut sum = 0.0;
    for i in 0..ARCTAN_TERMS {
        let term = power / (2 * i + 1) as f64;
        if i % 2 == 0 {
            sum += term;
        } else {
            sum -= term;
        }
        power *= x2;
    }
    sum
}

/// Returns the sine of `x`.
///
/// The angle is reduced modulo a full turn into `[-pi, pi]`, then folded into `[-pi/2, pi/2]`
/// where the series is evaluated. The result is rounded to 15 decimal places.
pub fn sin(x: f64, mode: TrigMode) -> f64 {
    let x = mode.to_radians(x);
    if x.is_nan() || x.is_infinite() {
        return f64::NAN;
    }

    let mut reduced = x % *TAU;
    if abs(reduced) > *PI {
        reduced -= sgn(reduced) * *TAU;
    }
    if abs(reduced) > *HALF_PI {
        reduced = sgn(reduced) * *PI - reduced;
    }

    round(sin_series(reduced), 15)
}

/// Returns the cosine of `x`, as the sine of its complement.
pub fn cos(x: f64, mode: TrigMode) -> f64 {
    sin(mode.quarter_turn() - x, mode)
}

/// Divides `numerator` by `denominator`, returning infinity if the denominator is zero to 12
/// decimal places.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if round(denominator, ZERO_DIGITS) == 0.0 {
        f64::INFINITY
    } else {
        numerator / denominator
    }
}

/// Returns the tangent of `x`. Odd multiples of a quarter turn give infinity.
pub fn tan(x: f64, mode: TrigMode) -> f64 {
    ratio(sin(x, mode), cos(x, mode))
}

/// Returns the cosecant of `x`.
pub fn csc(x: f64, mode: TrigMode) -> f64 {
    ratio(1.0, sin(x, mode))
}

/// Returns the secant of `x`.
pub fn sec(x: f64, mode: TrigMode) -> f64 {
    ratio(1.0, cos(x, mode))
}

/// Returns the cotangent of `x`.
pub fn cot(x: f64, mode: TrigMode) -> f64 {
    ratio(cos(x, mode), sin(x, mode))
}

/// Returns the arctangent of `x` in radians.
///
/// The argument is reduced twice with the half-angle identity
/// `arctan(x) = 2 arctan(x / (1 + sqrt(1 + x^2)))` so the series converges quickly.
pub fn arctan_radians(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if abs(x) > 1e16 {
        return sgn(x) * *HALF_PI;
    }

    let a = sqrt(x * x + 1.0);
    4.0 * arctan_series(x / (1.0 + a + sqrt(2.0 * (x * x + 1.0 + a))))
}

/// Returns the arcsine of `x` in radians. Arguments outside `[-1, 1]` give `NaN`.
pub fn arcsin_radians(x: f64) -> f64 {
    2.0 * arctan_radians(x / (1.0 + sqrt(1.0 - x * x)))
}

/// Returns the arctangent of `x`.
pub fn arctan(x: f64, mode: TrigMode) -> f64 {
    mode.from_radians(arctan_radians(x))
}

/// Returns the arcsine of `x`.
pub fn arcsin(x: f64, mode: TrigMode) -> f64 {
    mode.from_radians(arcsin_radians(x))
}

/// Returns the arccosine of `x`.
pub fn arccos(x: f64, mode: TrigMode) -> f64 {
    mode.from_radians(*HALF_PI - arcsin_radians(x))
}

/// Returns the arccosecant of `x`.
pub fn arccsc(x: f64, mode: TrigMode) -> f64 {
    arcsin(1.0 / x, mode)
}

/// Returns the arcsecant of `x`.
pub fn arcsec(x: f64, mode: TrigMode) -> f64 {
    arccos(1.0 / x, mode)
}

/// Returns the arccotangent of `x`.
pub fn arccot(x: f64, mode: TrigMode) -> f64 {
    mode.from_radians(*HALF_PI - arctan_radians(x))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use super::*;

    const RAD: TrigMode = TrigMode::Radians;

    #[test]
    fn sin_matches_reference() {
        let mut x = -100.0;
        while x <= 100.0 {
            assert_float_absolute_eq!(sin(x, RAD), x.sin(), 1e-10);
            x += 0.37;
        }
    }

    #[test]
    fn cos_matches_reference() {
        for x in [-7.5, -1.0, 0.0, 0.3, 2.0, 4.4, 50.0] {
            assert_float_absolute_eq!(cos(x, RAD), x.cos(), 1e-10);
        }
    }

    #[test]
    fn exact_zeros() {
        assert_eq!(sin(0.0, RAD), 0.0);
        assert_eq!(sin(*PI, RAD), 0.0);
        assert_eq!(cos(*HALF_PI, RAD), 0.0);
        assert_eq!(sin(180.0, TrigMode::Degrees), 0.0);
        assert_eq!(sin(90.0, TrigMode::Degrees), 1.0);
    }

    #[test]
    fn pythagorean_identity() {
        let (s, c) = (sin(1.0, RAD), cos(1.0, RAD));
        assert_float_absolute_eq!(s * s + c * c, 1.0, 1e-12);
    }

    #[test]
    fn singular_ratios() {
        assert_eq!(tan(*HALF_PI, RAD), f64::INFINITY);
        assert_eq!(tan(90.0, TrigMode::Degrees), f64::INFINITY);
        assert_eq!(cot(0.0, RAD), f64::INFINITY);
        assert_eq!(csc(0.0, RAD), f64::INFINITY);
        assert_float_absolute_eq!(tan(1.0, RAD), 1.0f64.tan(), 1e-10);
        assert_float_absolute_eq!(sec(1.0, RAD), 1.0 / 1.0f64.cos(), 1e-10);
    }

    #[test]
    fn non_finite() {
        assert!(sin(f64::INFINITY, RAD).is_nan());
        assert!(sin(f64::NAN, RAD).is_nan());
    }

    #[test]
    fn inverses() {
        assert_float_absolute_eq!(arctan(1.0, RAD) * 4.0, std::f64::consts::PI, 1e-14);
        assert_float_absolute_eq!(arctan(1.0, TrigMode::Degrees), 45.0, 1e-12);
        assert_float_absolute_eq!(arcsin(0.5, RAD), 0.5f64.asin(), 1e-14);
        assert_float_absolute_eq!(arccos(0.5, RAD), 0.5f64.acos(), 1e-14);
        assert_float_absolute_eq!(arcsin(-1.0, RAD), -std::f64::consts::FRAC_PI_2, 1e-14);
        assert_float_absolute_eq!(arccot(1.0, RAD), std::f64::consts::FRAC_PI_4, 1e-14);
        assert_float_absolute_eq!(arccsc(2.0, RAD), 0.5f64.asin(), 1e-14);
        assert_float_absolute_eq!(arcsec(2.0, RAD), 0.5f64.acos(), 1e-14);
        assert!(arcsin(2.0, RAD).is_nan());
        assert_float_absolute_eq!(arctan(1e20, RAD), std::f64::consts::FRAC_PI_2, 1e-14);
    }
}
