//! Powers, roots, exponentials and logarithms.

use crate::consts::LN_10;
use super::miscellaneous::{abs, ceil, is_integer, round};

/// Exponents with a magnitude beyond this saturate [`pow`] to `0` or infinity.
pub const HUGE_EXPONENT: f64 = 1e15;

/// Number of terms of the Maclaurin series for `exp`.
const EXP_TERMS: u32 = 23;

/// Number of terms of the series for `ln` around `1`.
const LN_TERMS: u32 = 25;

/// Ratio used to scale arguments of [`ln`] into the band where the series converges quickly.
const LN_RATIO: f64 = 4.0 / 3.0;

/// Raises `x` to an integer power by repeated squaring. Negative exponents return the
/// reciprocal.
pub fn int_pow(x: f64, n: i64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }

    let mut result = 1.0;
    let mut base = x;
    let mut exponent = n.unsigned_abs();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result *= base;
        }
        base *= base;
        exponent >>= 1;
    }

    if n < 0 { 1.0 / result } else { result }
}

/// Truncated Maclaurin series of `exp`, accurate for `|x| <= 2`.
fn exp_series(x: f64) -> f64 {
    let mut sum = 1.0;
    let mut term = 1.0;
    for i in 1..EXP_TERMS {
        term *= x / i as f64;
        sum += term;
    }
    sum
}

/// Returns `e^x`.
///
/// The argument is divided by `k = ceil(|x| / 2)` so that the series is evaluated on `[-2, 2]`,
/// and the result is raised back to the `k`-th power.
pub fn exp(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x > 1000.0 {
        return f64::INFINITY;
    }
    if x < -1000.0 {
        return 0.0;
    }
    if x == 0.0 {
        return 1.0;
    }

    let k = ceil(abs(x) / 2.0);
    int_pow(exp_series(x / k), k as i64)
}

/// Truncated series `ln(x) = -sum((1 - x)^i / i)`, accurate for `x` near `1`.
fn ln_series(x: f64) -> f64 {
    let t = 1.0 - x;
    let mut power = 1.0;
    let mut sum = 0.0;
    for i in 1..=LN_TERMS {
        power *= t;
        sum += power / i as f64;
    }
    -sum
}

/// Writes a positive `x` as `significand * LN_RATIO^power` with the significand in
/// `(6/7, 8/7)`.
fn normalize(x: f64) -> (f64, i32) {
    let mut significand = x;
    let mut power = 0;
    if x >= 1.0 {
        while significand >= 8.0 / 7.0 {
            significand /= LN_RATIO;
            power += 1;
        }
    } else {
        while significand <= 6.0 / 7.0 {
            significand *= LN_RATIO;
            power -= 1;
        }
    }
    (significand, power)
}

/// Returns the natural logarithm of `x`. Negative arguments produce `NaN`; `0` produces negative
/// infinity.
pub fn ln(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == f64::INFINITY {
        return f64::INFINITY;
    }
    if x == 0.0 {
        return f64::NEG_INFINITY;
    }
    if x > 6.0 / 7.0 && x < 8.0 / 7.0 {
        return ln_series(x);
    }

    let (significand, power) = normalize(x);
    ln_series(significand) - power as f64 * ln_series(1.0 / LN_RATIO)
}

/// Returns the base-10 logarithm of `x`.
pub fn log(x: f64) -> f64 {
    ln(x) / *LN_10
}

/// Returns `x^y`.
///
/// Both operands are first rounded to 15 significant digits to decide which case applies:
///
/// - an infinite base gives infinity, `0` or `NaN` by the sign of the exponent;
/// - a base of `1` gives `1` unless the exponent is infinite;
/// - a base of `0` gives `0`, `NaN` or infinity by the sign of the exponent;
/// - exponents beyond [`HUGE_EXPONENT`] saturate by comparing the base with `1`;
/// - integer exponents use [`int_pow`];
/// - positive bases use `exp(y * ln(x))`;
/// - anything else (a negative base with a fractional exponent) is `NaN`.
pub fn pow(x: f64, y: f64) -> f64 {
    if x.is_nan() || y.is_nan() {
        return f64::NAN;
    }

    let a = round(x, 15);
    let b = round(y, 15);

    if a == f64::INFINITY {
        return if b > 0.0 {
            f64::INFINITY
        } else if b < 0.0 {
            0.0
        } else {
            f64::NAN
        };
    }

    if a == 1.0 {
        return if abs(b) != f64::INFINITY { 1.0 } else { f64::NAN };
    }

    if a == 0.0 {
        return if b > 0.0 {
            0.0
        } else if b < 0.0 {
            f64::INFINITY
        } else {
            f64::NAN
        };
    }

    if b > HUGE_EXPONENT {
        return if a > 1.0 {
            f64::INFINITY
        } else if a >= 0.0 {
            0.0
        } else {
            f64::NAN
        };
    }

    if b < -HUGE_EXPONENT {
        return if a > 1.0 {
            0.0
        } else if a >= 0.0 {
            f64::INFINITY
        } else {
            f64::NAN
        };
    }

    if is_integer(b) {
        return int_pow(x, b as i64);
    }

    if a > 0.0 {
        exp(y * ln(x))
    } else {
        f64::NAN
    }
}

/// Returns the square root of `x` by Newton's iteration. Negative arguments produce `NaN`.
pub fn sqrt(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 || x == f64::INFINITY {
        return x;
    }

    // start above the root so the iterates decrease monotonically
    let mut root = if x > 1.0 { x } else { 1.0 };
    loop {
        let next = 0.5 * (root + x / root);
        if next >= root {
            return root;
        }
        root = next;
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        afe_is_relative_eq,
        afe_relative_error_msg,
        assert_float_absolute_eq,
        assert_float_relative_eq,
    };
    use super::*;

    #[test]
    fn integer_powers() {
        assert_eq!(int_pow(2.0, 10), 1024.0);
        assert_eq!(int_pow(2.0, -2), 0.25);
        assert_eq!(int_pow(5.0, 0), 1.0);
        assert!(int_pow(f64::NAN, 0).is_nan());
    }

    #[test]
    fn exp_values() {
        assert_eq!(exp(0.0), 1.0);
        assert_float_relative_eq!(exp(1.0), std::f64::consts::E, 1e-14);
        assert_float_relative_eq!(exp(-3.5), 0.0301973834223185, 1e-12);
        assert_float_relative_eq!(exp(50.0), 5.184705528587072e21, 1e-12);
        assert_eq!(exp(1001.0), f64::INFINITY);
        assert_eq!(exp(-1001.0), 0.0);
    }

    #[test]
    fn ln_values() {
        assert_float_absolute_eq!(ln(1.0), 0.0, 1e-15);
        assert_float_absolute_eq!(ln(10.0), std::f64::consts::LN_10, 1e-13);
        assert_float_absolute_eq!(ln(0.001), -6.907755278982137, 1e-12);
        assert_float_relative_eq!(ln(1e300), 690.7755278982137, 1e-12);
        assert!(ln(-1.0).is_nan());
        assert_eq!(ln(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn exp_of_ln() {
        for x in [1e-6, 0.3, 1.0, 2.5, 17.0, 12345.678, 1e12] {
            assert_float_relative_eq!(exp(ln(x)), x, 1e-10);
        }
    }

    #[test]
    fn log_base_ten() {
        assert_float_absolute_eq!(log(1000.0), 3.0, 1e-12);
    }

    #[test]
    fn pow_special_cases() {
        assert!(pow(0.0, 0.0).is_nan());
        assert_eq!(pow(0.0, 2.0), 0.0);
        assert_eq!(pow(0.0, -1.0), f64::INFINITY);
        assert_eq!(pow(1.0, 1e300), 1.0);
        assert!(pow(1.0, f64::INFINITY).is_nan());
        assert_eq!(pow(f64::INFINITY, 2.0), f64::INFINITY);
        assert_eq!(pow(f64::INFINITY, -2.0), 0.0);
        assert_eq!(pow(2.0, 1e16), f64::INFINITY);
        assert_eq!(pow(0.5, 1e16), 0.0);
        assert_eq!(pow(2.0, -1e16), 0.0);
        assert!(pow(-2.0, 0.5).is_nan());
    }

    #[test]
    fn pow_values() {
        assert_eq!(pow(2.0, 10.0), 1024.0);
        assert_eq!(pow(-2.0, 3.0), -8.0);
        assert_float_relative_eq!(pow(2.0, 0.5), std::f64::consts::SQRT_2, 1e-13);
        assert_float_relative_eq!(pow(10.0, -1.5), 0.031622776601683794, 1e-12);
    }

    #[test]
    fn sqrt_values() {
        assert_eq!(sqrt(4.0), 2.0);
        assert_eq!(sqrt(0.0), 0.0);
        assert!(sqrt(-1.0).is_nan());
        assert_eq!(sqrt(f64::INFINITY), f64::INFINITY);
        for x in [1e-10, 0.5, 2.0, 3.0, 1e10, 1e300] {
            let root = sqrt(x);
            assert_float_relative_eq!(root * root, x, 1e-14);
        }
    }
}
