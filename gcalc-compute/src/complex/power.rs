//! Complex exponentials, logarithms, powers and roots.

use crate::consts::LN_10;
use crate::real::{self, power::HUGE_EXPONENT};
use super::{abs, arg, divide, to_polar, to_rect, Complex};

/// Returns `e^c`.
pub fn exp(c: Complex) -> Complex {
    to_rect(real::exp(c.re), c.im)
}

/// Returns the principal natural logarithm of `c`.
pub fn ln(c: Complex) -> Complex {
    let magnitude = abs(c);
    if magnitude.is_infinite() {
        return Complex::INFINITY;
    }
    Complex::new(real::ln(magnitude), arg(c))
}

/// Returns the principal base-10 logarithm of `c`.
pub fn log(c: Complex) -> Complex {
    divide(ln(c), Complex::real(*LN_10))
}

/// Returns the principal value of `base^exponent`.
///
/// Both operands are rounded to 15 significant digits before the special cases are chosen:
/// a positive real base defers to [`real::pow`], a zero base gives `0`, `NaN` or infinity by
/// the sign of the exponent's real part, and exponents whose real part exceeds
/// [`HUGE_EXPONENT`] in magnitude saturate by comparing `|base|` with `1`.
pub fn pow(base: Complex, exponent: Complex) -> Complex {
    if base.is_nan() || exponent.is_nan() {
        return Complex::NAN;
    }

    let b = base.round(15);
    let e = exponent.round(15);

    if b.is_real() && e.is_real() && b.re > 0.0 {
        return Complex::real(real::pow(base.re, exponent.re));
    }

    if b == Complex::ZERO {
        return if e.re > 0.0 {
            Complex::ZERO
        } else if e.re < 0.0 {
            Complex::INFINITY
        } else {
            Complex::NAN
        };
    }

    if e.re > HUGE_EXPONENT {
        return if abs(b) > 1.0 { Complex::INFINITY } else { Complex::ZERO };
    }
    if e.re < -HUGE_EXPONENT {
        return if abs(b) > 1.0 { Complex::ZERO } else { Complex::INFINITY };
    }

    let (magnitude, angle) = to_polar(base);
    to_rect(
        real::pow(magnitude, exponent.re) * real::exp(-exponent.im * angle),
        exponent.re * angle + exponent.im * real::ln(magnitude),
    )
}

/// Returns the principal square root of `c`.
pub fn sqrt(c: Complex) -> Complex {
    if c.is_real() && c.re >= 0.0 {
        return Complex::real(real::sqrt(c.re));
    }
    let (magnitude, angle) = to_polar(c);
    to_rect(real::sqrt(magnitude), angle / 2.0)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use pretty_assertions::assert_eq;
    use super::*;

    fn assert_close(a: Complex, b: Complex) {
        assert_float_absolute_eq!(a.re, b.re, 1e-10);
        assert_float_absolute_eq!(a.im, b.im, 1e-10);
    }

    #[test]
    fn zero_to_the_zero() {
        assert!(pow(Complex::ZERO, Complex::ZERO).re.is_nan());
        assert_eq!(pow(Complex::ZERO, Complex::real(2.0)), Complex::ZERO);
        assert_eq!(pow(Complex::ZERO, Complex::real(-2.0)), Complex::INFINITY);
    }

    #[test]
    fn imaginary_unit_powers() {
        assert_eq!(pow(Complex::I, Complex::real(2.0)), Complex::real(-1.0));
        assert_close(pow(Complex::I, Complex::I), Complex::real((-std::f64::consts::FRAC_PI_2).exp()));
    }

    #[test]
    fn negative_base() {
        assert_eq!(pow(Complex::real(-2.0), Complex::real(2.0)), Complex::real(4.0));
        assert_close(pow(Complex::real(-8.0), Complex::real(1.0 / 3.0)), Complex::new(1.0, 3f64.sqrt()));
    }

    #[test]
    fn huge_exponents() {
        assert_eq!(pow(Complex::new(1.0, 1.0), Complex::real(1e16)), Complex::INFINITY);
        assert_eq!(pow(Complex::new(0.5, 0.5), Complex::real(1e16)), Complex::ZERO);
    }

    #[test]
    fn square_roots() {
        assert_eq!(sqrt(Complex::real(9.0)), Complex::real(3.0));
        assert_eq!(sqrt(Complex::real(-4.0)), Complex::new(0.0, 2.0));
        assert_eq!(sqrt(Complex::ZERO), Complex::ZERO);
        let c = Complex::new(3.0, -4.0);
        let root = sqrt(c);
        assert_close(root * root, c);
    }

    #[test]
    fn exponential_and_logarithm() {
        assert_close(exp(Complex::new(0.0, std::f64::consts::PI)), Complex::real(-1.0));
        assert_close(ln(Complex::real(-1.0)), Complex::new(0.0, std::f64::consts::PI));
        assert_close(log(Complex::real(1000.0)), Complex::real(3.0));
        for c in [Complex::new(1.0, 2.0), Complex::new(-3.0, 0.5), Complex::new(0.2, -0.7)] {
            assert_close(exp(ln(c)), c);
        }
    }
}
