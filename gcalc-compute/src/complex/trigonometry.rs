//! Complex trigonometric functions and their inverses.

use crate::mode::TrigMode;
use crate::real;
use super::{abs, divide, multiply, power::{exp, ln, sqrt}, subtract, Complex};

/// Real parts beyond this make [`arctan`] saturate at a quarter turn.
const ARCTAN_SATURATION: f64 = 1e12;

/// Returns the sine of `c`.
pub fn sin(c: Complex, mode: TrigMode) -> Complex {
    let c = c.to_radians(mode);
    if c.is_real() {
        return Complex::real(real::sin(c.re, TrigMode::Radians));
    }
    if abs(c).is_infinite() {
        return Complex::NAN;
    }

    // (e^(ic) - e^(-ic)) / 2i
    let iz = Complex::new(-c.im, c.re);
    divide(subtract(exp(iz), exp(-iz)), Complex::new(0.0, 2.0))
}

/// Returns the cosine of `c`, as the sine of its complement.
pub fn cos(c: Complex, mode: TrigMode) -> Complex {
    sin(subtract(Complex::real(mode.quarter_turn()), c), mode)
}

/// Divides `numerator` by `denominator`, returning infinity if the denominator is zero to 12
/// decimal places.
fn ratio(numerator: Complex, denominator: Complex) -> Complex {
    if denominator.round(12) == Complex::ZERO {
        Complex::INFINITY
    } else {
        divide(numerator, denominator)
    }
}

/// Returns the tangent of `c`.
pub fn tan(c: Complex, mode: TrigMode) -> Complex {
    ratio(sin(c, mode), cos(c, mode))
}

/// Returns the cosecant of `c`.
pub fn csc(c: Complex, mode: TrigMode) -> Complex {
    ratio(Complex::ONE, sin(c, mode))
}

/// Returns the secant of `c`.
pub fn sec(c: Complex, mode: TrigMode) -> Complex {
    ratio(Complex::ONE, cos(c, mode))
}

/// Returns the cotangent of `c`.
pub fn cot(c: Complex, mode: TrigMode) -> Complex {
    ratio(cos(c, mode), sin(c, mode))
}

/// Returns the principal arctangent of `c`, in radians.
fn arctan_radians(c: Complex) -> Complex {
    if c.re > ARCTAN_SATURATION {
        return Complex::real(TrigMode::Radians.quarter_turn());
    }
    if c.re < -ARCTAN_SATURATION {
        return Complex::real(-TrigMode::Radians.quarter_turn());
    }
    if c.is_real() {
        return Complex::real(real::trigonometry::arctan_radians(c.re));
    }

    // -i/2 * ln((i - c) / (i + c))
    let ratio = divide(subtract(Complex::I, c), Complex::I + c);
    multiply(&[Complex::new(0.0, -0.5), ln(ratio)])
}

/// Returns the principal arcsine of `c`, in radians.
fn arcsin_radians(c: Complex) -> Complex {
    if c.is_real() && real::abs(c.re) <= 1.0 {
        return Complex::real(real::trigonometry::arcsin_radians(c.re));
    }
    if abs(c).is_infinite() {
        return Complex::NAN;
    }

    // arctan(c / sqrt(1 - c^2))
    let root = sqrt(subtract(Complex::ONE, c * c));
    arctan_radians(divide(c, root))
}

/// Returns the arctangent of `c`.
pub fn arctan(c: Complex, mode: TrigMode) -> Complex {
    arctan_radians(c).from_radians(mode)
}

/// Returns the arcsine of `c`.
pub fn arcsin(c: Complex, mode: TrigMode) -> Complex {
    arcsin_radians(c).from_radians(mode)
}

/// Returns the arccosine of `c`.
pub fn arccos(c: Complex, mode: TrigMode) -> Complex {
    subtract(Complex::real(TrigMode::Radians.quarter_turn()), arcsin_radians(c)).from_radians(mode)
}

/// Returns the arccosecant of `c`.
pub fn arccsc(c: Complex, mode: TrigMode) -> Complex {
    arcsin(divide(Complex::ONE, c), mode)
}

/// Returns the arcsecant of `c`.
pub fn arcsec(c: Complex, mode: TrigMode) -> Complex {
    arccos(divide(Complex::ONE, c), mode)
}

/// Returns the arccotangent of `c`.
pub fn arccot(c: Complex, mode: TrigMode) -> Complex {
    subtract(Complex::real(TrigMode::Radians.quarter_turn()), arctan_radians(c)).from_radians(mode)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use pretty_assertions::assert_eq;
    use super::*;

    const RAD: TrigMode = TrigMode::Radians;

    fn assert_close(a: Complex, b: Complex) {
        assert_float_absolute_eq!(a.re, b.re, 1e-10);
        assert_float_absolute_eq!(a.im, b.im, 1e-10);
    }

    #[test]
    fn real_arguments_stay_real() {
        assert_eq!(sin(Complex::real(0.0), RAD), Complex::ZERO);
        assert_close(cos(Complex::real(1.0), RAD), Complex::real(1f64.cos()));
        assert_eq!(sin(Complex::real(30.0), TrigMode::Degrees), Complex::real(0.5));
    }

    #[test]
    fn complex_sine() {
        // sin(1 + i) = sin 1 cosh 1 + i cos 1 sinh 1
        let expected = Complex::new(1f64.sin() * 1f64.cosh(), 1f64.cos() * 1f64.sinh());
        assert_close(sin(Complex::new(1.0, 1.0), RAD), expected);
    }

    #[test]
    fn singular_tangent() {
        assert_eq!(tan(Complex::real(90.0), TrigMode::Degrees), Complex::INFINITY);
        assert_eq!(cot(Complex::ZERO, RAD), Complex::INFINITY);
    }

    #[test]
    fn inverse_functions() {
        assert_close(arctan(Complex::real(1.0), RAD), Complex::real(std::f64::consts::FRAC_PI_4));
        assert_close(arctan(Complex::real(1e13), RAD), Complex::real(std::f64::consts::FRAC_PI_2));
        assert_close(arcsin(Complex::real(0.5), TrigMode::Degrees), Complex::real(30.0));
        assert_close(arccos(Complex::real(0.0), RAD), Complex::real(std::f64::consts::FRAC_PI_2));
        assert_close(arccot(Complex::real(1.0), RAD), Complex::real(std::f64::consts::FRAC_PI_4));
    }

    #[test]
    fn arcsine_outside_real_domain() {
        // arcsin(2) = pi/2 - i ln(2 + sqrt 3)
        let expected = Complex::new(std::f64::consts::FRAC_PI_2, -(2.0 + 3f64.sqrt()).ln());
        assert_close(arcsin(Complex::real(2.0), RAD), expected);
    }

    #[test]
    fn complex_arctangent() {
        let c = Complex::new(0.5, 0.5);
        let t = arctan(c, RAD);
        assert_close(tan(t, RAD), c);
    }
}
