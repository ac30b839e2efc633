//! Complex arithmetic and elementary functions, lifted from the [real kernel](crate::real).
//!
//! Every function here is total: it always produces a [`Complex`], using `NaN` and infinite
//! components where the value is undefined or unrepresentable. The exceptions are the functions
//! that only accept real arguments ([`max`], [`min`], [`fac`], [`npr`], [`ncr`]), which fail
//! with a domain error.

pub mod combinatoric;
pub mod power;
pub mod trigonometry;

use crate::consts::PI;
use crate::mode::TrigMode;
use crate::real;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use combinatoric::{ceil, fac, floor, gcd, max, min, ncr, npr};
pub use power::{exp, ln, log, pow, sqrt};
pub use trigonometry::{arccos, arccot, arccsc, arcsec, arcsin, arctan, cos, cot, csc, sec, sin, tan};

/// A complex number as a pair of doubles. Equality is component-wise; `im == 0` is the real
/// case.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Complex {
    /// The real part.
    pub re: f64,

    /// The imaginary part.
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    pub const ONE: Complex = Complex::new(1.0, 0.0);
    pub const I: Complex = Complex::new(0.0, 1.0);
    pub const NAN: Complex = Complex::new(f64::NAN, f64::NAN);
    pub const INFINITY: Complex = Complex::new(f64::INFINITY, 0.0);

    /// Creates a complex number from its parts.
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Creates a real number.
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Returns true if the imaginary part is zero.
    pub fn is_real(&self) -> bool {
        self.im == 0.0
    }

    /// Returns true if either part is `NaN`.
    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    /// Returns true if both parts are finite.
    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    /// Returns true if both parts are integers.
    pub fn is_gaussian_integer(&self) -> bool {
        real::is_integer(self.re) && real::is_integer(self.im)
    }

    /// Compares two values component-wise, treating `NaN` as equal to `NaN`.
    pub fn same(&self, other: &Complex) -> bool {
        let part = |a: f64, b: f64| a == b || (a.is_nan() && b.is_nan());
        part(self.re, other.re) && part(self.im, other.im)
    }

    /// Rounds both parts with [`real::round`].
    pub fn round(&self, digits: i32) -> Complex {
        Complex::new(real::round(self.re, digits), real::round(self.im, digits))
    }

    /// The complex conjugate.
    pub fn conj(&self) -> Complex {
        Complex::new(self.re, -self.im)
    }

    /// Converts each part from an angle in the given mode to radians.
    pub(crate) fn to_radians(self, mode: TrigMode) -> Complex {
        Complex::new(mode.to_radians(self.re), mode.to_radians(self.im))
    }

    /// Converts each part from radians to an angle in the given mode.
    pub(crate) fn from_radians(self, mode: TrigMode) -> Complex {
        Complex::new(mode.from_radians(self.re), mode.from_radians(self.im))
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Complex::real(re)
    }
}

/// Returns the argument (angle) of `c` in radians, in `(-pi, pi]`. The argument of zero is
/// `NaN`.
pub fn arg(c: Complex) -> f64 {
    let Complex { re, im } = c;
    if re > 0.0 {
        real::trigonometry::arctan_radians(im / re)
    } else if re < 0.0 && im >= 0.0 {
        real::trigonometry::arctan_radians(im / re) + *PI
    } else if re < 0.0 && im < 0.0 {
        real::trigonometry::arctan_radians(im / re) - *PI
    } else if re == 0.0 && im > 0.0 {
        *PI / 2.0
    } else if re == 0.0 && im < 0.0 {
        -*PI / 2.0
    } else {
        f64::NAN
    }
}

/// Returns the magnitude of `c`.
pub fn abs(c: Complex) -> f64 {
    if c.re.is_infinite() || c.im.is_infinite() {
        return f64::INFINITY;
    }
    real::sqrt(c.re * c.re + c.im * c.im)
}

/// Returns the magnitude and argument of `c`.
pub fn to_polar(c: Complex) -> (f64, f64) {
    (abs(c), arg(c))
}

/// Builds a complex number from a magnitude and an argument in radians. A component whose
/// trigonometric factor is exactly zero is set to zero, so that infinite magnitudes do not
/// produce `inf * 0 = NaN`.
pub fn to_rect(magnitude: f64, angle: f64) -> Complex {
    if magnitude == 0.0 {
        return Complex::ZERO;
    }

    let cos = real::cos(angle, TrigMode::Radians);
    let sin = real::sin(angle, TrigMode::Radians);
    if cos == 0.0 {
        Complex::new(0.0, magnitude * sin)
    } else if sin == 0.0 {
        Complex::new(magnitude * cos, 0.0)
    } else {
        Complex::new(magnitude * cos, magnitude * sin)
    }
}

/// Returns the sum of all the values.
pub fn add(values: &[Complex]) -> Complex {
    values.iter().fold(Complex::ZERO, |acc, c| Complex::new(acc.re + c.re, acc.im + c.im))
}

/// Returns `a - b`.
pub fn subtract(a: Complex, b: Complex) -> Complex {
    Complex::new(a.re - b.re, a.im - b.im)
}

/// Returns `a * b`. Operands with an infinite magnitude are multiplied in polar form.
pub fn multiply2(a: Complex, b: Complex) -> Complex {
    if a.is_real() && b.is_real() {
        return Complex::real(a.re * b.re);
    }

    let (abs_a, abs_b) = (abs(a), abs(b));
    if abs_a.is_infinite() || abs_b.is_infinite() {
        return to_rect(abs_a * abs_b, arg(a) + arg(b));
    }

    Complex::new(a.re * b.re - a.im * b.im, a.re * b.im + a.im * b.re)
}

/// Returns the product of all the values.
pub fn multiply(values: &[Complex]) -> Complex {
    values.iter().fold(Complex::ONE, |acc, &c| multiply2(acc, c))
}

/// Returns `a / b`. Division by zero gives positive real infinity; operands with an infinite
/// magnitude are divided in polar form.
pub fn divide(a: Complex, b: Complex) -> Complex {
    if a.is_real() && b.is_real() {
        return Complex::real(a.re / b.re);
    }
    if b == Complex::ZERO {
        return Complex::INFINITY;
    }

    let (abs_a, abs_b) = (abs(a), abs(b));
    if abs_a.is_infinite() || abs_b.is_infinite() {
        return to_rect(abs_a / abs_b, arg(a) - arg(b));
    }

    let denominator = b.re * b.re + b.im * b.im;
    Complex::new(
        (a.re * b.re + a.im * b.im) / denominator,
        (a.im * b.re - a.re * b.im) / denominator,
    )
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        add(&[self, rhs])
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        subtract(self, rhs)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        multiply2(self, rhs)
    }
}

impl Div for Complex {
    type Output = Complex;

    fn div(self, rhs: Complex) -> Complex {
        divide(self, rhs)
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use pretty_assertions::assert_eq;
    use super::*;

    fn assert_close(a: Complex, b: Complex, epsilon: f64) {
        assert_float_absolute_eq!(a.re, b.re, epsilon);
        assert_float_absolute_eq!(a.im, b.im, epsilon);
    }

    const SAMPLES: [Complex; 6] = [
        Complex::new(1.0, 2.0),
        Complex::new(-3.5, 0.25),
        Complex::new(0.0, -4.0),
        Complex::new(7.0, 0.0),
        Complex::new(-0.125, -9.0),
        Complex::new(1e6, 1e-3),
    ];

    #[test]
    fn argument_quadrants() {
        assert_float_absolute_eq!(arg(Complex::new(1.0, 1.0)), std::f64::consts::FRAC_PI_4, 1e-14);
        assert_float_absolute_eq!(arg(Complex::new(-1.0, 1.0)), 3.0 * std::f64::consts::FRAC_PI_4, 1e-14);
        assert_float_absolute_eq!(arg(Complex::new(-1.0, -1.0)), -3.0 * std::f64::consts::FRAC_PI_4, 1e-14);
        assert_float_absolute_eq!(arg(Complex::new(0.0, 2.0)), std::f64::consts::FRAC_PI_2, 1e-14);
        assert_float_absolute_eq!(arg(Complex::new(-2.0, 0.0)), std::f64::consts::PI, 1e-14);
        assert!(arg(Complex::ZERO).is_nan());
    }

    #[test]
    fn add_cancels_subtraction() {
        for c1 in SAMPLES {
            for c2 in SAMPLES {
                assert_eq!(add(&[c1, subtract(c2, c2)]), c1);
            }
        }
    }

    #[test]
    fn reciprocal() {
        for c in SAMPLES {
            assert_close(multiply(&[c, divide(Complex::ONE, c)]), Complex::ONE, 1e-12);
        }
    }

    #[test]
    fn product() {
        assert_eq!(Complex::new(1.0, 2.0) * Complex::new(3.0, -1.0), Complex::new(5.0, 5.0));
        assert_eq!(Complex::I * Complex::I, Complex::real(-1.0));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(divide(Complex::ONE, Complex::ZERO), Complex::INFINITY);
        assert_eq!(divide(Complex::I, Complex::ZERO), Complex::INFINITY);
    }

    #[test]
    fn infinite_magnitudes_keep_direction() {
        let product = multiply2(Complex::INFINITY, Complex::I);
        assert_eq!(product.re, 0.0);
        assert_eq!(product.im, f64::INFINITY);

        let quotient = divide(Complex::I, Complex::new(f64::INFINITY, 0.0));
        assert_eq!(quotient, Complex::ZERO);
    }

    #[test]
    fn polar_round_trip() {
        for c in SAMPLES {
            let (r, theta) = to_polar(c);
            assert_close(to_rect(r, theta), c, 1e-9 * r.max(1.0));
        }
    }
}
