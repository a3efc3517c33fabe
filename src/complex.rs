//! Complex number value type used by the filter design engine.
//!
//! Arithmetic is implemented directly on the two components so results match
//! the textbook formulas bit for bit. The transcendental functions in
//! [`complex_math`] delegate to `num-complex`.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use num_complex::Complex64;

/// Complex number with `f64` real and imaginary parts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub const fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    /// Purely real value
    pub const fn from_real(real: f64) -> Self {
        Self { real, imag: 0.0 }
    }

    /// `re² + im²`
    pub fn squared_norm(&self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }

    /// Euclidean length of the number
    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    /// Phase angle in radians
    pub fn arg(&self) -> f64 {
        self.imag.atan2(self.real)
    }

    /// Pre-increment: steps the real part only.
    pub fn increment(&mut self) -> &mut Self {
        self.real += 1.0;
        self
    }

    /// Post-increment: steps the real part and returns the previous value.
    pub fn post_increment(&mut self) -> Self {
        let previous = *self;
        self.real += 1.0;
        previous
    }

    /// Pre-decrement: steps the real part only.
    pub fn decrement(&mut self) -> &mut Self {
        self.real -= 1.0;
        self
    }

    /// Post-decrement: steps the real part and returns the previous value.
    pub fn post_decrement(&mut self) -> Self {
        let previous = *self;
        self.real -= 1.0;
        previous
    }
}

impl From<f64> for Complex {
    fn from(real: f64) -> Self {
        Self::from_real(real)
    }
}

impl From<Complex64> for Complex {
    fn from(z: Complex64) -> Self {
        Self::new(z.re, z.im)
    }
}

impl From<Complex> for Complex64 {
    fn from(z: Complex) -> Self {
        Complex64::new(z.real, z.imag)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "({:.*}, {:.*})", p, self.real, p, self.imag),
            None => write!(f, "({}, {})", self.real, self.imag),
        }
    }
}

// complex (op) complex

impl Add for Complex {
    type Output = Complex;

    fn add(self, other: Complex) -> Complex {
        Complex::new(self.real + other.real, self.imag + other.imag)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, other: Complex) -> Complex {
        Complex::new(self.real - other.real, self.imag - other.imag)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, other: Complex) -> Complex {
        Complex::new(
            self.real * other.real - self.imag * other.imag,
            self.real * other.imag + self.imag * other.real,
        )
    }
}

impl Div for Complex {
    type Output = Complex;

    fn div(self, other: Complex) -> Complex {
        let denominator = other.real * other.real + other.imag * other.imag;
        Complex::new(
            (self.real * other.real + self.imag * other.imag) / denominator,
            (self.imag * other.real - self.real * other.imag) / denominator,
        )
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, other: Complex) {
        *self = *self + other;
    }
}

impl SubAssign for Complex {
    fn sub_assign(&mut self, other: Complex) {
        *self = *self - other;
    }
}

impl MulAssign for Complex {
    fn mul_assign(&mut self, other: Complex) {
        *self = *self * other;
    }
}

impl DivAssign for Complex {
    fn div_assign(&mut self, other: Complex) {
        *self = *self / other;
    }
}

// complex (op) real

impl Add<f64> for Complex {
    type Output = Complex;

    fn add(self, val: f64) -> Complex {
        Complex::new(self.real + val, self.imag)
    }
}

impl Sub<f64> for Complex {
    type Output = Complex;

    fn sub(self, val: f64) -> Complex {
        Complex::new(self.real - val, self.imag)
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;

    fn mul(self, val: f64) -> Complex {
        Complex::new(self.real * val, self.imag * val)
    }
}

impl Div<f64> for Complex {
    type Output = Complex;

    fn div(self, val: f64) -> Complex {
        Complex::new(self.real / val, self.imag / val)
    }
}

impl AddAssign<f64> for Complex {
    fn add_assign(&mut self, val: f64) {
        self.real += val;
    }
}

impl SubAssign<f64> for Complex {
    fn sub_assign(&mut self, val: f64) {
        self.real -= val;
    }
}

impl MulAssign<f64> for Complex {
    fn mul_assign(&mut self, val: f64) {
        self.real *= val;
        self.imag *= val;
    }
}

impl DivAssign<f64> for Complex {
    fn div_assign(&mut self, val: f64) {
        self.real /= val;
        self.imag /= val;
    }
}

// real (op) complex

impl Add<Complex> for f64 {
    type Output = Complex;

    fn add(self, right: Complex) -> Complex {
        Complex::new(self + right.real, right.imag)
    }
}

impl Sub<Complex> for f64 {
    type Output = Complex;

    fn sub(self, right: Complex) -> Complex {
        Complex::new(self - right.real, -right.imag)
    }
}

impl Mul<Complex> for f64 {
    type Output = Complex;

    fn mul(self, right: Complex) -> Complex {
        Complex::new(self * right.real, self * right.imag)
    }
}

impl Div<Complex> for f64 {
    type Output = Complex;

    fn div(self, right: Complex) -> Complex {
        let denominator = right.real * right.real + right.imag * right.imag;
        Complex::new(
            self * right.real / denominator,
            -self * right.imag / denominator,
        )
    }
}

/// Complex functions
pub mod complex_math {
    use super::Complex;
    use num_complex::Complex64;

    fn lift(z: Complex, f: impl FnOnce(Complex64) -> Complex64) -> Complex {
        f(z.into()).into()
    }

    pub fn conjugate(z: Complex) -> Complex {
        Complex::new(z.real, -z.imag)
    }

    /// Integer power by repeated squaring.
    ///
    /// The accumulator is seeded with `z` for odd exponents and `1` for even
    /// ones, so `pow(z, 0) == 1` and `pow(z, 1) == z` without entering the loop.
    pub fn pow(z: Complex, mut exponent: u32) -> Complex {
        let mut x = z;
        let mut y = if exponent % 2 == 1 {
            z
        } else {
            Complex::from_real(1.0)
        };

        exponent >>= 1;
        while exponent != 0 {
            x = x * x;
            if exponent % 2 == 1 {
                y = y * x;
            }
            exponent >>= 1;
        }

        y
    }

    /// `z^w` with a complex exponent (principal branch).
    pub fn powc(z: Complex, w: Complex) -> Complex {
        lift(z, |z| z.powc(w.into()))
    }

    pub fn sqrt(z: Complex) -> Complex {
        lift(z, |z| z.sqrt())
    }

    pub fn exp(z: Complex) -> Complex {
        lift(z, |z| z.exp())
    }

    /// `exp(i·x)`
    pub fn exp_j(x: f64) -> Complex {
        exp(Complex::new(0.0, x))
    }

    pub fn log(z: Complex) -> Complex {
        lift(z, |z| z.ln())
    }

    pub fn sin(z: Complex) -> Complex {
        lift(z, |z| z.sin())
    }

    pub fn cos(z: Complex) -> Complex {
        lift(z, |z| z.cos())
    }

    pub fn tan(z: Complex) -> Complex {
        lift(z, |z| z.tan())
    }

    pub fn asin(z: Complex) -> Complex {
        lift(z, |z| z.asin())
    }

    pub fn acos(z: Complex) -> Complex {
        lift(z, |z| z.acos())
    }

    pub fn sinh(z: Complex) -> Complex {
        lift(z, |z| z.sinh())
    }

    pub fn cosh(z: Complex) -> Complex {
        lift(z, |z| z.cosh())
    }

    pub fn asinh(z: Complex) -> Complex {
        lift(z, |z| z.asinh())
    }

    pub fn acosh(z: Complex) -> Complex {
        lift(z, |z| z.acosh())
    }

    /// True if either component is non-finite
    pub fn is_inf(z: Complex) -> bool {
        is_non_finite(z)
    }

    /// True if either component is non-finite, infinities included
    pub fn is_nan(z: Complex) -> bool {
        is_non_finite(z)
    }

    fn is_non_finite(z: Complex) -> bool {
        !z.real.is_finite() || !z.imag.is_finite()
    }
}
