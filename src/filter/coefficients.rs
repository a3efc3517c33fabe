use serde::Serialize;

use crate::complex::{Complex, complex_math};

/// Normal-form filter coefficients
///
/// `poles` holds the denominator and `zeroes` the numerator polynomial,
/// lowest degree first. The pole and zero counts are the vector lengths.
/// A filter with no poles is a FIR filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCoefficients {
    pub(crate) poles: Vec<f64>,
    pub(crate) zeroes: Vec<f64>,
}

impl FilterCoefficients {
    /// Zero-filled coefficients with the given counts
    pub fn new(num_zeroes: usize, num_poles: usize) -> Self {
        Self {
            poles: vec![0.0; num_poles],
            zeroes: vec![0.0; num_zeroes],
        }
    }

    /// Build coefficients from explicit numerator and denominator values
    pub fn from_parts(zeroes: Vec<f64>, poles: Vec<f64>) -> Self {
        Self { poles, zeroes }
    }

    pub fn poles(&self) -> &[f64] {
        &self.poles
    }

    pub fn zeroes(&self) -> &[f64] {
        &self.zeroes
    }

    pub fn num_poles(&self) -> usize {
        self.poles.len()
    }

    pub fn num_zeroes(&self) -> usize {
        self.zeroes.len()
    }

    pub fn is_fir(&self) -> bool {
        self.poles.is_empty()
    }

    pub fn clear(&mut self) {
        self.poles.clear();
        self.zeroes.clear();
    }

    pub fn is_initialized(&self) -> bool {
        !(self.poles.is_empty() && self.zeroes.is_empty())
    }

    /// Evaluate `numerator(z) / denominator(z)` with both polynomials in
    /// Horner form, highest degree first.
    pub fn evaluate_response(&self, z: Complex) -> Complex {
        let top = horner(&self.zeroes, z);
        let bot = horner(&self.poles, z);
        top / bot
    }

    /// Evaluate the transfer function `H(z) = Y(z) / X(z)`.
    ///
    /// The numerator keeps only the highest-index zero term
    /// `zeroes[n] * z^-n` instead of summing over all zeroes; existing
    /// callers depend on that result.
    pub fn evaluate_transfer_function(&self, z: Complex) -> Complex {
        let sum_x = if self.is_fir() {
            Complex::from_real(1.0)
        } else {
            self.poles
                .iter()
                .enumerate()
                .fold(Complex::default(), |sum, (p, &pole)| {
                    sum + pole * (1.0 / complex_math::pow(z, p as u32))
                })
        };

        let mut sum_y = Complex::default();
        for (n, &zero) in self.zeroes.iter().enumerate() {
            sum_y = zero * (1.0 / complex_math::pow(z, n as u32));
        }

        sum_y / sum_x
    }

    /// Write the coefficients to the debug log
    pub fn log(&self) {
        log::debug!(
            "FilterCoefficients: {} poles and {} zeroes",
            self.num_poles(),
            self.num_zeroes()
        );
        log::debug!("Poles: {}", join_coefficients(&self.poles));
        log::debug!("Zeroes: {}", join_coefficients(&self.zeroes));
    }
}

fn horner(coeffs: &[f64], z: Complex) -> Complex {
    coeffs
        .iter()
        .rev()
        .fold(Complex::default(), |acc, &c| acc * z + c)
}

/// `%.12f, `-joined list of coefficient values
pub(crate) fn join_coefficients(values: &[f64]) -> String {
    values.iter().map(|v| format!("{:.12}, ", v)).collect()
}
