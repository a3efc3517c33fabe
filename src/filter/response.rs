use std::f64::consts::PI;

use serde::Serialize;

use super::FilterSettings;
use crate::complex::complex_math;

/// Magnitude reported for a response of exactly zero
pub const MAGNITUDE_FLOOR_DB: f64 = -120.0;

/// One sample of a magnitude response
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponsePoint {
    /// Frequency in Hz
    pub frequency: f64,
    /// Linear magnitude, 1.0 in the passband of a normalized design
    pub magnitude: f64,
    pub magnitude_db: f64,
}

/// Magnitude response of designed coefficients between DC and Nyquist
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrequencyResponse {
    pub points: Vec<ResponsePoint>,
}

impl FrequencyResponse {
    /// Sample `num_points` evenly spaced frequencies from 0 to `fs / 2`
    /// (both ends included).
    pub fn sweep(settings: &FilterSettings, num_points: usize) -> Self {
        let nyquist = settings.sample_rate / 2.0;
        let points = (0..num_points)
            .map(|i| {
                let frequency = if num_points > 1 {
                    nyquist * i as f64 / (num_points - 1) as f64
                } else {
                    0.0
                };
                let magnitude = magnitude_at(settings, frequency);
                ResponsePoint {
                    frequency,
                    magnitude,
                    magnitude_db: to_decibel(magnitude),
                }
            })
            .collect();

        Self { points }
    }

    /// Frequency whose magnitude is closest to -3 dB
    pub fn cutoff_estimate(&self) -> Option<f64> {
        self.points
            .iter()
            .filter(|p| p.magnitude_db.is_finite())
            .min_by(|a, b| {
                let da = (a.magnitude_db + 3.0).abs();
                let db = (b.magnitude_db + 3.0).abs();
                da.total_cmp(&db)
            })
            .map(|p| p.frequency)
    }
}

/// Linear magnitude `|H(e^{i·2πf/fs})| / gain` at `frequency` Hz
pub fn magnitude_at(settings: &FilterSettings, frequency: f64) -> f64 {
    let omega = 2.0 * PI * frequency / settings.sample_rate;
    let z = complex_math::exp_j(omega);
    settings.coefficients.evaluate_response(z).norm() / settings.gain
}

/// Magnitude in dB at `frequency` Hz
pub fn magnitude_db_at(settings: &FilterSettings, frequency: f64) -> f64 {
    to_decibel(magnitude_at(settings, frequency))
}

fn to_decibel(magnitude: f64) -> f64 {
    if magnitude > 0.0 {
        20.0 * magnitude.log10()
    } else {
        MAGNITUDE_FLOOR_DB
    }
}
