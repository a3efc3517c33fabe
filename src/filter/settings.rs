use serde::{Deserialize, Serialize};

use super::{FilterCoefficients, FilterMethod, FilterType};
use crate::error::{FilterError, Result};

/// Filter specification plus the coefficients designed from it
///
/// The design engine writes `coefficients` and `gain`; everything else is
/// configuration. `gain` is `-1.0` until a design has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Sample rate in Hz
    pub sample_rate: f64,
    pub filter_type: FilterType,
    pub filter_method: FilterMethod,
    pub filter_order: u32,
    /// Number of identical filters chained one after another
    pub cascade_length: u32,
    /// Lower cutoff in Hz (the only cutoff used by lowpass and highpass)
    pub low_cut_frequency: f64,
    /// Upper cutoff in Hz (bandpass and bandstop)
    pub high_cut_frequency: f64,
    /// Passband ripple in dB for Chebyshev designs, must be negative
    pub chebyshev_ripple: f64,
    #[serde(skip)]
    pub gain: f64,
    #[serde(skip)]
    pub coefficients: FilterCoefficients,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            sample_rate: 0.0,
            filter_type: FilterType::Lowpass,
            filter_method: FilterMethod::Butterworth,
            filter_order: 3,
            cascade_length: 1,
            low_cut_frequency: 7.0,
            high_cut_frequency: 12.0,
            chebyshev_ripple: -10.0,
            gain: -1.0,
            coefficients: FilterCoefficients::default(),
        }
    }
}

impl FilterSettings {
    /// Drop any designed coefficients so the next design starts fresh
    pub fn reset_design(&mut self) {
        self.coefficients.clear();
        self.gain = -1.0;
    }

    /// Whether a design has produced usable coefficients
    pub fn is_designed(&self) -> bool {
        self.coefficients.is_initialized()
    }

    /// Check the settings before handing it to the design engine
    ///
    /// # Errors
    /// Returns `FilterError::Config` describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        if !(self.sample_rate > 0.0) {
            return Err(FilterError::Config(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.filter_order == 0 {
            return Err(FilterError::Config("filter order must be at least 1".into()));
        }
        if self.cascade_length == 0 {
            return Err(FilterError::Config(
                "cascade length must be at least 1".into(),
            ));
        }

        let nyquist = self.sample_rate / 2.0;
        if !(self.low_cut_frequency > 0.0 && self.low_cut_frequency < nyquist) {
            return Err(FilterError::Config(format!(
                "low cut frequency {} Hz must lie in (0, {}) Hz",
                self.low_cut_frequency, nyquist
            )));
        }
        if self.filter_type.is_band()
            && !(self.high_cut_frequency > self.low_cut_frequency
                && self.high_cut_frequency < nyquist)
        {
            return Err(FilterError::Config(format!(
                "high cut frequency {} Hz must lie in ({}, {}) Hz",
                self.high_cut_frequency, self.low_cut_frequency, nyquist
            )));
        }
        if self.filter_method.is_chebyshev() && !(self.chebyshev_ripple < 0.0) {
            return Err(FilterError::Config(format!(
                "Chebyshev ripple must be negative, got {} dB",
                self.chebyshev_ripple
            )));
        }

        Ok(())
    }

    /// Write a one-line summary to the debug log
    pub fn log(&self) {
        log::debug!(
            "FilterSettings: Type {} ({}) of order {} with low={:.2} and high={:.2} using a sample rate of {:.2}",
            self.filter_type as u32,
            self.filter_type.short_name(),
            self.filter_order,
            self.low_cut_frequency,
            self.high_cut_frequency,
            self.sample_rate
        );
    }
}
