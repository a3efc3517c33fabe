//! IIR filter design and direct-form evaluation.
//!
//! The design engine in [`generator`] turns a [`FilterSettings`] into normal
//! form [`FilterCoefficients`]; a [`Filter`] then runs those coefficients one
//! sample at a time.

pub mod coefficients;
pub mod generator;
pub mod pole_zero;
pub mod response;
pub mod runtime;
pub mod settings;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use coefficients::FilterCoefficients;
pub use generator::{compute_coefficients, compute_coefficients_iir, create_filter};
pub use pole_zero::ComplexCoefficients;
pub use response::{FrequencyResponse, ResponsePoint};
pub use runtime::{Filter, FilterCascade, evaluate_direct_form, is_unstable_output};
pub use settings::FilterSettings;

/// Response shape of a filter
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FilterType {
    #[default]
    Lowpass,
    Highpass,
    Bandpass,
    Bandstop,
}

impl FilterType {
    pub fn name(&self) -> &'static str {
        match self {
            FilterType::Lowpass => "Lowpass",
            FilterType::Highpass => "Highpass",
            FilterType::Bandpass => "Bandpass",
            FilterType::Bandstop => "Bandstop",
        }
    }

    /// Two-letter abbreviation used in log lines
    pub fn short_name(&self) -> &'static str {
        match self {
            FilterType::Lowpass => "LP",
            FilterType::Highpass => "HP",
            FilterType::Bandpass => "BP",
            FilterType::Bandstop => "BS",
        }
    }

    /// True for the types that use both cutoff frequencies
    pub fn is_band(&self) -> bool {
        matches!(self, FilterType::Bandpass | FilterType::Bandstop)
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Filter design method
///
/// Only the Butterworth family (Butterworth, Chebyshev I and II) has a
/// working prototype. The remaining methods are recognised so that
/// configurations naming them are rejected instead of approximated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMethod {
    Bessel,
    #[default]
    Butterworth,
    Chebyshev,
    #[value(name = "chebyshev-ii")]
    #[serde(rename = "chebyshev-ii")]
    ChebyshevII,
    Elliptic,
    Hann,
    Hamming,
    Blackman,
    Sinc,
}

impl FilterMethod {
    pub fn name(&self) -> &'static str {
        match self {
            FilterMethod::Bessel => "Bessel",
            FilterMethod::Butterworth => "Butterworth",
            FilterMethod::Chebyshev => "Chebyshev I",
            FilterMethod::ChebyshevII => "Chebyshev II",
            FilterMethod::Elliptic => "Elliptic",
            FilterMethod::Hann => "Hann",
            FilterMethod::Hamming => "Hamming",
            FilterMethod::Blackman => "Blackman",
            FilterMethod::Sinc => "Sinc",
        }
    }

    /// Both Chebyshev variants warp the Butterworth pole placement
    pub fn is_chebyshev(&self) -> bool {
        matches!(self, FilterMethod::Chebyshev | FilterMethod::ChebyshevII)
    }

    /// Window-based FIR methods
    pub fn is_fir(&self) -> bool {
        matches!(
            self,
            FilterMethod::Hann | FilterMethod::Hamming | FilterMethod::Blackman | FilterMethod::Sinc
        )
    }
}

impl fmt::Display for FilterMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// S-plane to Z-plane mapping requested from the design engine
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum TransformType {
    /// Let the design engine choose
    #[default]
    Automatic,
    /// `s -> (2 + s) / (2 - s)` with pre-warped cutoffs
    BilinearTransform,
    /// `s -> exp(s)`
    MatchedZTransform,
}

impl TransformType {
    pub fn name(&self) -> &'static str {
        match self {
            TransformType::Automatic => "Automatic",
            TransformType::BilinearTransform => "Bilinear transform",
            TransformType::MatchedZTransform => "Matched Z-Transform",
        }
    }
}

impl fmt::Display for TransformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
