use chrono::Utc;
use serde::Serialize;

use crate::filter::coefficients::join_coefficients;
use crate::filter::{FilterSettings, TransformType, generator::select_transform};

/// Summary of a finished design, for printing or JSON export
#[derive(Debug, Clone, Serialize)]
pub struct DesignReport {
    pub generated_at: String,
    pub method: String,
    pub filter_type: String,
    pub transform: String,
    pub order: u32,
    pub sample_rate: f64,
    pub low_cut_frequency: f64,
    pub high_cut_frequency: f64,
    pub gain: f64,
    pub poles: Vec<f64>,
    pub zeroes: Vec<f64>,
}

impl DesignReport {
    /// `requested` is resolved to the transform the design engine applies.
    pub fn new(settings: &FilterSettings, requested: TransformType) -> Self {
        let transform = select_transform(settings.filter_method, requested);
        Self {
            generated_at: iso8601_timestamp(),
            method: settings.filter_method.name().to_string(),
            filter_type: settings.filter_type.name().to_string(),
            transform: transform.name().to_string(),
            order: settings.filter_order,
            sample_rate: settings.sample_rate,
            low_cut_frequency: settings.low_cut_frequency,
            high_cut_frequency: settings.high_cut_frequency,
            gain: settings.gain,
            poles: settings.coefficients.poles().to_vec(),
            zeroes: settings.coefficients.zeroes().to_vec(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} {} of order {} ({}), fs={:.2} Hz, low={:.2} Hz, high={:.2} Hz\n",
            self.method,
            self.filter_type,
            self.order,
            self.transform,
            self.sample_rate,
            self.low_cut_frequency,
            self.high_cut_frequency
        ));
        out.push_str(&format!("Gain: {:.12}\n", self.gain));
        out.push_str(&format!(
            "{} poles and {} zeroes\n",
            self.poles.len(),
            self.zeroes.len()
        ));
        out.push_str(&format!("Poles: {}\n", join_coefficients(&self.poles)));
        out.push_str(&format!("Zeroes: {}\n", join_coefficients(&self.zeroes)));
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
