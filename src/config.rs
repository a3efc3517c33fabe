//! Filter design configuration files.
//!
//! A design is described by a small TOML file. Every field is optional and
//! falls back to the [`FilterSettings`] defaults:
//!
//! ```toml
//! transform = "automatic"
//!
//! [filter]
//! sample_rate = 256.0
//! filter_type = "bandpass"
//! filter_method = "butterworth"
//! filter_order = 4
//! cascade_length = 1
//! low_cut_frequency = 8.0
//! high_cut_frequency = 12.0
//! chebyshev_ripple = -10.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::filter::{FilterSettings, TransformType};

/// Filter specification together with the requested S-to-Z mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    pub transform: TransformType,
    pub filter: FilterSettings,
}

impl DesignConfig {
    /// Read and parse a TOML design file
    ///
    /// # Errors
    /// Returns `FilterError::Config` if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FilterError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse a TOML design description
    ///
    /// # Errors
    /// Returns `FilterError::Config` on malformed TOML or unknown enum names
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FilterError::Config(e.to_string()))
    }
}
