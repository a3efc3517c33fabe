pub mod complex;
pub mod config;
pub mod error;
pub mod filter;
pub mod report;
pub mod wav;

pub use complex::{Complex, complex_math};
pub use config::DesignConfig;
pub use error::{FilterError, Result};
pub use filter::{
    Filter, FilterCascade, FilterCoefficients, FilterMethod, FilterSettings, FilterType,
    TransformType, compute_coefficients, create_filter,
};
