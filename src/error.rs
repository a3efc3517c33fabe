use thiserror::Error;

use crate::filter::FilterMethod;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Filter method {0} is not implemented")]
    NotImplemented(FilterMethod),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("WAV file error: {0}")]
    Wav(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
