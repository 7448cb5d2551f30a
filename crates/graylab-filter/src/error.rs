//! Error types for graylab-filter

use graylab_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during filtering and edge detection
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] graylab_core::Error),

    /// Invalid kernel (even side, wrong data length)
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Required parameter not supplied
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
}

impl FilterError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::Core(e) => e.kind(),
            FilterError::InvalidKernel(_) | FilterError::InvalidParameters(_) => {
                ErrorKind::InvalidParameter
            }
            FilterError::MissingParameter(_) => ErrorKind::MissingParameter,
        }
    }
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
