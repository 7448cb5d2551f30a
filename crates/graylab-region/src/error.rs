//! Error types for graylab-region

use graylab_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] graylab_core::Error),

    /// Filtering stage failed
    #[error("filter error: {0}")]
    Filter(#[from] graylab_filter::FilterError),

    /// Thresholding stage failed
    #[error("threshold error: {0}")]
    Threshold(#[from] graylab_threshold::ThresholdError),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Unknown object counting method
    #[error("unknown method: {0:?} (expected \"ccl\" or \"freeman\")")]
    UnknownMethod(String),
}

impl RegionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegionError::Core(e) => e.kind(),
            RegionError::Filter(e) => e.kind(),
            RegionError::Threshold(e) => e.kind(),
            RegionError::InvalidParameters(_) | RegionError::UnknownMethod(_) => {
                ErrorKind::InvalidParameter
            }
        }
    }
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
