//! Error types for graylab-threshold

use graylab_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during thresholding
#[derive(Debug, Error)]
pub enum ThresholdError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] graylab_core::Error),

    /// Histogram does not describe any pixels
    #[error("empty histogram: no pixels to threshold")]
    EmptyHistogram,
}

impl ThresholdError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ThresholdError::Core(e) => e.kind(),
            ThresholdError::EmptyHistogram => ErrorKind::InvalidInput,
        }
    }
}

/// Result type for threshold operations
pub type ThresholdResult<T> = Result<T, ThresholdError>;
