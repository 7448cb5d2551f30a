//! Error types for the graylab umbrella crate

use graylab_core::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by configuration loading and dispatch
#[derive(Debug, Error)]
pub enum GraylabError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] graylab_core::Error),

    /// Filtering or edge detection failed
    #[error(transparent)]
    Filter(#[from] graylab_filter::FilterError),

    /// Thresholding failed
    #[error(transparent)]
    Threshold(#[from] graylab_threshold::ThresholdError),

    /// Region processing failed
    #[error(transparent)]
    Region(#[from] graylab_region::RegionError),

    /// Configuration file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is not valid JSON for [`crate::config::AnalysisConfig`]
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration parsed but holds out-of-range values
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl GraylabError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraylabError::Core(e) => e.kind(),
            GraylabError::Filter(e) => e.kind(),
            GraylabError::Threshold(e) => e.kind(),
            GraylabError::Region(e) => e.kind(),
            GraylabError::Json(_) | GraylabError::InvalidConfig(_) => ErrorKind::InvalidParameter,
            GraylabError::Io { .. } => ErrorKind::Internal,
        }
    }
}

/// Result type for umbrella operations
pub type GraylabResult<T> = Result<T, GraylabError>;
