//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing regression test inputs
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a synthetic raster
    #[error("failed to build synthetic raster '{name}': {message}")]
    Synthesis { name: String, message: String },

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] graylab_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
