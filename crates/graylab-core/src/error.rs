//! Error types for graylab-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.
//!
//! Algorithm crates wrap this type in their own error enums and classify
//! every failure through [`ErrorKind`], so a caller can tell a bad request
//! (input or parameter) apart from an internal failure.

use thiserror::Error;

/// Graylab error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Raster dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDimension { .. } => ErrorKind::InvalidInput,
            Error::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Error::IndexOutOfBounds { .. } | Error::DimensionMismatch { .. } => {
                ErrorKind::Internal
            }
        }
    }
}

/// Coarse classification of a failure.
///
/// `InvalidInput`, `InvalidParameter` and `MissingParameter` describe
/// problems with what the caller passed in; `Internal` covers everything
/// else and is terminal for the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Absent or empty raster
    InvalidInput,
    /// Parameter out of its valid domain
    InvalidParameter,
    /// Required parameter not supplied
    MissingParameter,
    /// Non-recoverable internal failure
    Internal,
}

/// Result type alias for graylab core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            Error::InvalidDimension {
                width: 0,
                height: 3
            }
            .kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            Error::InvalidParameter("sigma".into()).kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            Error::IndexOutOfBounds { index: 9, len: 4 }.kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_display() {
        let err = Error::DimensionMismatch {
            expected: (4, 3),
            actual: (2, 2),
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 4x3, got 2x2");
    }
}
