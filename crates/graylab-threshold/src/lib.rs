//! graylab-threshold - Binarization of 8-bit rasters
//!
//! This crate provides:
//!
//! - Fixed-level binarization
//! - Otsu's method (between-class variance maximization)

mod error;
pub mod threshold;

pub use error::{ThresholdError, ThresholdResult};
pub use threshold::{
    compute_otsu_threshold, otsu_threshold_histogram, threshold_otsu, threshold_to_binary,
};
