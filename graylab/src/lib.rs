//! graylab - Classical grayscale image analysis for Rust
//!
//! # Overview
//!
//! graylab implements a set of classical single-channel image analysis
//! algorithms on decoded 8-bit rasters:
//!
//! - Convolution with Gaussian, Laplacian-of-Gaussian and Sobel kernels
//! - Canny and Marr-Hildreth edge detection
//! - Otsu binarization
//! - Marker-controlled watershed segmentation
//! - Freeman chain code boundary tracing
//! - Connected component labeling and object counting
//!
//! Every call owns its inputs and outputs; nothing is shared between
//! calls. Image file decoding and encoding are left to the caller.
//!
//! # Example
//!
//! ```
//! use graylab::Raster;
//! use graylab::filter::{CannyOptions, canny};
//!
//! let raster = Raster::from_fn(32, 32, |x, _| if x < 16 { 0 } else { 255 }).unwrap();
//! let edges = canny(&raster, &CannyOptions::default()).unwrap();
//! assert_eq!(edges.dimensions(), (32, 32));
//! ```

pub mod analysis;
pub mod config;
mod error;

// Re-export core types (primary data structures used everywhere)
pub use graylab_core::{
    Error, ErrorKind, FRaster, GRAY_LEVELS, LabelField, NEIGHBORS_4, NEIGHBORS_8, Raster,
    Result, UNLABELED, WATERSHED_LINE, offset_within,
};

// Re-export domain crates as modules to avoid name conflicts
pub use graylab_filter as filter;
pub use graylab_region as region;
pub use graylab_threshold as threshold;

pub use analysis::{AnalysisOutput, run};
pub use config::{AnalysisConfig, Operation, load_config};
pub use error::{GraylabError, GraylabResult};
