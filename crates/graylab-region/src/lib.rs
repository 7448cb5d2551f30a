//! graylab-region - Region processing for graylab
//!
//! This crate provides region processing functionality including:
//!
//! - **Connected component labeling** - 4-connected flood-fill labels
//! - **Boundary tracing** - Freeman chain codes of object outlines
//! - **Watershed segmentation** - Marker-controlled priority flooding
//! - **Object counting** - Component or contour counts after binarization
//!
//! # Examples
//!
//! ## Counting objects
//!
//! ```
//! use graylab_region::{ObjectCountMethod, count_objects};
//! use graylab_core::Raster;
//!
//! let raster = Raster::from_fn(8, 4, |x, y| {
//!     if y == 1 && (x == 1 || x == 2 || x == 5) { 255 } else { 0 }
//! })
//! .unwrap();
//!
//! let method: ObjectCountMethod = "ccl".parse().unwrap();
//! let count = count_objects(&raster, 128, method).unwrap();
//! assert_eq!(count.object_count, 2);
//! ```
//!
//! ## Watershed segmentation
//!
//! ```
//! use graylab_region::{WatershedOptions, watershed_segment};
//! use graylab_core::Raster;
//!
//! let raster = Raster::from_fn(16, 16, |x, _| if x < 8 { 40 } else { 200 }).unwrap();
//! let result = watershed_segment(&raster, &WatershedOptions::low_gradient()).unwrap();
//! assert_eq!(result.rendered.dimensions(), (16, 16));
//! ```

pub mod chain;
pub mod conncomp;
pub mod count;
pub mod error;
pub mod watershed;

// Re-export core types
pub use graylab_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export conncomp functions
pub use conncomp::{FOREGROUND, binarize, count_components, label_components};

// Re-export chain code types and functions
pub use chain::{
    ChainCode, Contour, ContourPoint, ContourSet, Direction, TraceOptions, is_boundary,
    trace_binary, trace_boundaries,
};

// Re-export counting types and functions
pub use count::{ObjectCount, ObjectCountMethod, count_objects};

// Re-export watershed types and functions
pub use watershed::{
    BoundaryPolarity, MarkerPolicy, WatershedOptions, WatershedResult, flood,
    markers_low_gradient, markers_otsu_two_class, normalize_min_max, render_labels,
    watershed_segment,
};
