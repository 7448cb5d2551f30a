//! graylab-filter - Convolution and edge detection
//!
//! This crate provides the filtering stages used by graylab:
//!
//! - Square odd-sided kernels (Gaussian, Laplacian-of-Gaussian, Sobel)
//! - Convolution with replicate border handling
//! - Sobel gradient magnitude and direction
//! - Canny edge detection, with each stage callable on its own
//! - Marr-Hildreth (LoG zero-crossing) edge detection

pub mod canny;
pub mod convolve;
mod error;
pub mod gradient;
pub mod kernel;
pub mod marr_hildreth;

pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, MAX_KERNEL_SIZE, size_for_sigma};

// Re-export commonly used functions
pub use canny::{CannyOptions, canny, double_threshold, hysteresis, non_max_suppression};
pub use convolve::{convolve, convolve_raster, gaussian_smooth};
pub use gradient::{GradientField, sobel_gradient, sobel_magnitude};
pub use marr_hildreth::{MarrHildrethOptions, marr_hildreth, zero_crossings};
