//! Marr-Hildreth edge detection
//!
//! Filters the normalized input with a zero-mean Laplacian-of-Gaussian and
//! marks zero crossings whose local contrast exceeds a threshold.

use crate::convolve::convolve;
use crate::{FilterError, FilterResult, Kernel};
use graylab_core::{FRaster, Raster};
use log::debug;
use serde::{Deserialize, Serialize};

/// Options for Marr-Hildreth edge detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarrHildrethOptions {
    /// Standard deviation of the LoG kernel
    pub sigma: f32,
    /// Minimum `max - min` spread of a 3x3 neighborhood for an edge.
    /// Zero-crossing detection has no meaning without it.
    pub threshold: Option<f32>,
}

impl Default for MarrHildrethOptions {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            threshold: Some(0.1),
        }
    }
}

impl MarrHildrethOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set LoG sigma
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the zero-crossing threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Clear the zero-crossing threshold
    pub fn without_threshold(mut self) -> Self {
        self.threshold = None;
        self
    }
}

/// Detect edges as thresholded zero crossings of the LoG response
///
/// # Errors
///
/// * [`FilterError::MissingParameter`] if `options.threshold` is `None`
/// * [`FilterError::InvalidParameters`] if `options.sigma <= 0`
pub fn marr_hildreth(raster: &Raster, options: &MarrHildrethOptions) -> FilterResult<Raster> {
    let threshold = options
        .threshold
        .ok_or(FilterError::MissingParameter("threshold"))?;

    let kernel = Kernel::log(options.sigma)?;
    debug!(
        "marr-hildreth: sigma={} kernel={}x{} threshold={}",
        options.sigma,
        kernel.size(),
        kernel.size(),
        threshold
    );

    let filtered = convolve(&raster.to_fraster_normalized(), &kernel)?;
    zero_crossings(&filtered, threshold)
}

/// Mark interior pixels whose 3x3 neighborhood changes sign with enough spread
///
/// A pixel becomes 255 when the neighborhood minimum is negative, the
/// maximum is positive and `max - min > threshold`. The outer frame is 0.
pub fn zero_crossings(filtered: &FRaster, threshold: f32) -> FilterResult<Raster> {
    let (w, h) = filtered.dimensions();
    let mut out = Raster::new(w, h)?;
    if w < 3 || h < 3 {
        return Ok(out);
    }

    let mut edges = 0usize;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut min = f32::INFINITY;
            let mut max = f32::NEG_INFINITY;
            for ny in y - 1..=y + 1 {
                for nx in x - 1..=x + 1 {
                    let v = filtered.get_pixel_unchecked(nx, ny);
                    min = min.min(v);
                    max = max.max(v);
                }
            }
            if min < 0.0 && max > 0.0 && max - min > threshold {
                out.set_pixel_unchecked(x, y, 255);
                edges += 1;
            }
        }
    }
    debug!("marr-hildreth: {} edge pixels", edges);
    Ok(out)
}
