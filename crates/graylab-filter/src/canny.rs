//! Canny edge detection
//!
//! Pipeline, in order:
//!
//! 1. Normalize samples to `[0, 1]`
//! 2. Smooth with a Gaussian of fixed side (default 5)
//! 3. Sobel gradient magnitude and direction
//! 4. Non-maximum suppression across the edge
//! 5. Double threshold into strong / weak / background
//! 6. One hysteresis pass over interior pixels
//!
//! The low threshold is relative to the high threshold, not to the global
//! maximum: `low_value = max * high_ratio * low_ratio`.
//!
//! Hysteresis is a single raster-order pass updated in place. A weak pixel
//! survives if one of its 8 neighbors is strong at the time it is visited,
//! so weak chains leading away from a strong pixel against the scan order
//! are not recovered.

use crate::convolve::gaussian_smooth;
use crate::gradient::{GradientField, sobel_gradient};
use crate::{FilterError, FilterResult};
use graylab_core::{FRaster, NEIGHBORS_8, Raster};
use log::debug;
use serde::{Deserialize, Serialize};

/// Value of a weak edge pixel in the double-threshold map
pub const WEAK: u8 = 25;

/// Value of a strong edge pixel
pub const STRONG: u8 = 255;

/// Options for Canny edge detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyOptions {
    /// Standard deviation of the smoothing Gaussian
    pub sigma: f32,
    /// Low threshold as a fraction of the high threshold, in [0, 1]
    pub low_ratio: f32,
    /// High threshold as a fraction of the suppressed maximum, in [0, 1]
    pub high_ratio: f32,
    /// Side length of the smoothing kernel (odd)
    pub kernel_size: u32,
}

impl Default for CannyOptions {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            low_ratio: 0.1,
            high_ratio: 0.3,
            kernel_size: 5,
        }
    }
}

impl CannyOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set smoothing sigma
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set low and high threshold ratios
    pub fn with_thresholds(mut self, low_ratio: f32, high_ratio: f32) -> Self {
        self.low_ratio = low_ratio;
        self.high_ratio = high_ratio;
        self
    }

    /// Set smoothing kernel side length
    pub fn with_kernel_size(mut self, size: u32) -> Self {
        self.kernel_size = size;
        self
    }
}

/// Detect edges with the Canny pipeline
///
/// Returns a raster where edge pixels are [`STRONG`] (255) and all others 0.
pub fn canny(raster: &Raster, options: &CannyOptions) -> FilterResult<Raster> {
    let normalized = raster.to_fraster_normalized();
    let smoothed = gaussian_smooth(&normalized, options.kernel_size, options.sigma)?;
    let gradient = sobel_gradient(&smoothed)?;
    let suppressed = non_max_suppression(&gradient)?;
    let mut classified = double_threshold(&suppressed, options.low_ratio, options.high_ratio)?;
    hysteresis(&mut classified);
    Ok(classified)
}

/// Direction bin used by non-maximum suppression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectionBin {
    /// [0, 22.5) and [157.5, 180): compare west / east
    Horizontal,
    /// [22.5, 67.5): compare along the down-right diagonal
    DiagonalDown,
    /// [67.5, 112.5): compare north / south
    Vertical,
    /// [112.5, 157.5): compare along the down-left diagonal
    DiagonalUp,
}

impl DirectionBin {
    fn from_radians(theta: f32) -> Self {
        let deg = theta.to_degrees();
        if !(22.5..157.5).contains(&deg) {
            DirectionBin::Horizontal
        } else if deg < 67.5 {
            DirectionBin::DiagonalDown
        } else if deg < 112.5 {
            DirectionBin::Vertical
        } else {
            DirectionBin::DiagonalUp
        }
    }

    /// Offsets `(dx, dy)` of the two neighbors compared against.
    fn neighbors(self) -> [(i32, i32); 2] {
        match self {
            DirectionBin::Horizontal => [(-1, 0), (1, 0)],
            DirectionBin::DiagonalDown => [(1, 1), (-1, -1)],
            DirectionBin::Vertical => [(0, -1), (0, 1)],
            DirectionBin::DiagonalUp => [(-1, 1), (1, -1)],
        }
    }
}

/// Thin the gradient magnitude to local maxima across the edge
///
/// A pixel keeps its magnitude when it is `>=` both neighbors along its
/// quantized gradient direction; ties are kept. The outer 1-pixel frame is
/// always zero.
pub fn non_max_suppression(gradient: &GradientField) -> FilterResult<FRaster> {
    let (w, h) = gradient.dimensions();
    let mag = &gradient.magnitude;
    let mut out = FRaster::new(w, h)?;

    if w < 3 || h < 3 {
        return Ok(out);
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let m = mag.get_pixel_unchecked(x, y);
            let bin = DirectionBin::from_radians(gradient.direction.get_pixel_unchecked(x, y));
            let [(ax, ay), (bx, by)] = bin.neighbors();
            let a = mag.get_pixel_unchecked((x as i32 + ax) as u32, (y as i32 + ay) as u32);
            let b = mag.get_pixel_unchecked((x as i32 + bx) as u32, (y as i32 + by) as u32);

            if m >= a && m >= b {
                out.set_pixel_unchecked(x, y, m);
            }
        }
    }

    Ok(out)
}

/// Classify suppressed magnitudes into strong / weak / background
///
/// `high_value = max * high_ratio`, `low_value = high_value * low_ratio`.
/// Pixels `>= high_value` are [`STRONG`], pixels in `[low_value, high_value)`
/// are [`WEAK`], everything else is 0. Zero magnitude is never an edge, so a
/// field whose maximum is 0 classifies entirely as background.
pub fn double_threshold(
    suppressed: &FRaster,
    low_ratio: f32,
    high_ratio: f32,
) -> FilterResult<Raster> {
    if !low_ratio.is_finite() || !high_ratio.is_finite() {
        return Err(FilterError::InvalidParameters(format!(
            "threshold ratios must be finite, got low={low_ratio} high={high_ratio}"
        )));
    }

    let max = suppressed.max_value().max(0.0);
    let high_value = max * high_ratio;
    let low_value = high_value * low_ratio;
    if max == 0.0 {
        debug!("canny: suppressed magnitude is zero everywhere");
    }
    debug!(
        "canny: max={:.5} high_value={:.5} low_value={:.5}",
        max, high_value, low_value
    );

    let (w, h) = suppressed.dimensions();
    let mut out = Raster::new(w, h)?;
    for (dst, &m) in out.data_mut().iter_mut().zip(suppressed.data()) {
        *dst = if m <= 0.0 {
            0
        } else if m >= high_value {
            STRONG
        } else if m >= low_value {
            WEAK
        } else {
            0
        };
    }
    Ok(out)
}

/// Promote or drop weak pixels in a single pass over interior pixels
///
/// Operates in place on a map produced by [`double_threshold`]. Weak pixels
/// on the outer frame are left untouched.
pub fn hysteresis(classified: &mut Raster) {
    let (w, h) = classified.dimensions();
    if w < 3 || h < 3 {
        return;
    }

    let mut promoted = 0usize;
    let mut dropped = 0usize;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if classified.get_pixel_unchecked(x, y) != WEAK {
                continue;
            }
            let has_strong = NEIGHBORS_8.iter().any(|&(dx, dy)| {
                classified.get_pixel_unchecked((x as i32 + dx) as u32, (y as i32 + dy) as u32)
                    == STRONG
            });
            if has_strong {
                classified.set_pixel_unchecked(x, y, STRONG);
                promoted += 1;
            } else {
                classified.set_pixel_unchecked(x, y, 0);
                dropped += 1;
            }
        }
    }
    debug!("canny: hysteresis promoted {} weak pixels, dropped {}", promoted, dropped);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_bins() {
        let rad = |d: f32| d.to_radians();
        assert_eq!(DirectionBin::from_radians(rad(0.0)), DirectionBin::Horizontal);
        assert_eq!(DirectionBin::from_radians(rad(170.0)), DirectionBin::Horizontal);
        assert_eq!(DirectionBin::from_radians(rad(45.0)), DirectionBin::DiagonalDown);
        assert_eq!(DirectionBin::from_radians(rad(90.0)), DirectionBin::Vertical);
        assert_eq!(DirectionBin::from_radians(rad(135.0)), DirectionBin::DiagonalUp);
    }

    #[test]
    fn test_double_threshold_relative_low() {
        let f = FRaster::from_data(5, 1, vec![0.0, 1.0, 4.0, 6.0, 10.0]).unwrap();
        // high = 10 * 0.5 = 5, low = 5 * 0.5 = 2.5
        let r = double_threshold(&f, 0.5, 0.5).unwrap();
        assert_eq!(r.data(), &[0, 0, WEAK, STRONG, STRONG]);
    }

    #[test]
    fn test_double_threshold_zero_max() {
        let f = FRaster::new(4, 4).unwrap();
        let r = double_threshold(&f, 0.1, 0.3).unwrap();
        assert_eq!(r.count_nonzero(), 0);
    }

    #[test]
    fn test_hysteresis_single_hop() {
        // Strong at x=1; weak at x=2 (adjacent) and x=4 (isolated)
        let mut data = vec![0u8; 6 * 3];
        data[6 + 1] = STRONG;
        data[6 + 2] = WEAK;
        data[6 + 4] = WEAK;
        let mut r = Raster::from_data(6, 3, data).unwrap();
        hysteresis(&mut r);
        assert_eq!(r.get_pixel(2, 1).unwrap(), STRONG);
        assert_eq!(r.get_pixel(4, 1).unwrap(), 0);
    }

    #[test]
    fn test_hysteresis_does_not_close_against_scan_order() {
        // Weak chain to the left of a strong pixel: only the direct neighbor
        // is rescued because the farther one is visited first.
        let mut data = vec![0u8; 6 * 3];
        data[6 + 2] = WEAK;
        data[6 + 3] = WEAK;
        data[6 + 4] = STRONG;
        let mut r = Raster::from_data(6, 3, data).unwrap();
        hysteresis(&mut r);
        assert_eq!(r.get_pixel(2, 1).unwrap(), 0);
        assert_eq!(r.get_pixel(3, 1).unwrap(), STRONG);
    }

    #[test]
    fn test_nms_keeps_ties() {
        let mut mag = FRaster::new(4, 3).unwrap();
        mag.set_pixel(1, 1, 2.0).unwrap();
        mag.set_pixel(2, 1, 2.0).unwrap();
        let field = GradientField {
            gx: mag.clone(),
            gy: FRaster::new(4, 3).unwrap(),
            magnitude: mag,
            direction: FRaster::new(4, 3).unwrap(),
        };
        let s = non_max_suppression(&field).unwrap();
        assert_eq!(s.get_pixel(1, 1).unwrap(), 2.0);
        assert_eq!(s.get_pixel(2, 1).unwrap(), 2.0);
    }

    #[test]
    fn test_canny_constant_image() {
        let r = Raster::new_with_value(12, 12, 90).unwrap();
        let edges = canny(&r, &CannyOptions::default()).unwrap();
        assert_eq!(edges.count_nonzero(), 0);
    }

    #[test]
    fn test_canny_rejects_even_kernel() {
        let r = Raster::new(8, 8).unwrap();
        let opts = CannyOptions::new().with_kernel_size(4);
        assert!(matches!(canny(&r, &opts), Err(FilterError::InvalidKernel(_))));
    }
}
