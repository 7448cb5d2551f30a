//! graylab-test - Regression test framework for graylab
//!
//! This crate provides a small regression test harness, supporting two
//! modes:
//!
//! - **Compare**: Record every mismatch and fail at cleanup (default)
//! - **Display**: Run and print, without failing (visual inspection)
//!
//! It also builds the synthetic rasters shared by the regression tests,
//! since graylab itself never decodes image files.
//!
//! # Usage
//!
//! ```ignore
//! use graylab_test::{RegParams, synth};
//!
//! let mut rp = RegParams::new("conncomp");
//! rp.compare_values(2.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Synthetic test rasters
pub mod synth {
    use crate::{TestError, TestResult};
    use graylab_core::Raster;

    /// Vertical step edge: columns `< width / 2` are `low`, the rest `high`.
    pub fn vertical_step(width: u32, height: u32, low: u8, high: u8) -> TestResult<Raster> {
        let half = width / 2;
        Ok(Raster::from_fn(width, height, |x, _| {
            if x < half { low } else { high }
        })?)
    }

    /// Background raster with solid foreground rectangles.
    ///
    /// Each rectangle is `(x, y, w, h)`; rectangles are painted with `fg`.
    pub fn blocks(
        width: u32,
        height: u32,
        rects: &[(u32, u32, u32, u32)],
        fg: u8,
    ) -> TestResult<Raster> {
        let mut raster = Raster::new(width, height)?;
        for &(rx, ry, rw, rh) in rects {
            if rx + rw > width || ry + rh > height {
                return Err(TestError::Synthesis {
                    name: "blocks".into(),
                    message: format!("rect ({rx}, {ry}, {rw}, {rh}) exceeds {width}x{height}"),
                });
            }
            for y in ry..ry + rh {
                for x in rx..rx + rw {
                    raster.set_pixel_unchecked(x, y, fg);
                }
            }
        }
        Ok(raster)
    }

    /// Raster whose first half of the pixels (row-major) is `a`, the rest `b`.
    pub fn two_level(width: u32, height: u32, a: u8, b: u8) -> TestResult<Raster> {
        let total = (width as usize) * (height as usize);
        let data = (0..total).map(|i| if i < total / 2 { a } else { b }).collect();
        Ok(Raster::from_data(width, height, data)?)
    }

    /// Smooth sinusoidal surface with several local minima.
    ///
    /// The period is long enough that each minimum keeps a near-flat
    /// neighborhood after smoothing.
    pub fn ripple(width: u32, height: u32) -> TestResult<Raster> {
        Ok(Raster::from_fn(width, height, |x, y| {
            let fx = x as f32;
            let fy = y as f32;
            let v = 128.0 + 50.0 * (0.15 * fx).sin() + 50.0 * (0.15 * fy).cos();
            v.clamp(0.0, 255.0) as u8
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::synth;

    #[test]
    fn test_blocks_rejects_overflow() {
        assert!(synth::blocks(4, 4, &[(2, 2, 3, 1)], 255).is_err());
    }

    #[test]
    fn test_two_level_split() {
        let r = synth::two_level(4, 2, 10, 240).unwrap();
        let hist = r.histogram();
        assert_eq!(hist[10], 4);
        assert_eq!(hist[240], 4);
    }
}
