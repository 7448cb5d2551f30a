//! Convolution operations
//!
//! Implements 2D correlation of a raster with an odd-sided kernel.
//!
//! Uses replicate (clamp) border handling: samples outside the raster are
//! treated as having the value of the nearest edge sample. Accumulation is
//! done in `f32` and the output keeps its sign, which Laplacian-style
//! kernels depend on.

use crate::{FilterResult, Kernel};
use graylab_core::{FRaster, Raster};

/// Correlate a floating-point raster with a kernel
///
/// The output has the same dimensions as the input. The kernel is applied
/// unflipped (correlation), which is identical to convolution for every
/// symmetric kernel graylab generates.
pub fn convolve(src: &FRaster, kernel: &Kernel) -> FilterResult<FRaster> {
    let w = src.width();
    let h = src.height();
    let size = kernel.size();
    let half = kernel.half() as i64;

    let mut out = FRaster::new(w, h)?;
    let weights = kernel.data();

    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0f32;

            for ky in 0..size {
                let sy = y as i64 + ky as i64 - half;
                let row = (ky * size) as usize;
                for kx in 0..size {
                    let sx = x as i64 + kx as i64 - half;
                    sum += src.get_clamped(sx, sy) * weights[row + kx as usize];
                }
            }

            out.set_pixel_unchecked(x, y, sum);
        }
    }

    Ok(out)
}

/// Correlate an 8-bit raster with a kernel, keeping the 0..255 scale
///
/// The result is floating point; use [`FRaster::to_raster_clipped`] to
/// bring it back to 8 bits.
pub fn convolve_raster(src: &Raster, kernel: &Kernel) -> FilterResult<FRaster> {
    convolve(&src.to_fraster(), kernel)
}

/// Smooth with a Gaussian kernel of explicit odd `size`
pub fn gaussian_smooth(src: &FRaster, size: u32, sigma: f32) -> FilterResult<FRaster> {
    let kernel = Kernel::gaussian_with_size(size, sigma)?;
    convolve(src, &kernel)
}
