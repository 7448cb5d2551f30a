//! Sobel gradient field
//!
//! Computes per-pixel gradient magnitude and direction from the two Sobel
//! responses. Direction is folded into `[0, pi)`: an edge and its mirror
//! image have the same orientation.

use crate::convolve::convolve;
use crate::{FilterResult, Kernel};
use graylab_core::FRaster;
use std::f32::consts::PI;

/// Gradient magnitude and direction, same dimensions as the source
#[derive(Debug, Clone)]
pub struct GradientField {
    /// Horizontal Sobel response
    pub gx: FRaster,
    /// Vertical Sobel response
    pub gy: FRaster,
    /// Euclidean norm of (gx, gy), non-negative
    pub magnitude: FRaster,
    /// `atan2(gy, gx)` folded into `[0, pi)`
    pub direction: FRaster,
}

impl GradientField {
    /// Field dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.magnitude.dimensions()
    }
}

/// Fold an angle in `(-pi, pi]` into `[0, pi)`.
#[inline]
pub fn fold_direction(theta: f32) -> f32 {
    let mut d = theta;
    if d < 0.0 {
        d += PI;
    }
    if d >= PI {
        d -= PI;
    }
    d
}

/// Compute the Sobel gradient field of a raster
pub fn sobel_gradient(src: &FRaster) -> FilterResult<GradientField> {
    let gx = convolve(src, &Kernel::sobel_x())?;
    let gy = convolve(src, &Kernel::sobel_y())?;

    let (w, h) = src.dimensions();
    let mut magnitude = FRaster::new(w, h)?;
    let mut direction = FRaster::new(w, h)?;

    for (i, (&dx, &dy)) in gx.data().iter().zip(gy.data()).enumerate() {
        magnitude.data_mut()[i] = dx.hypot(dy);
        direction.data_mut()[i] = fold_direction(dy.atan2(dx));
    }

    Ok(GradientField {
        gx,
        gy,
        magnitude,
        direction,
    })
}

/// Compute only the gradient magnitude
pub fn sobel_magnitude(src: &FRaster) -> FilterResult<FRaster> {
    Ok(sobel_gradient(src)?.magnitude)
}
