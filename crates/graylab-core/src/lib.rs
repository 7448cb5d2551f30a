//! graylab-core - Basic data structures for grayscale image analysis
//!
//! This crate provides the fundamental data structures shared by every
//! graylab algorithm crate:
//!
//! - [`Raster`] - 8-bit single-channel image
//! - [`FRaster`] - Floating-point image for intermediate stages
//! - [`LabelField`] - Per-pixel basin / component labels
//! - [`Error`] / [`ErrorKind`] - Error taxonomy shared across crates
//!
//! All types are plain values: created per invocation, owned by one caller,
//! never shared between calls.

pub mod error;
pub mod fraster;
pub mod label;
pub mod raster;

pub use error::{Error, ErrorKind, Result};
pub use fraster::FRaster;
pub use label::{LabelField, UNLABELED, WATERSHED_LINE};
pub use raster::{GRAY_LEVELS, Raster};

/// 4-connected neighbor offsets `(dx, dy)`: up, down, left, right
pub const NEIGHBORS_4: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// 8-connected neighbor offsets `(dx, dy)` in row-major order
pub const NEIGHBORS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Offset (x, y) by (dx, dy), returning `None` when the result leaves a
/// `width` x `height` grid.
#[inline]
pub fn offset_within(x: u32, y: u32, dx: i32, dy: i32, width: u32, height: u32) -> Option<(u32, u32)> {
    let nx = x as i64 + dx as i64;
    let ny = y as i64 + dy as i64;
    if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
        None
    } else {
        Some((nx as u32, ny as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_within() {
        assert_eq!(offset_within(0, 0, -1, 0, 3, 3), None);
        assert_eq!(offset_within(2, 2, 1, 0, 3, 3), None);
        assert_eq!(offset_within(1, 1, 1, 1, 3, 3), Some((2, 2)));
    }
}
