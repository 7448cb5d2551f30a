//! Raster - 8-bit single-channel image
//!
//! `Raster` is the common currency between all graylab algorithms: a
//! fixed-size grid of `u8` intensity samples. Multi-channel inputs are
//! converted to a single channel before they become a `Raster`.
//!
//! # Memory Layout
//!
//! Data is stored in row-major order with no padding. The sample at (x, y)
//! is at index `y * width + x`, where `x` is the column and `y` the row.
//!
//! # Examples
//!
//! ```
//! use graylab_core::Raster;
//!
//! let mut raster = Raster::new(8, 4).unwrap();
//! raster.set_pixel(3, 1, 200).unwrap();
//! assert_eq!(raster.get_pixel(3, 1).unwrap(), 200);
//! assert_eq!(raster.count_nonzero(), 1);
//! ```

use crate::error::{Error, Result};
use crate::fraster::FRaster;

/// Number of distinct 8-bit intensities.
pub const GRAY_LEVELS: usize = 256;

/// 8-bit single-channel raster
///
/// Dimensions are fixed for the lifetime of the value. Pixel access is
/// always `(x, y)` with `x` the column and `y` the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Sample data (row-major, no padding)
    data: Vec<u8>,
}

impl Raster {
    /// Create a new raster with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0)
    }

    /// Create a new raster with all samples set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(Raster {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a raster from row-major sample data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the data length
    /// doesn't match `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(Raster {
            width,
            height,
            data,
        })
    }

    /// Build from parts already known to be consistent.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize));
        Raster {
            width,
            height,
            data,
        }
    }

    /// Create a raster by evaluating `f(x, y)` at every pixel
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> u8,
    {
        let mut raster = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                raster.set_pixel_unchecked(x, y, f(x, y));
            }
        }
        Ok(raster)
    }

    /// Get the raster width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the raster height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the raster dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a raster has at least one pixel
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get the sample at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<u8> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: self.index(x, y),
                len: self.data.len(),
            });
        }
        Ok(self.data[self.index(x, y)])
    }

    /// Set the sample at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: self.index(x, y),
                len: self.data.len(),
            });
        }
        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the sample at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the data.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data[self.index(x, y)]
    }

    /// Set the sample at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the data.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: u8) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Get raw access to the sample data
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable access to the sample data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get a row of samples
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Count samples that are not zero
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Compute the 256-bin intensity histogram
    pub fn histogram(&self) -> [u32; GRAY_LEVELS] {
        let mut hist = [0u32; GRAY_LEVELS];
        for &v in &self.data {
            hist[v as usize] += 1;
        }
        hist
    }

    /// Map every sample through `f`, producing a raster of the same size
    pub fn map<F>(&self, f: F) -> Raster
    where
        F: Fn(u8) -> u8,
    {
        Raster {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Convert to a floating-point raster with samples scaled to [0, 1]
    pub fn to_fraster_normalized(&self) -> FRaster {
        let data = self.data.iter().map(|&v| v as f32 / 255.0).collect();
        FRaster::from_parts(self.width, self.height, data)
    }

    /// Convert to a floating-point raster keeping the 0..255 scale
    pub fn to_fraster(&self) -> FRaster {
        let data = self.data.iter().map(|&v| v as f32).collect();
        FRaster::from_parts(self.width, self.height, data)
    }

    /// Check that `other` has the same dimensions
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` otherwise.
    pub fn check_same_size(&self, other: (u32, u32)) -> Result<()> {
        if self.dimensions() != other {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other,
            });
        }
        Ok(())
    }
}
