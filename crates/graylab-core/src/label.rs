//! LabelField - per-pixel integer labels
//!
//! A `LabelField` is owned and mutated by exactly one algorithm call
//! (watershed flooding or component labeling) and handed back as a value.
//!
//! Label values:
//! - [`UNLABELED`] (`0`): not yet assigned
//! - positive: basin or component identity
//! - [`WATERSHED_LINE`] (`-1`): boundary between basins, never a basin id

use crate::error::{Error, Result};

/// Label of a pixel that has not been assigned yet
pub const UNLABELED: i32 = 0;

/// Reserved label marking a watershed line pixel
pub const WATERSHED_LINE: i32 = -1;

/// Per-pixel label grid (row-major)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelField {
    width: u32,
    height: u32,
    data: Vec<i32>,
}

impl LabelField {
    /// Create a field with every pixel [`UNLABELED`]
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(LabelField {
            width,
            height,
            data: vec![UNLABELED; (width as usize) * (height as usize)],
        })
    }

    /// Create a field from row-major label data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the data length
    /// doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<i32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "label data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(LabelField {
            width,
            height,
            data,
        })
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Label at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn get(&self, x: u32, y: u32) -> Result<i32> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: self.index(x, y),
                len: self.data.len(),
            });
        }
        Ok(self.data[self.index(x, y)])
    }

    /// Label at (x, y) without bounds checking
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> i32 {
        self.data[self.index(x, y)]
    }

    /// Assign a label at (x, y) without bounds checking
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, label: i32) {
        let idx = self.index(x, y);
        self.data[idx] = label;
    }

    /// Raw label data
    #[inline]
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Largest label present, or [`UNLABELED`] when no positive label exists
    pub fn max_label(&self) -> i32 {
        self.data.iter().copied().max().unwrap_or(UNLABELED).max(UNLABELED)
    }

    /// Number of distinct positive labels
    pub fn distinct_positive(&self) -> usize {
        let mut seen: Vec<i32> = self.data.iter().copied().filter(|&l| l > 0).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    /// Number of pixels holding `label`
    pub fn count(&self, label: i32) -> usize {
        self.data.iter().filter(|&&l| l == label).count()
    }
}
