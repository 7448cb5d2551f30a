//! Convolution kernels
//!
//! Defines the square, odd-sided kernel used by every convolution in
//! graylab, and the generators for Gaussian, Laplacian-of-Gaussian and
//! Sobel weights.
//!
//! Generator sizing follows `2 * ceil(3 * sigma) + 1`, which keeps the
//! kernel wide enough to hold three standard deviations on each side.

use crate::{FilterError, FilterResult};
use std::f32::consts::PI;

/// A square 2D convolution kernel with odd side length
///
/// The center element is at `(size / 2, size / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Side length (always odd)
    size: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

/// Largest accepted kernel side length
pub const MAX_KERNEL_SIZE: u32 = 1025;

/// Side length used by the generators for a given sigma.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if the side would exceed
/// [`MAX_KERNEL_SIZE`].
pub fn size_for_sigma(sigma: f32) -> FilterResult<u32> {
    let side = 2.0 * (3.0 * f64::from(sigma)).ceil() + 1.0;
    if side > f64::from(MAX_KERNEL_SIZE) {
        return Err(FilterError::InvalidParameters(format!(
            "sigma {sigma} needs a {side}-wide kernel, limit is {MAX_KERNEL_SIZE}"
        )));
    }
    Ok(side as u32)
}

fn check_size(size: u32) -> FilterResult<()> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "kernel side must be odd, got {size}"
        )));
    }
    if size > MAX_KERNEL_SIZE {
        return Err(FilterError::InvalidKernel(format!(
            "kernel side {size} exceeds {MAX_KERNEL_SIZE}"
        )));
    }
    Ok(())
}

fn check_sigma(sigma: f32) -> FilterResult<()> {
    if !(sigma > 0.0) || !sigma.is_finite() {
        return Err(FilterError::InvalidParameters(format!(
            "sigma must be > 0, got {sigma}"
        )));
    }
    Ok(())
}

impl Kernel {
    /// Create a zero-filled kernel.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `size` is even, zero or
    /// above [`MAX_KERNEL_SIZE`].
    pub fn new(size: u32) -> FilterResult<Self> {
        check_size(size)?;
        Ok(Kernel {
            size,
            data: vec![0.0; (size as usize) * (size as usize)],
        })
    }

    /// Create a kernel from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `size` is even or the data
    /// length is not `size * size`.
    pub fn from_slice(size: u32, data: &[f32]) -> FilterResult<Self> {
        check_size(size)?;
        let area = (size as usize) * (size as usize);
        if data.len() != area {
            return Err(FilterError::InvalidKernel(format!(
                "expected {area} values for a {size}x{size} kernel, got {}",
                data.len()
            )));
        }
        Ok(Kernel {
            size,
            data: data.to_vec(),
        })
    }

    /// Unit impulse: 1 at the center, 0 elsewhere.
    pub fn identity(size: u32) -> FilterResult<Self> {
        let mut kernel = Self::new(size)?;
        let c = size / 2;
        kernel.set(c, c, 1.0);
        Ok(kernel)
    }

    /// Gaussian kernel sized from sigma (`2 * ceil(3 * sigma) + 1`).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `sigma <= 0` or too
    /// large for [`MAX_KERNEL_SIZE`].
    pub fn gaussian(sigma: f32) -> FilterResult<Self> {
        check_sigma(sigma)?;
        Self::gaussian_with_size(size_for_sigma(sigma)?, sigma)
    }

    /// Gaussian kernel with an explicit odd side length.
    ///
    /// Weights are the 2D Gaussian density on a centered integer grid.
    /// The sum is left as generated, not forced to 1.
    pub fn gaussian_with_size(size: u32, sigma: f32) -> FilterResult<Self> {
        check_sigma(sigma)?;
        let mut kernel = Self::new(size)?;
        let half = (size / 2) as i32;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let norm = 1.0 / (PI * two_sigma_sq);

        for ky in 0..size {
            for kx in 0..size {
                let x = (kx as i32 - half) as f32;
                let y = (ky as i32 - half) as f32;
                kernel.set(kx, ky, norm * (-(x * x + y * y) / two_sigma_sq).exp());
            }
        }
        Ok(kernel)
    }

    /// Laplacian-of-Gaussian kernel, mean-centered so it sums to zero.
    ///
    /// `w(x, y) = -1/(pi s^4) * (1 - r^2/(2 s^2)) * exp(-r^2/(2 s^2))`
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `sigma <= 0` or too
    /// large for [`MAX_KERNEL_SIZE`].
    pub fn log(sigma: f32) -> FilterResult<Self> {
        check_sigma(sigma)?;
        let size = size_for_sigma(sigma)?;
        let mut kernel = Self::new(size)?;
        let half = (size / 2) as i32;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let normalizer = -1.0 / (PI * sigma.powi(4));

        for ky in 0..size {
            for kx in 0..size {
                let x = (kx as i32 - half) as f32;
                let y = (ky as i32 - half) as f32;
                let r2 = (x * x + y * y) / two_sigma_sq;
                kernel.set(kx, ky, normalizer * (1.0 - r2) * (-r2).exp());
            }
        }

        kernel.subtract_mean();
        Ok(kernel)
    }

    /// Sobel kernel for the horizontal derivative (responds to vertical edges).
    pub fn sobel_x() -> Self {
        Kernel {
            size: 3,
            data: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
        }
    }

    /// Sobel kernel for the vertical derivative (responds to horizontal edges).
    ///
    /// Positive where intensity increases downward.
    pub fn sobel_y() -> Self {
        Kernel {
            size: 3,
            data: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Offset of the center from the top-left element.
    #[inline]
    pub fn half(&self) -> u32 {
        self.size / 2
    }

    /// Kernel data (row-major).
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Value at (x, y), or `None` outside the kernel.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.size && y < self.size {
            Some(self.data[(y as usize) * (self.size as usize) + x as usize])
        } else {
            None
        }
    }

    /// Set the value at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.size && y < self.size {
            self.data[(y as usize) * (self.size as usize) + x as usize] = value;
        }
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Mean of all weights.
    pub fn mean(&self) -> f32 {
        self.sum() / self.data.len() as f32
    }

    /// Subtract the mean from every weight, making the kernel sum to zero.
    pub fn subtract_mean(&mut self) {
        let mean = self.mean();
        for v in &mut self.data {
            *v -= mean;
        }
    }
}
