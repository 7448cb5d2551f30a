//! Thresholding operations
//!
//! Converts 8-bit rasters to two-level {0, 255} rasters:
//!
//! - Fixed threshold: `sample >= t -> 255`
//! - Otsu's method: choose `t` by maximizing between-class variance
//!
//! # Otsu threshold convention
//!
//! Candidates split the histogram after bin `i`: bins `0..=i` are the lower
//! class, `i+1..=255` the upper class. The returned threshold is the first
//! intensity of the upper class (`i + 1`), so that applying `>= t` separates
//! exactly the two classes that were scored. Only strictly greater variance
//! replaces the current best, so ties resolve to the lowest split. When no
//! split has positive variance (a single occupied bin) the threshold is 0.

use crate::{ThresholdError, ThresholdResult};
use graylab_core::{GRAY_LEVELS, Raster};
use log::debug;

/// Binarize with a fixed threshold
///
/// Pixels `>= threshold` become 255, all others 0.
pub fn threshold_to_binary(raster: &Raster, threshold: u8) -> ThresholdResult<Raster> {
    Ok(raster.map(|v| if v >= threshold { 255 } else { 0 }))
}

/// Compute the Otsu threshold of a 256-bin histogram
///
/// # Errors
///
/// Returns [`ThresholdError::EmptyHistogram`] if every bin is zero.
pub fn otsu_threshold_histogram(hist: &[u32; GRAY_LEVELS]) -> ThresholdResult<u8> {
    let total: u64 = hist.iter().map(|&c| c as u64).sum();
    if total == 0 {
        return Err(ThresholdError::EmptyHistogram);
    }

    let sum_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut best_variance = 0.0f64;
    let mut threshold = 0u8;
    let mut weight_bg = 0u64;
    let mut sum_bg = 0.0f64;

    for (i, &count) in hist.iter().enumerate() {
        weight_bg += count as u64;
        if weight_bg == 0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0 {
            break;
        }

        sum_bg += i as f64 * count as f64;
        let mean_bg = sum_bg / weight_bg as f64;
        let mean_fg = (sum_total - sum_bg) / weight_fg as f64;
        let diff = mean_bg - mean_fg;
        let variance = weight_bg as f64 * weight_fg as f64 * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            // weight_fg > 0 here, so i < 255
            threshold = (i + 1) as u8;
        }
    }

    if best_variance == 0.0 {
        debug!("otsu: single-level histogram, threshold 0");
    } else {
        debug!("otsu: threshold={} variance={:.3}", threshold, best_variance);
    }
    Ok(threshold)
}

/// Compute the Otsu threshold of a raster
pub fn compute_otsu_threshold(raster: &Raster) -> ThresholdResult<u8> {
    otsu_threshold_histogram(&raster.histogram())
}

/// Binarize a raster with its Otsu threshold
pub fn threshold_otsu(raster: &Raster) -> ThresholdResult<Raster> {
    let t = compute_otsu_threshold(raster)?;
    threshold_to_binary(raster, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_threshold_is_inclusive() {
        let r = Raster::from_data(4, 1, vec![0, 99, 100, 250]).unwrap();
        let b = threshold_to_binary(&r, 100).unwrap();
        assert_eq!(b.data(), &[0, 0, 255, 255]);
    }

    #[test]
    fn test_otsu_two_peaks() {
        let mut hist = [0u32; GRAY_LEVELS];
        hist[10] = 50;
        hist[240] = 50;
        let t = otsu_threshold_histogram(&hist).unwrap();
        assert!(t > 10 && t <= 240, "t = {t}");
    }

    #[test]
    fn test_otsu_ties_resolve_low() {
        // Every split between 10 and 240 scores the same; the first wins.
        let mut hist = [0u32; GRAY_LEVELS];
        hist[10] = 3;
        hist[240] = 3;
        assert_eq!(otsu_threshold_histogram(&hist).unwrap(), 11);
    }

    #[test]
    fn test_otsu_flat() {
        let mut hist = [0u32; GRAY_LEVELS];
        hist[77] = 100;
        assert_eq!(otsu_threshold_histogram(&hist).unwrap(), 0);

        let r = Raster::new_with_value(5, 5, 77).unwrap();
        let b = threshold_otsu(&r).unwrap();
        assert!(b.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_otsu_empty_histogram() {
        let hist = [0u32; GRAY_LEVELS];
        let err = otsu_threshold_histogram(&hist).unwrap_err();
        assert!(matches!(err, ThresholdError::EmptyHistogram));
        assert_eq!(err.kind(), graylab_core::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_otsu_three_levels() {
        // Heavy dark class, light tail: threshold lands above the dark peak
        let mut hist = [0u32; GRAY_LEVELS];
        hist[20] = 80;
        hist[30] = 80;
        hist[200] = 40;
        let t = otsu_threshold_histogram(&hist).unwrap();
        assert!(t > 30 && t <= 200, "t = {t}");
    }
}
