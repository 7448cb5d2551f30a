//! Connected component labeling
//!
//! 4-connected flood-fill labeling of a binary raster. Components are
//! discovered in raster order and filled with an explicit stack, so label
//! `k` is the `k`-th component whose top-left-most pixel is met by the scan.

use crate::RegionResult;
use graylab_core::{LabelField, NEIGHBORS_4, Raster, UNLABELED, offset_within};
use log::debug;

/// Foreground value of a binarized raster
pub const FOREGROUND: u8 = 255;

/// Binarize with a strict threshold
///
/// Pixels `> threshold` become [`FOREGROUND`], all others 0.
pub fn binarize(raster: &Raster, threshold: u8) -> Raster {
    raster.map(|v| if v > threshold { FOREGROUND } else { 0 })
}

/// Label the 4-connected components of a binary raster
///
/// Any nonzero sample is foreground. Background pixels stay [`UNLABELED`];
/// components are numbered `1..=n`.
pub fn label_components(binary: &Raster) -> RegionResult<LabelField> {
    let (w, h) = binary.dimensions();
    let mut labels = LabelField::new(w, h)?;
    let mut stack: Vec<(u32, u32)> = Vec::new();
    let mut next_label = 0i32;

    for y in 0..h {
        for x in 0..w {
            if binary.get_pixel_unchecked(x, y) == 0 || labels.get_unchecked(x, y) != UNLABELED {
                continue;
            }

            next_label += 1;
            labels.set_unchecked(x, y, next_label);
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                for &(dx, dy) in &NEIGHBORS_4 {
                    let Some((nx, ny)) = offset_within(cx, cy, dx, dy, w, h) else {
                        continue;
                    };
                    if binary.get_pixel_unchecked(nx, ny) != 0
                        && labels.get_unchecked(nx, ny) == UNLABELED
                    {
                        labels.set_unchecked(nx, ny, next_label);
                        stack.push((nx, ny));
                    }
                }
            }
        }
    }

    debug!("conncomp: {} components in {}x{}", next_label, w, h);
    Ok(labels)
}

/// Number of 4-connected components in a binary raster
pub fn count_components(binary: &Raster) -> RegionResult<usize> {
    Ok(label_components(binary)?.distinct_positive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(w: u32, h: u32, rows: &[&str]) -> Raster {
        let data = rows
            .iter()
            .flat_map(|r| r.bytes().map(|b| if b == b'#' { 255 } else { 0 }))
            .collect();
        Raster::from_data(w, h, data).unwrap()
    }

    #[test]
    fn test_binarize_is_strict() {
        let r = Raster::from_data(3, 1, vec![127, 128, 129]).unwrap();
        assert_eq!(binarize(&r, 128).data(), &[0, 0, 255]);
    }

    #[test]
    fn test_diagonal_is_not_connected() {
        let r = raster(3, 3, &["#..", ".#.", "..#"]);
        assert_eq!(count_components(&r).unwrap(), 3);
    }

    #[test]
    fn test_u_shape_is_one_component() {
        let r = raster(5, 3, &["#...#", "#...#", "#####"]);
        let labels = label_components(&r).unwrap();
        assert_eq!(labels.distinct_positive(), 1);
        assert_eq!(labels.count(1), 9);
    }

    #[test]
    fn test_label_order_follows_scan() {
        let r = raster(4, 2, &["..##", "#..."]);
        let labels = label_components(&r).unwrap();
        assert_eq!(labels.get(2, 0).unwrap(), 1);
        assert_eq!(labels.get(0, 1).unwrap(), 2);
        assert_eq!(labels.get(1, 1).unwrap(), UNLABELED);
    }

    #[test]
    fn test_empty_and_full() {
        let empty = Raster::new(6, 4).unwrap();
        assert_eq!(count_components(&empty).unwrap(), 0);
        let full = Raster::new_with_value(6, 4, 1).unwrap();
        assert_eq!(count_components(&full).unwrap(), 1);
    }
}
