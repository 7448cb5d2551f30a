//! Watershed segmentation
//!
//! Marker-controlled watershed by immersion: the gradient magnitude is the
//! altitude, seed basins are grown in order of increasing altitude, and a
//! pixel reached by two different basins becomes a watershed line.
//!
//! Two marker policies are supported:
//!
//! - [`MarkerPolicy::LowGradient`]: the gradient is scaled by its maximum to
//!   0..255 and every 4-connected region below a cutoff becomes one basin.
//!   Flooding runs on the raw magnitude.
//! - [`MarkerPolicy::OtsuTwoClass`]: the gradient is min-max normalized to
//!   0..255 and split by its Otsu threshold `t`; pixels below `0.5 t` seed
//!   basin 1 and pixels above `min(255, 1.5 t)` seed basin 2. Flooding runs
//!   on the normalized field.
//!
//! Queue ties are broken by row, then column, so results are reproducible.

use crate::conncomp::label_components;
use crate::RegionResult;
use graylab_core::{
    FRaster, GRAY_LEVELS, LabelField, NEIGHBORS_4, Raster, UNLABELED, WATERSHED_LINE,
    offset_within,
};
use graylab_filter::{gaussian_smooth, sobel_magnitude};
use graylab_threshold::otsu_threshold_histogram;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// How seed basins are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPolicy {
    /// Connected low-gradient regions, one basin each
    #[default]
    LowGradient,
    /// Two broad classes either side of the gradient's Otsu threshold
    OtsuTwoClass,
}

/// Intensity given to watershed-line pixels when rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolarity {
    /// Lines render as 0
    #[default]
    Dark,
    /// Lines render as 255
    Bright,
}

impl BoundaryPolarity {
    /// Rendered intensity of a line pixel
    pub fn value(self) -> u8 {
        match self {
            BoundaryPolarity::Dark => 0,
            BoundaryPolarity::Bright => 255,
        }
    }
}

/// Options for watershed segmentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatershedOptions {
    /// Gaussian pre-smoothing sigma; `<= 0` disables smoothing
    pub smoothing_sigma: f32,
    /// Side length of the smoothing kernel (odd)
    pub smoothing_size: u32,
    /// Marker seeding policy
    pub markers: MarkerPolicy,
    /// Cutoff on the 0..255 scaled gradient for [`MarkerPolicy::LowGradient`]
    pub low_gradient_cutoff: u8,
    /// Rendering of watershed lines
    pub boundary: BoundaryPolarity,
}

impl Default for WatershedOptions {
    fn default() -> Self {
        Self::low_gradient()
    }
}

impl WatershedOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Low-gradient markers, flooding on raw magnitude, dark lines
    pub fn low_gradient() -> Self {
        Self {
            smoothing_sigma: 1.0,
            smoothing_size: 5,
            markers: MarkerPolicy::LowGradient,
            low_gradient_cutoff: 20,
            boundary: BoundaryPolarity::Dark,
        }
    }

    /// Otsu two-class markers on the normalized gradient, bright lines
    pub fn otsu_two_class() -> Self {
        Self {
            markers: MarkerPolicy::OtsuTwoClass,
            boundary: BoundaryPolarity::Bright,
            ..Self::low_gradient()
        }
    }

    /// Set pre-smoothing sigma (`<= 0` disables smoothing)
    pub fn with_smoothing(mut self, sigma: f32) -> Self {
        self.smoothing_sigma = sigma;
        self
    }

    /// Set marker policy
    pub fn with_markers(mut self, markers: MarkerPolicy) -> Self {
        self.markers = markers;
        self
    }

    /// Set low-gradient cutoff
    pub fn with_low_gradient_cutoff(mut self, cutoff: u8) -> Self {
        self.low_gradient_cutoff = cutoff;
        self
    }

    /// Set line rendering
    pub fn with_boundary(mut self, boundary: BoundaryPolarity) -> Self {
        self.boundary = boundary;
        self
    }
}

/// Output of [`watershed_segment`]
#[derive(Debug, Clone)]
pub struct WatershedResult {
    /// Basin labels and [`WATERSHED_LINE`] pixels
    pub labels: LabelField,
    /// Visualization of `labels`
    pub rendered: Raster,
    /// Number of distinct basins
    pub basin_count: usize,
    /// Number of watershed-line pixels
    pub line_pixels: usize,
}

/// Run the full watershed pipeline on a grayscale raster
///
/// Smooth, take the Sobel gradient magnitude, seed markers, flood and
/// render.
pub fn watershed_segment(raster: &Raster, options: &WatershedOptions) -> RegionResult<WatershedResult> {
    let mut field = raster.to_fraster();
    if options.smoothing_sigma > 0.0 {
        field = gaussian_smooth(&field, options.smoothing_size, options.smoothing_sigma)?;
    }
    let magnitude = sobel_magnitude(&field)?;

    let (markers, altitude) = match options.markers {
        MarkerPolicy::LowGradient => (
            markers_low_gradient(&magnitude, options.low_gradient_cutoff)?,
            magnitude,
        ),
        MarkerPolicy::OtsuTwoClass => {
            let normalized = normalize_min_max(&magnitude);
            (markers_otsu_two_class(&normalized)?, normalized)
        }
    };

    let labels = flood(&altitude, markers)?;
    let rendered = render_labels(&labels, options.boundary)?;
    let basin_count = labels.distinct_positive();
    let line_pixels = labels.count(WATERSHED_LINE);
    debug!(
        "watershed: {} basins, {} line pixels, {} unreached",
        basin_count,
        line_pixels,
        labels.count(UNLABELED)
    );

    Ok(WatershedResult {
        labels,
        rendered,
        basin_count,
        line_pixels,
    })
}

/// Scale by the maximum to 0..255 (divisor clamped to 1) and truncate
fn scale_by_max(magnitude: &FRaster) -> RegionResult<Raster> {
    let max = magnitude.max_value();
    let divisor = if max > 0.0 {
        max
    } else {
        debug!("watershed: gradient maximum is zero");
        1.0
    };
    let (w, h) = magnitude.dimensions();
    let data = magnitude
        .data()
        .iter()
        .map(|&m| (m / divisor * 255.0).clamp(0.0, 255.0) as u8)
        .collect();
    Ok(Raster::from_data(w, h, data)?)
}

/// Seed one basin per 4-connected region whose max-scaled gradient is
/// below `cutoff`
pub fn markers_low_gradient(magnitude: &FRaster, cutoff: u8) -> RegionResult<LabelField> {
    let scaled = scale_by_max(magnitude)?;
    let mask = scaled.map(|v| if v < cutoff { 255 } else { 0 });
    let markers = label_components(&mask)?;
    debug!(
        "watershed: {} low-gradient markers (cutoff {})",
        markers.max_label(),
        cutoff
    );
    Ok(markers)
}

/// Rescale linearly so the minimum maps to 0 and the maximum to 255
///
/// A constant field maps to 0 everywhere.
pub fn normalize_min_max(field: &FRaster) -> FRaster {
    let min = field.min_value();
    let range = field.max_value() - min;
    let divisor = if range > 0.0 { range } else { 1.0 };
    field.map(|v| (v - min) / divisor * 255.0)
}

/// Seed two basins from a 0..255 field split at its Otsu threshold
///
/// Pixels `< 0.5 t` get label 1, pixels `> min(255, 1.5 t)` label 2.
pub fn markers_otsu_two_class(normalized: &FRaster) -> RegionResult<LabelField> {
    let (w, h) = normalized.dimensions();
    let mut hist = [0u32; GRAY_LEVELS];
    for &v in normalized.data() {
        hist[v.clamp(0.0, 255.0) as usize] += 1;
    }
    let t = otsu_threshold_histogram(&hist)? as f32;
    let low = 0.5 * t;
    let high = (1.5 * t).min(255.0);

    let data: Vec<i32> = normalized
        .data()
        .iter()
        .map(|&v| {
            if v < low {
                1
            } else if v > high {
                2
            } else {
                UNLABELED
            }
        })
        .collect();
    let markers = LabelField::from_data(w, h, data)?;
    debug!(
        "watershed: otsu t={} -> {} low / {} high seeds",
        t,
        markers.count(1),
        markers.count(2)
    );
    Ok(markers)
}

/// Queue entry ordered as a min-heap on (altitude, y, x)
#[derive(Debug, Clone, Copy)]
struct Candidate {
    altitude: f32,
    x: u32,
    y: u32,
    label: i32,
}

impl Candidate {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.altitude
            .total_cmp(&other.altitude)
            .then(self.y.cmp(&other.y))
            .then(self.x.cmp(&other.x))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reverse: lower altitude has higher priority
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key_cmp(self)
    }
}

/// Grow marker basins over `altitude` by priority flooding
///
/// Every pixel enters the queue at most once, tagged with the label of the
/// pixel that enqueued it. On pop, the distinct positive labels among its
/// 4-neighbors decide its fate: none adopts the tag, one adopts that label,
/// two or more make it a [`WATERSHED_LINE`]. Line pixels do not propagate.
///
/// # Errors
///
/// Returns an error if `markers` and `altitude` differ in size.
pub fn flood(altitude: &FRaster, markers: LabelField) -> RegionResult<LabelField> {
    let (w, h) = altitude.dimensions();
    if markers.dimensions() != (w, h) {
        return Err(graylab_core::Error::DimensionMismatch {
            expected: (w, h),
            actual: markers.dimensions(),
        }
        .into());
    }

    let mut labels = markers;
    let mut in_queue = vec![false; (w as usize) * (h as usize)];
    let mut queue = BinaryHeap::new();

    let mut push_neighbors = |labels: &LabelField,
                              queue: &mut BinaryHeap<Candidate>,
                              x: u32,
                              y: u32,
                              label: i32| {
        for &(dx, dy) in &NEIGHBORS_4 {
            let Some((nx, ny)) = offset_within(x, y, dx, dy, w, h) else {
                continue;
            };
            let idx = (ny as usize) * (w as usize) + nx as usize;
            if labels.get_unchecked(nx, ny) == UNLABELED && !in_queue[idx] {
                queue.push(Candidate {
                    altitude: altitude.get_pixel_unchecked(nx, ny),
                    x: nx,
                    y: ny,
                    label,
                });
                in_queue[idx] = true;
            }
        }
    };

    for y in 0..h {
        for x in 0..w {
            let label = labels.get_unchecked(x, y);
            if label > 0 {
                push_neighbors(&labels, &mut queue, x, y, label);
            }
        }
    }
    if queue.is_empty() {
        warn!("watershed: no markers to flood from");
    }

    let mut pops = 0usize;
    let mut neighbor_labels: Vec<i32> = Vec::with_capacity(4);
    while let Some(c) = queue.pop() {
        pops += 1;
        if labels.get_unchecked(c.x, c.y) != UNLABELED {
            continue;
        }

        neighbor_labels.clear();
        for &(dx, dy) in &NEIGHBORS_4 {
            if let Some((nx, ny)) = offset_within(c.x, c.y, dx, dy, w, h) {
                let l = labels.get_unchecked(nx, ny);
                if l > 0 && !neighbor_labels.contains(&l) {
                    neighbor_labels.push(l);
                }
            }
        }

        let assigned = match neighbor_labels.as_slice() {
            [] => c.label,
            [only] => *only,
            _ => WATERSHED_LINE,
        };
        labels.set_unchecked(c.x, c.y, assigned);

        if assigned > 0 {
            push_neighbors(&labels, &mut queue, c.x, c.y, assigned);
        }
    }

    debug!("watershed: flooding finished after {} queue pops", pops);
    Ok(labels)
}

/// Render labels for display
///
/// Basin `k` of `1..=max` maps to `floor(k * 255 / max)`, watershed lines
/// to the polarity's value, unlabeled pixels to 0.
pub fn render_labels(labels: &LabelField, boundary: BoundaryPolarity) -> RegionResult<Raster> {
    let (w, h) = labels.dimensions();
    let max = labels.max_label() as i64;
    let line = boundary.value();
    Ok(Raster::from_fn(w, h, |x, y| {
        let l = labels.get_unchecked(x, y);
        if l == WATERSHED_LINE {
            line
        } else if l > 0 && max > 0 {
            (l as i64 * 255 / max) as u8
        } else {
            0
        }
    })?)
}
