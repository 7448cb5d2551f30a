//! Freeman chain code boundary tracing
//!
//! Traces the outer boundaries of foreground objects in a binary raster
//! with 8-connected Moore-neighbor search and encodes each boundary as a
//! Freeman chain code.
//!
//! Direction codes, clockwise from north:
//!
//! ```text
//! 7 0 1
//! 6 X 2
//! 5 4 3
//! ```
//!
//! A boundary pixel is a foreground pixel with at least one background
//! 8-neighbor inside the raster; the raster edge itself does not count as
//! background.

use crate::conncomp::binarize;
use crate::{RegionError, RegionResult};
use graylab_core::{NEIGHBORS_8, Raster, offset_within};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Freeman direction (8-connected, clockwise from North)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Direction {
    /// North (0, -1)
    North = 0,
    /// Northeast (1, -1)
    NorthEast = 1,
    /// East (1, 0)
    East = 2,
    /// Southeast (1, 1)
    SouthEast = 3,
    /// South (0, 1)
    South = 4,
    /// Southwest (-1, 1)
    SouthWest = 5,
    /// West (-1, 0)
    West = 6,
    /// Northwest (-1, -1)
    NorthWest = 7,
}

/// X offset for each direction
const XPOSTAB: [i32; 8] = [0, 1, 1, 1, 0, -1, -1, -1];

/// Y offset for each direction
const YPOSTAB: [i32; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];

impl Direction {
    /// Get the x offset for this direction
    #[inline]
    pub fn dx(self) -> i32 {
        XPOSTAB[self as usize]
    }

    /// Get the y offset for this direction
    #[inline]
    pub fn dy(self) -> i32 {
        YPOSTAB[self as usize]
    }

    /// Offset as (dx, dy)
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        (self.dx(), self.dy())
    }

    /// Freeman code (0-7)
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Direction for a Freeman code, `None` if `code > 7`
    pub fn from_code(code: u8) -> Option<Self> {
        if code < 8 {
            Some(Self::from_index(code as usize))
        } else {
            None
        }
    }

    /// Direction from index, wrapping modulo 8
    #[inline]
    fn from_index(idx: usize) -> Self {
        match idx % 8 {
            0 => Direction::North,
            1 => Direction::NorthEast,
            2 => Direction::East,
            3 => Direction::SouthEast,
            4 => Direction::South,
            5 => Direction::SouthWest,
            6 => Direction::West,
            _ => Direction::NorthWest,
        }
    }

    /// Get all 8 directions in code order
    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::NorthEast,
            Direction::East,
            Direction::SouthEast,
            Direction::South,
            Direction::SouthWest,
            Direction::West,
            Direction::NorthWest,
        ]
    }
}

impl From<Direction> for u8 {
    fn from(dir: Direction) -> u8 {
        dir.code()
    }
}

impl TryFrom<u8> for Direction {
    type Error = RegionError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Direction::from_code(code).ok_or_else(|| {
            RegionError::InvalidParameters(format!("chain code must be 0..=7, got {code}"))
        })
    }
}

/// A pixel position on a contour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContourPoint {
    /// X coordinate (column)
    pub x: i32,
    /// Y coordinate (row)
    pub y: i32,
}

impl ContourPoint {
    /// Create a new contour point
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move one step in the given direction
    #[inline]
    pub fn moved(self, dir: Direction) -> Self {
        Self {
            x: self.x + dir.dx(),
            y: self.y + dir.dy(),
        }
    }
}

impl From<(u32, u32)> for ContourPoint {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x as i32, y as i32)
    }
}

/// Sequence of Freeman directions
///
/// Serializes as a plain list of codes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainCode(Vec<Direction>);

impl ChainCode {
    /// Empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from Freeman codes
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if a code is above 7.
    pub fn from_codes(codes: &[u8]) -> RegionResult<Self> {
        codes
            .iter()
            .map(|&c| Direction::try_from(c))
            .collect::<RegionResult<Vec<_>>>()
            .map(ChainCode)
    }

    /// Append a step
    pub fn push(&mut self, dir: Direction) {
        self.0.push(dir);
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the chain has no steps
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Steps in order
    pub fn directions(&self) -> &[Direction] {
        &self.0
    }

    /// Steps as Freeman codes
    pub fn codes(&self) -> Vec<u8> {
        self.0.iter().map(|d| d.code()).collect()
    }

    /// Net displacement (dx, dy) of walking every step
    pub fn displacement(&self) -> (i32, i32) {
        self.0
            .iter()
            .fold((0, 0), |(x, y), d| (x + d.dx(), y + d.dy()))
    }

    /// True if the chain is non-empty and returns to its start
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.displacement() == (0, 0)
    }

    /// Positions visited when walking from `start`, `start` included
    pub fn points(&self, start: ContourPoint) -> Vec<ContourPoint> {
        let mut pts = Vec::with_capacity(self.0.len() + 1);
        let mut p = start;
        pts.push(p);
        for &d in &self.0 {
            p = p.moved(d);
            pts.push(p);
        }
        pts
    }
}

/// One traced boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    /// 1-based index in scan order
    pub id: usize,
    /// First pixel of the contour
    pub start: ContourPoint,
    /// Steps from `start`
    pub chain_code: ChainCode,
    /// Number of steps
    pub length: usize,
    /// Whether tracing returned to `start`
    pub closed: bool,
}

/// All contours traced from one raster
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContourSet {
    /// Contours in scan order
    pub contours: Vec<Contour>,
    /// Number of contours
    pub total_contours: usize,
}

/// Options for boundary tracing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    /// Binarization threshold: samples `> threshold` are foreground
    pub threshold: u8,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self { threshold: 128 }
    }
}

impl TraceOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set binarization threshold
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Binarize a grayscale raster and trace every object boundary
pub fn trace_boundaries(raster: &Raster, options: &TraceOptions) -> RegionResult<ContourSet> {
    trace_binary(&binarize(raster, options.threshold))
}

/// Trace every object boundary of a binary raster (nonzero = foreground)
///
/// The raster is scanned in row-major order; each unvisited boundary pixel
/// starts a new contour. Contours that cannot take a single step (isolated
/// pixels, or starts whose neighbors were all claimed by earlier contours)
/// are dropped.
pub fn trace_binary(binary: &Raster) -> RegionResult<ContourSet> {
    let (w, h) = binary.dimensions();
    let mut visited = vec![false; binary.len()];
    let mut contours = Vec::new();
    let max_len = binary.len();

    for y in 0..h {
        for x in 0..w {
            let idx = pixel_index(w, x, y);
            if visited[idx] || !is_boundary(binary, x, y) {
                continue;
            }
            let (chain, closed) = trace_contour(binary, (x, y), &mut visited, max_len);
            if chain.is_empty() {
                continue;
            }
            contours.push(Contour {
                id: contours.len() + 1,
                start: ContourPoint::from((x, y)),
                length: chain.len(),
                chain_code: chain,
                closed,
            });
        }
    }

    debug!("chain: {} contours in {}x{}", contours.len(), w, h);
    Ok(ContourSet {
        total_contours: contours.len(),
        contours,
    })
}

/// True for a foreground pixel with at least one in-bounds background
/// 8-neighbor.
pub fn is_boundary(binary: &Raster, x: u32, y: u32) -> bool {
    let (w, h) = binary.dimensions();
    if binary.get_pixel_unchecked(x, y) == 0 {
        return false;
    }
    NEIGHBORS_8.iter().any(|&(dx, dy)| {
        offset_within(x, y, dx, dy, w, h).is_some_and(|(nx, ny)| binary.get_pixel_unchecked(nx, ny) == 0)
    })
}

#[inline]
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    (y as usize) * (width as usize) + x as usize
}

/// Follow one boundary from `start`, marking pixels visited.
///
/// Returns the chain and whether it closed on `start`. Reaching `start`
/// again appends the closing step.
fn trace_contour(
    binary: &Raster,
    start: (u32, u32),
    visited: &mut [bool],
    max_len: usize,
) -> (ChainCode, bool) {
    let (w, h) = binary.dimensions();
    let mut chain = ChainCode::new();
    let mut current = start;
    visited[pixel_index(w, start.0, start.1)] = true;
    let mut start_dir = 0usize;

    loop {
        let mut moved = false;

        for offset in 0..8 {
            let dir = Direction::from_index(start_dir + offset);
            let Some(next) = offset_within(current.0, current.1, dir.dx(), dir.dy(), w, h) else {
                continue;
            };
            if !is_boundary(binary, next.0, next.1) {
                continue;
            }
            if !chain.is_empty() && next == start {
                chain.push(dir);
                return (chain, true);
            }
            let idx = pixel_index(w, next.0, next.1);
            if !visited[idx] {
                chain.push(dir);
                visited[idx] = true;
                current = next;
                start_dir = (dir.code() as usize + 6) % 8;
                moved = true;
                break;
            }
        }

        if !moved {
            return (chain, false);
        }
        if chain.len() > max_len {
            warn!(
                "chain: trace from ({}, {}) exceeded {} steps, abandoning",
                start.0, start.1, max_len
            );
            return (chain, false);
        }
    }
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
    #[cfg(target_pointer_width = "64")]
    fn test_pixel_index_does_not_wrap() {
        assert_eq!(pixel_index(70_000, 69_999, 70_000), 4_900_069_999);
        assert_eq!(pixel_index(5, 2, 3), 17);
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::North.offset(), (0, -1));
        assert_eq!(Direction::East.offset(), (1, 0));
        assert_eq!(Direction::SouthWest.offset(), (-1, 1));
        for d in Direction::all() {
            assert_eq!(Direction::from_code(d.code()), Some(d));
        }
        assert_eq!(Direction::from_code(8), None);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        for d in Direction::all() {
            let opp = Direction::from_index(d as usize + 4);
            assert_eq!((d.dx() + opp.dx(), d.dy() + opp.dy()), (0, 0));
        }
    }

    #[test]
    fn test_chain_from_codes() {
        let chain = ChainCode::from_codes(&[2, 4, 6, 0]).unwrap();
        assert!(chain.is_closed());
        let pts = chain.points(ContourPoint::new(1, 1));
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[2], ContourPoint::new(2, 2));
        assert!(ChainCode::from_codes(&[9]).is_err());
    }

    #[test]
    fn test_square_block() {
        let r = raster(5, 5, &[".....", ".###.", ".###.", ".###.", "....."]);
        let set = trace_binary(&r).unwrap();
        assert_eq!(set.total_contours, 1);
        let c = &set.contours[0];
        assert_eq!(c.id, 1);
        assert_eq!(c.start, ContourPoint::new(1, 1));
        assert_eq!(c.chain_code.codes(), vec![2, 2, 4, 4, 6, 6, 0, 0]);
        assert!(c.closed);
        assert_eq!(c.length, 8);
    }

    #[test]
    fn test_two_pixel_object() {
        let r = raster(4, 3, &["....", ".##.", "...."]);
        let set = trace_binary(&r).unwrap();
        assert_eq!(set.total_contours, 1);
        assert_eq!(set.contours[0].chain_code.codes(), vec![2, 6]);
        assert!(set.contours[0].closed);
    }

    #[test]
    fn test_isolated_pixel_is_dropped() {
        let r = raster(3, 3, &["...", ".#.", "..."]);
        assert_eq!(trace_binary(&r).unwrap().total_contours, 0);
    }

    #[test]
    fn test_full_raster_has_no_boundary() {
        let r = Raster::new_with_value(4, 4, 255).unwrap();
        assert_eq!(trace_binary(&r).unwrap().total_contours, 0);
    }

    #[test]
    fn test_trace_boundaries_threshold() {
        let r = Raster::from_fn(6, 6, |x, y| {
            if (1..4).contains(&x) && (1..4).contains(&y) { 200 } else { 100 }
        })
        .unwrap();
        let set = trace_boundaries(&r, &TraceOptions::new().with_threshold(150)).unwrap();
        assert_eq!(set.total_contours, 1);
        let none = trace_boundaries(&r, &TraceOptions::new().with_threshold(200)).unwrap();
        assert_eq!(none.total_contours, 0);
    }
}
