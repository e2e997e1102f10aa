//! Column ranges and sampling helpers.
//!
//! All column indices are 1-based and inclusive on both ends.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column range a scan is clipped to before patch extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct ClipRange {
    /// First kept column
    pub left: usize,
    /// Last kept column
    pub right: usize,
}

impl ClipRange {
    /// Creates a clip range.
    #[must_use]
    pub const fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Number of columns kept by this range.
    ///
    /// Assumes `left <= right`.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.right - self.left + 1
    }
}

impl From<[usize; 2]> for ClipRange {
    fn from([left, right]: [usize; 2]) -> Self {
        Self { left, right }
    }
}

impl From<ClipRange> for [usize; 2] {
    fn from(range: ClipRange) -> Self {
        [range.left, range.right]
    }
}

impl fmt::Display for ClipRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.left, self.right)
    }
}

/// Column bounds of one region within a B-scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct RegionBounds {
    /// First column of the region
    pub left: usize,
    /// Last column of the region
    pub right: usize,
}

impl RegionBounds {
    /// Creates region bounds.
    #[must_use]
    pub const fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// A single region covering columns `1..=width`.
    #[must_use]
    pub const fn full(width: usize) -> Self {
        Self { left: 1, right: width }
    }

    /// Returns `true` if the bounds are ordered and lie inside `1..=width`.
    #[must_use]
    pub const fn fits(&self, width: usize) -> bool {
        self.left >= 1 && self.left <= self.right && self.right <= width
    }
}

impl From<[usize; 2]> for RegionBounds {
    fn from([left, right]: [usize; 2]) -> Self {
        Self { left, right }
    }
}

impl From<RegionBounds> for [usize; 2] {
    fn from(bounds: RegionBounds) -> Self {
        [bounds.left, bounds.right]
    }
}

/// Returns `1..=count` as a vector.
#[must_use]
pub fn one_based(count: usize) -> Vec<usize> {
    (1..=count).collect()
}

/// Evenly spaced columns over `1..=width` at half density.
///
/// Takes `ceil(width / 2)` points (at least two when the width allows it, so
/// both ends are covered), rounds each to the nearest column and drops
/// duplicates. The result is strictly increasing, starts at 1 and ends at
/// `width`. A zero width yields no columns.
#[must_use]
pub fn subsample_columns(width: usize) -> Vec<usize> {
    if width == 0 {
        return Vec::new();
    }

    let count = width.div_ceil(2).max(width.min(2));
    if count == 1 {
        return vec![1];
    }

    #[allow(clippy::cast_precision_loss)]
    let step = (width - 1) as f64 / (count - 1) as f64;

    let mut columns: Vec<usize> = (0..count)
        .map(|i| {
            #[allow(
                clippy::cast_precision_loss,
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss
            )]
            let column = (1.0 + i as f64 * step).round() as usize;
            column.clamp(1, width)
        })
        .collect();
    columns.dedup();
    columns
}
