// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for gesture tracking: row geometry and tuning knobs.

use kurbo::{Point, Rect};

/// Geometry of a segmented control row, captured when a touch sequence starts.
///
/// The row is split into `count` equal-width segments from left to right.
/// Only the horizontal extent matters for hit testing; the vertical position of
/// a touch is ignored so that a finger sliding below or above the buttons still
/// tracks the segment underneath it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentRow {
    bounds: Rect,
    count: usize,
}

impl SegmentRow {
    /// Create a row from its bounding box (world/client coordinates) and segment count.
    ///
    /// The rectangle is normalized, so inverted inputs describe the same row.
    pub fn new(bounds: Rect, count: usize) -> Self {
        Self {
            bounds: bounds.abs(),
            count,
        }
    }

    /// Bounding box of the row.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of segments.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Left edge of the row.
    pub fn left(&self) -> f64 {
        self.bounds.x0
    }

    /// Row width.
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    /// True if the row cannot produce a segment (no segments, or no width).
    pub fn is_degenerate(&self) -> bool {
        let width = self.width();
        self.count == 0 || width.is_nan() || width <= 0.0
    }

    /// Width of one segment, or `None` for a degenerate row.
    pub fn segment_width(&self) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        let count = self.count as f64;
        Some(self.width() / count)
    }

    /// Horizontal offset of `x` from the left edge, clamped to `[0, width]`.
    pub fn relative_x(&self, x: f64) -> f64 {
        (x - self.left()).clamp(0.0, self.width().max(0.0))
    }

    /// True if `x` lies within `[left, left + width]` (both ends inclusive).
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.bounds.x0 && x <= self.bounds.x1
    }

    /// Segment under `x`, with positions outside the row clamped to the nearest edge segment.
    ///
    /// Returns `None` for a degenerate row.
    pub fn segment_at(&self, x: f64) -> Option<usize> {
        let segment_width = self.segment_width()?;
        let slot = self.relative_x(x) / segment_width;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "slot is non-negative and bounded by count; truncation is the floor we want."
        )]
        let index = slot as usize;
        Some(index.min(self.count - 1))
    }

    /// Segment under a point; see [`SegmentRow::segment_at`].
    pub fn segment_at_point(&self, pt: Point) -> Option<usize> {
        self.segment_at(pt.x)
    }

    /// Bounding box of segment `index`, or `None` if out of range.
    pub fn segment_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.count {
            return None;
        }
        let segment_width = self.segment_width()?;
        let x0 = self.left() + segment_width * index as f64;
        Some(Rect::new(
            x0,
            self.bounds.y0,
            x0 + segment_width,
            self.bounds.y1,
        ))
    }

    /// Distance from `x` to the nearest seam between two adjacent segments.
    ///
    /// Returns `None` when the row has fewer than two segments.
    pub fn seam_distance(&self, x: f64) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        let segment_width = self.segment_width()?;
        let slot = self.relative_x(x) / segment_width;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "slot is non-negative and bounded by count."
        )]
        let below = slot as usize;
        let mut best = f64::INFINITY;
        // Interior seams only: 1..count.
        for seam in [below, below + 1] {
            if seam == 0 || seam >= self.count {
                continue;
            }
            let seam_x = segment_width * seam as f64;
            let d = distance(seam_x, self.relative_x(x));
            if d < best {
                best = d;
            }
        }
        if best.is_finite() { Some(best) } else { None }
    }
}

/// What to do when a drag is released outside the row's horizontal extent.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum OffEdgePolicy {
    /// Commit the nearest edge segment, so fast flicks past the last button still register.
    #[default]
    CommitEdge,
    /// Releasing outside the row abandons the gesture.
    Ignore,
}

/// Tuning for [`GestureTracker`](crate::tracker::GestureTracker).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GestureConfig {
    /// Net horizontal movement at or below which a release over the origin segment is a no-op.
    pub slop: f64,
    /// Releases within this distance of an interior seam do not commit. Zero disables it.
    pub seam_tolerance: f64,
    /// Handling of releases outside the row.
    pub off_edge: OffEdgePolicy,
}

/// Absolute difference without relying on `std` float intrinsics.
pub(crate) fn distance(a: f64, b: f64) -> f64 {
    if a > b { a - b } else { b - a }
}
