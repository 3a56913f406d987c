// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch sequence tracking.
//!
//! ## Overview
//!
//! A sequence is `start → move* → (end | cancel)`. The row geometry is captured
//! at start and used for the whole sequence, so layout changes mid-drag do not
//! shift the segments under the finger.
//!
//! ## Release rules
//!
//! On end, the final touch x is resolved against the captured row:
//! - Inside `[left, left + width]`: the segment under the finger commits.
//! - Outside: the nearest edge segment commits
//!   (see [`OffEdgePolicy`](crate::types::OffEdgePolicy)), unless it is the
//!   segment the drag started on.
//! - If that segment is the one the drag started on and the finger did not
//!   travel further than [`GestureConfig::slop`](crate::types::GestureConfig::slop)
//!   horizontally, nothing commits.
//!
//! Cancel never commits. Only the first touch point of each event is tracked.

use kurbo::Point;
use tracing::{debug, trace};

use crate::types::{GestureConfig, OffEdgePolicy, SegmentRow, distance};

#[derive(Copy, Clone, Debug, PartialEq)]
struct Sequence {
    row: SegmentRow,
    origin: Point,
    origin_segment: usize,
    last: Point,
    candidate: usize,
}

/// Converts touch sequences over a segment row into selection candidates.
///
/// ## Usage
///
/// - [`GestureTracker::touch_start`] with the row geometry and the start touches.
/// - [`GestureTracker::touch_move`] for each move; the returned candidate is
///   advisory (live highlight) and not committed.
/// - [`GestureTracker::touch_end`] returns the segment to commit, if any.
/// - [`GestureTracker::touch_cancel`] abandons the sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureTracker {
    config: GestureConfig,
    active: Option<Sequence>,
}

impl GestureTracker {
    /// Create a tracker with default tuning.
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    /// Create a tracker with explicit tuning.
    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// True while a sequence is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Advisory candidate of the active sequence.
    pub fn candidate(&self) -> Option<usize> {
        self.active.map(|s| s.candidate)
    }

    /// Segment the active sequence started on.
    pub fn origin_segment(&self) -> Option<usize> {
        self.active.map(|s| s.origin_segment)
    }

    /// Begin a sequence, superseding any unfinished one.
    ///
    /// Returns the origin segment, which is also the initial candidate. A start
    /// with no touches, or over a degenerate row, leaves no sequence active.
    pub fn touch_start(&mut self, row: SegmentRow, touches: &[Point]) -> Option<usize> {
        if self.active.take().is_some() {
            debug!("touch start superseded an unfinished sequence");
        }
        let &origin = touches.first()?;
        let Some(origin_segment) = row.segment_at_point(origin) else {
            debug!(count = row.count(), "touch start on a degenerate row");
            return None;
        };
        self.active = Some(Sequence {
            row,
            origin,
            origin_segment,
            last: origin,
            candidate: origin_segment,
        });
        trace!(origin_segment, "touch sequence started");
        Some(origin_segment)
    }

    /// Track a move and return the advisory candidate.
    ///
    /// An empty touch list is a coalesced platform event; it is ignored and
    /// returns `None` without changing tracked state.
    pub fn touch_move(&mut self, touches: &[Point]) -> Option<usize> {
        let seq = self.active.as_mut()?;
        let &pt = touches.first()?;
        seq.last = pt;
        if let Some(candidate) = seq.row.segment_at(pt.x) {
            seq.candidate = candidate;
        }
        Some(seq.candidate)
    }

    /// Finish the sequence and return the segment to commit, if any.
    ///
    /// When the end event carries no touches, the last tracked point is used.
    pub fn touch_end(&mut self, touches: &[Point]) -> Option<usize> {
        let seq = self.active.take()?;
        let release = touches.first().copied().unwrap_or(seq.last);
        let committed = self.resolve_release(&seq, release);
        trace!(?committed, x = release.x, "touch sequence ended");
        committed
    }

    /// Abandon the sequence. Never commits.
    pub fn touch_cancel(&mut self) {
        if self.active.take().is_some() {
            trace!("touch sequence cancelled");
        }
    }

    fn resolve_release(&self, seq: &Sequence, release: Point) -> Option<usize> {
        let row = &seq.row;
        let inside = row.contains_x(release.x);
        if !inside && self.config.off_edge == OffEdgePolicy::Ignore {
            return None;
        }
        if inside
            && self.config.seam_tolerance > 0.0
            && let Some(d) = row.seam_distance(release.x)
            && d <= self.config.seam_tolerance
        {
            trace!(d, "release on a seam");
            return None;
        }
        let committed = row.segment_at(release.x)?;
        // Off the edge only counts in the direction away from the origin.
        if !inside && committed == seq.origin_segment {
            trace!(committed, "release off the origin's own edge");
            return None;
        }
        let travel = distance(release.x, seq.origin.x);
        if committed == seq.origin_segment && travel <= self.config.slop {
            return None;
        }
        Some(committed)
    }
}
