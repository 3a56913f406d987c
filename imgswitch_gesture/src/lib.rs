// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Imgswitch Gesture: Kurbo-native touch-drag tracking for segmented controls.
//!
//! ## Overview
//!
//! Users can slide a finger along a row of segment buttons and release over the
//! one they want. This crate turns that touch sequence into a selection
//! candidate. It does not own the selection; feed its result into
//! `imgswitch_select` as a gesture intent.
//!
//! - [`SegmentRow`](crate::types::SegmentRow): the row's bounding box split into equal segments.
//! - [`GestureTracker`](crate::tracker::GestureTracker): start/move/end/cancel state machine.
//! - [`HighlightState`](crate::highlight::HighlightState): enter/leave transitions for a live highlight.
//! - [`GestureConfig`](crate::types::GestureConfig): slop, seam tolerance, and off-edge policy.
//!
//! ## Geometry
//!
//! At touch start the row's bounds are captured; `segment_width = width / count`.
//! A touch at `x` maps to `floor(clamp(x - left, 0, width) / segment_width)`, clamped to
//! the last segment. The right edge belongs to the last segment. Vertical position is ignored.
//!
//! ## Example
//!
//! ```
//! use imgswitch_gesture::tracker::GestureTracker;
//! use imgswitch_gesture::types::SegmentRow;
//! use kurbo::{Point, Rect};
//!
//! // Four segments, each 100 wide.
//! let row = SegmentRow::new(Rect::new(0.0, 0.0, 400.0, 40.0), 4);
//! let mut tracker = GestureTracker::new();
//!
//! assert_eq!(tracker.touch_start(row, &[Point::new(20.0, 20.0)]), Some(0));
//! // Coalesced events with no touches are ignored.
//! assert_eq!(tracker.touch_move(&[]), None);
//! assert_eq!(tracker.touch_move(&[Point::new(250.0, 20.0)]), Some(2));
//! assert_eq!(tracker.touch_end(&[Point::new(250.0, 20.0)]), Some(2));
//!
//! // A cancelled drag commits nothing.
//! tracker.touch_start(row, &[Point::new(20.0, 20.0)]);
//! tracker.touch_move(&[Point::new(250.0, 20.0)]);
//! tracker.touch_cancel();
//! assert!(!tracker.is_active());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod highlight;
pub mod tracker;
pub mod types;

pub use highlight::{HighlightEvent, HighlightState};
pub use tracker::GestureTracker;
pub use types::{GestureConfig, OffEdgePolicy, SegmentRow};
