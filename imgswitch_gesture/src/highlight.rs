// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Highlight state helper: compute enter/leave transitions as a drag's candidate changes.
//!
//! ## Usage
//!
//! 1) Feed each move to [`GestureTracker::touch_move`](crate::tracker::GestureTracker::touch_move).
//! 2) Pass the returned candidate to [`HighlightState::update`].
//! 3) Apply the resulting `Leave(..)` / `Enter(..)` events to the renderer.
//! 4) Call [`HighlightState::clear`] when the gesture ends or is cancelled.
//!
//! ## Minimal example
//!
//! ```
//! use imgswitch_gesture::highlight::{HighlightEvent, HighlightState};
//! let mut h = HighlightState::new();
//! assert_eq!(h.update(Some(0)), vec![HighlightEvent::Enter(0)]);
//! assert_eq!(h.update(Some(2)), vec![HighlightEvent::Leave(0), HighlightEvent::Enter(2)]);
//! assert_eq!(h.clear(), vec![HighlightEvent::Leave(2)]);
//! ```

use alloc::vec::Vec;

/// Tracks which segment is highlighted while a drag is in progress.
///
/// Ordering semantics: when the highlight moves, the leave for the old segment
/// is emitted before the enter for the new one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
    current: Option<usize>,
}

/// A highlight transition event.
///
/// Returned by [`HighlightState::update`] and [`HighlightState::clear`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HighlightEvent {
    /// The drag now hovers the given segment.
    Enter(usize),
    /// The drag no longer hovers the given segment.
    Leave(usize),
}

impl HighlightState {
    /// Create a state with nothing highlighted.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Currently highlighted segment, if any.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Drop the highlight, returning the leave event if something was highlighted.
    pub fn clear(&mut self) -> Vec<HighlightEvent> {
        self.update(None)
    }

    /// Move the highlight to `candidate` and return the transitions required.
    ///
    /// An unchanged candidate yields no events.
    pub fn update(&mut self, candidate: Option<usize>) -> Vec<HighlightEvent> {
        let mut out = Vec::new();
        if self.current == candidate {
            return out;
        }
        if let Some(old) = self.current {
            out.push(HighlightEvent::Leave(old));
        }
        if let Some(new) = candidate {
            out.push(HighlightEvent::Enter(new));
        }
        self.current = candidate;
        out
    }
}
