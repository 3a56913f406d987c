// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection controller implementation.
//!
//! ## Overview
//!
//! Owns the selected index over `count` segments and applies [`Intent`]s.
//!
//! ## Rules
//!
//! - A fresh load starts at index 0.
//! - Out-of-range selections are ignored.
//! - Relative moves clamp at both ends; there is no wraparound.
//! - A gesture that resolved to no segment is ignored.
//! - With `count == 0` every intent is ignored.
//!
//! No intent fails. Anything that cannot be honored leaves the state as it was.

use tracing::trace;

use crate::types::{Direction, Intent, SelectionState, Transition};

/// Deterministic selection state machine.
///
/// ## Usage
///
/// - Call [`SelectionController::reset`] whenever a configuration loads
///   (or fails to load, with `count == 0`).
/// - Feed every user action through [`SelectionController::apply`], or call the
///   dedicated entry points directly.
/// - Read the current state with [`SelectionController::state`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    /// Create a controller with nothing to select.
    pub const fn new() -> Self {
        Self {
            state: SelectionState::EMPTY,
        }
    }

    /// Create a controller over `count` segments with index 0 selected.
    pub const fn with_count(count: usize) -> Self {
        Self {
            state: SelectionState { index: 0, count },
        }
    }

    /// Current selection snapshot.
    pub const fn state(&self) -> SelectionState {
        self.state
    }

    /// Currently selected index, if any.
    pub const fn index(&self) -> Option<usize> {
        self.state.index()
    }

    /// Number of selectable segments.
    pub const fn count(&self) -> usize {
        self.state.count
    }

    /// Start over with `count` segments and index 0.
    pub fn reset(&mut self, count: usize) {
        self.state = SelectionState { index: 0, count };
    }

    /// Replace the segment count, keeping `index` if it is still in range.
    ///
    /// Indices past the end clamp to the last segment. Used when the set of
    /// selectable segments shrinks or grows without a fresh load.
    pub fn resize(&mut self, count: usize, index: usize) {
        let index = if count == 0 { 0 } else { index.min(count - 1) };
        self.state = SelectionState { index, count };
    }

    /// Select segment `index`. Out-of-range indices are ignored.
    pub fn select_index(&mut self, index: usize) -> Transition {
        if index >= self.state.count {
            trace!(index, count = self.state.count, "ignoring out-of-range selection");
            return Transition::Unchanged;
        }
        self.set(index)
    }

    /// Move one segment towards `direction`, stopping at either end.
    pub fn move_relative(&mut self, direction: Direction) -> Transition {
        let Some(current) = self.state.index() else {
            return Transition::Unchanged;
        };
        let next = match direction {
            Direction::Previous => current.saturating_sub(1),
            Direction::Next => (current + 1).min(self.state.count - 1),
        };
        self.set(next)
    }

    /// Commit the outcome of a gesture. `None` is ignored.
    pub fn apply_gesture_candidate(&mut self, candidate: Option<usize>) -> Transition {
        match candidate {
            Some(index) => self.select_index(index),
            None => Transition::Unchanged,
        }
    }

    /// Apply any [`Intent`].
    pub fn apply(&mut self, intent: Intent) -> Transition {
        match intent {
            Intent::Select(index) => self.select_index(index),
            Intent::Move(direction) => self.move_relative(direction),
            Intent::First => self.select_index(0),
            Intent::Last => match self.state.count.checked_sub(1) {
                Some(last) => self.select_index(last),
                None => Transition::Unchanged,
            },
            Intent::Gesture(candidate) => self.apply_gesture_candidate(candidate),
        }
    }

    fn set(&mut self, index: usize) -> Transition {
        let from = self.state.index;
        if from == index {
            return Transition::Unchanged;
        }
        self.state.index = index;
        trace!(from, to = index, "selection changed");
        Transition::Changed { from, to: index }
    }
}
