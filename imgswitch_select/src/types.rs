// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for selection: state snapshots, directions, keys, intents, and transitions.
//!
//! ## Overview
//!
//! Input handlers translate raw events into an [`Intent`] and feed it to
//! [`SelectionController::apply`](crate::controller::SelectionController::apply).
//! The controller answers with a [`Transition`] describing whether the index moved.

/// Snapshot of the selection.
///
/// Returned by [`SelectionController::state`](crate::controller::SelectionController::state).
/// When `count` is zero there is no selection and [`SelectionState::index`] returns `None`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SelectionState {
    pub(crate) index: usize,
    pub(crate) count: usize,
}

impl SelectionState {
    /// The empty state: no configuration loaded, or a configuration without options.
    pub const EMPTY: Self = Self { index: 0, count: 0 };

    /// Currently selected index, or `None` when nothing is selectable.
    pub const fn index(&self) -> Option<usize> {
        if self.count == 0 {
            None
        } else {
            Some(self.index)
        }
    }

    /// Number of selectable segments.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// True if there is nothing to select.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// True if `index` is the current selection.
    pub const fn is_selected(&self, index: usize) -> bool {
        self.count > 0 && self.index == index
    }
}

/// Direction of a relative move along the segment row.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Towards index 0 (keyboard left).
    Previous,
    /// Towards the last index (keyboard right).
    Next,
}

/// Keyboard keys the selection reacts to.
///
/// Toolkits map their native key codes onto this enum and call
/// [`Intent::from_key`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home: jump to the first segment.
    Home,
    /// End: jump to the last segment.
    End,
    /// Any other key; ignored.
    Other,
}

/// A discrete request to change the selection.
///
/// Every input path (click, keyboard, touch gesture) reduces to one of these.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Intent {
    /// Select the segment at the given index (click).
    Select(usize),
    /// Move one segment in the given direction, clamped at both ends.
    Move(Direction),
    /// Jump to the first segment.
    First,
    /// Jump to the last segment.
    Last,
    /// Commit the result of a gesture; `None` when the gesture resolved to no segment.
    Gesture(Option<usize>),
}

impl Intent {
    /// Map a key press to an intent, or `None` for keys with no selection meaning.
    pub const fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowLeft => Some(Self::Move(Direction::Previous)),
            Key::ArrowRight => Some(Self::Move(Direction::Next)),
            Key::Home => Some(Self::First),
            Key::End => Some(Self::Last),
            Key::Other => None,
        }
    }
}

/// Outcome of applying an [`Intent`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Transition {
    /// The selection is unchanged (already there, out of range, or nothing to select).
    Unchanged,
    /// The selection moved from one index to another.
    Changed {
        /// Previous index.
        from: usize,
        /// New index.
        to: usize,
    },
}

impl Transition {
    /// True if the selection moved.
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}
