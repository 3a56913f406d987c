// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input events and the renderer-facing segment view.

use imgswitch_gesture::highlight::HighlightEvent;
use imgswitch_select::types::{Key, Transition};
use kurbo::{Point, Rect};

/// A raw event from the host toolkit.
///
/// Coordinates are in the same space as the row bounds passed with
/// [`InputEvent::TouchStart`].
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A segment button was clicked.
    Click(usize),
    /// A key was pressed while the control had focus.
    Key(Key),
    /// A touch began. `row` is the bounding box of the whole segment row.
    TouchStart {
        /// Row bounding box at the time of the touch.
        row: Rect,
        /// Current touch points; only the first is tracked.
        touches: Vec<Point>,
    },
    /// Touch points moved. May be empty for coalesced events.
    TouchMove(Vec<Point>),
    /// The touch ended. May be empty; the last tracked point is used then.
    TouchEnd(Vec<Point>),
    /// The platform cancelled the touch.
    TouchCancel,
}

/// What handling an [`InputEvent`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputOutcome {
    /// Selection change, if any.
    pub transition: Option<Transition>,
    /// Live highlight changes for an in-progress drag.
    pub highlight: Vec<HighlightEvent>,
}

impl InputOutcome {
    /// True if the selection moved.
    pub fn changed(&self) -> bool {
        self.transition.is_some_and(|t| t.is_changed())
    }
}

bitflags::bitflags! {
    /// Renderer state of one segment button.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SegmentFlags: u8 {
        /// The segment is the current selection.
        const SELECTED    = 0b0000_0001;
        /// A drag is hovering the segment.
        const HIGHLIGHTED = 0b0000_0010;
        /// The option's image cannot be shown under the current environment.
        const INVALID     = 0b0000_0100;
    }
}

/// One button as the renderer should draw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentView<'a> {
    /// Position among the selectable segments.
    pub segment: usize,
    /// Position in the configuration.
    pub option_index: usize,
    /// Button label.
    pub label: &'a str,
    /// Visual state.
    pub flags: SegmentFlags,
}
