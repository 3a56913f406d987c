// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Imgswitch Select: a deterministic, `no_std` selection state machine for segmented controls.
//!
//! ## Overview
//!
//! A segmented control shows a row of buttons, exactly one of which is selected.
//! This crate owns that selected index and nothing else: it does not draw, hit-test, or
//! listen to events. Toolkit handlers reduce clicks, key presses, and gestures to an
//! [`Intent`](crate::types::Intent) and hand it to a
//! [`SelectionController`](crate::controller::SelectionController).
//!
//! ## Rules
//!
//! - A fresh configuration starts at index 0.
//! - Selecting an index outside `0..count` is ignored.
//! - Left/right moves clamp at the ends; they never wrap.
//! - With no segments, every intent is ignored.
//!
//! Transitions never fail. Malformed input degrades to
//! [`Transition::Unchanged`](crate::types::Transition::Unchanged).
//!
//! ## Minimal example
//!
//! ```
//! use imgswitch_select::controller::SelectionController;
//! use imgswitch_select::types::{Intent, Key, Transition};
//!
//! let mut selection = SelectionController::new();
//! selection.reset(4);
//! assert_eq!(selection.index(), Some(0));
//!
//! // Clicking the second button.
//! assert_eq!(selection.apply(Intent::Select(1)), Transition::Changed { from: 0, to: 1 });
//!
//! // Arrow keys.
//! let left = Intent::from_key(Key::ArrowLeft).unwrap();
//! selection.apply(left);
//! selection.apply(left);
//! assert_eq!(selection.index(), Some(0));
//!
//! // A gesture that did not land on a segment.
//! assert_eq!(selection.apply(Intent::Gesture(None)), Transition::Unchanged);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod controller;
pub mod types;

pub use controller::SelectionController;
pub use types::{Direction, Intent, Key, SelectionState, Transition};
