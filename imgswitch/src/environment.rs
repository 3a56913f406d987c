// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color-scheme queries.
//!
//! The switcher asks for the current scheme on every resolution and never caches
//! the answer, so a theme switch takes effect on the next render.

use std::cell::Cell;
use std::rc::Rc;

use imgswitch_source::env::ColorScheme;

/// Reports the viewer's current color-scheme preference.
pub trait ColorSchemeQuery {
    /// Current preference.
    fn prefers_color_scheme(&self) -> ColorScheme;
}

impl<F: Fn() -> ColorScheme> ColorSchemeQuery for F {
    fn prefers_color_scheme(&self) -> ColorScheme {
        self()
    }
}

/// A scheme that never changes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedScheme(pub ColorScheme);

impl ColorSchemeQuery for FixedScheme {
    fn prefers_color_scheme(&self) -> ColorScheme {
        self.0
    }
}

/// A shared, settable scheme for hosts that push theme changes.
///
/// Clones share the same value: keep one clone in the switcher and call
/// [`SchemeCell::set`] on another when the platform reports a change.
#[derive(Clone, Debug, Default)]
pub struct SchemeCell(Rc<Cell<ColorScheme>>);

impl SchemeCell {
    /// Cell holding `scheme`.
    pub fn new(scheme: ColorScheme) -> Self {
        Self(Rc::new(Cell::new(scheme)))
    }

    /// Replace the current scheme.
    pub fn set(&self, scheme: ColorScheme) {
        self.0.set(scheme);
    }

    /// Current scheme.
    pub fn get(&self) -> ColorScheme {
        self.0.get()
    }
}

impl ColorSchemeQuery for SchemeCell {
    fn prefers_color_scheme(&self) -> ColorScheme {
        self.get()
    }
}
