// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Imgswitch: the core of a segmented image switcher.
//!
//! ## Overview
//!
//! A JSON configuration lists labeled options, each pointing at one or more image variants.
//! A renderer draws one button per option and the image of the selected option. This crate
//! sits between the host and the renderer:
//!
//! - Clicks, arrow keys, and touch drags arrive as [`InputEvent`](crate::input::InputEvent)s
//!   and are reduced to selection intents (`imgswitch_select`), with drags tracked by
//!   `imgswitch_gesture`.
//! - The selected option's image is resolved against the live color scheme (`imgswitch_source`).
//! - Configuration loading goes through a [`ConfigSource`](crate::loader::ConfigSource);
//!   a failed load leaves nothing selectable and a static failure message.
//!
//! It does not draw, fetch images, or animate.
//!
//! ## Layering
//!
//! - `imgswitch_select`: selection state machine (`no_std`).
//! - `imgswitch_gesture`: touch tracking over a row of segments (`no_std`, Kurbo).
//! - `imgswitch_source`: option schema and image-source resolution.
//! - `imgswitch` (this crate): the [`Switcher`](crate::switcher::Switcher) wiring them together.
//!
//! ## Example
//!
//! ```
//! use imgswitch::environment::FixedScheme;
//! use imgswitch::input::InputEvent;
//! use imgswitch::loader::StaticConfigSource;
//! use imgswitch::switcher::Switcher;
//! use imgswitch_select::types::Key;
//! use imgswitch_source::env::ColorScheme;
//! use kurbo::{Point, Rect};
//!
//! let source = StaticConfigSource::new().with("example/config.json", r#"[
//!     { "label": "Dark Variant", "src": "example/dark.svg" },
//!     { "label": "Light Variant", "src": "example/light.svg" },
//!     { "label": "First Republic", "src": "example/first-republic.svg" }
//! ]"#);
//!
//! let mut switcher = Switcher::new(FixedScheme(ColorScheme::Light));
//! switcher.load_from_url(&source, "https://example.com/#example/config.json");
//! let asset = |s: &Switcher<FixedScheme>| s.current_asset().unwrap().unwrap().asset_url.to_owned();
//! assert_eq!(asset(&switcher), "example/dark.svg");
//!
//! switcher.handle(InputEvent::Click(1));
//! assert_eq!(asset(&switcher), "example/light.svg");
//!
//! switcher.handle(InputEvent::Key(Key::ArrowRight));
//! assert_eq!(switcher.selection().index(), Some(2));
//!
//! // Drag from the third button back onto the first.
//! let row = Rect::new(0.0, 0.0, 300.0, 40.0);
//! switcher.handle(InputEvent::TouchStart { row, touches: vec![Point::new(250.0, 20.0)] });
//! switcher.handle(InputEvent::TouchMove(vec![Point::new(20.0, 20.0)]));
//! switcher.handle(InputEvent::TouchEnd(vec![Point::new(20.0, 20.0)]));
//! assert_eq!(asset(&switcher), "example/dark.svg");
//! ```

pub mod environment;
pub mod input;
pub mod loader;
pub mod switcher;

pub use environment::{ColorSchemeQuery, FixedScheme, SchemeCell};
pub use input::{InputEvent, InputOutcome, SegmentFlags, SegmentView};
pub use loader::{ConfigSource, FileConfigSource, StaticConfigSource, config_location_from_url};
pub use switcher::{InvalidAssetPolicy, LOAD_FAILURE_MESSAGE, LoadState, Switcher, SwitcherOptions};
