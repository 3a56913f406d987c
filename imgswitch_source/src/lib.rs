// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Imgswitch Source: the option schema and image-source resolution.
//!
//! ## Overview
//!
//! A segmented image switcher is configured with a JSON array of options. Each option
//! has a label, a default image (`src`, or the deprecated `url`), and optionally an
//! ordered list of alternates keyed by media query and MIME type.
//!
//! - [`Configuration`](crate::model::Configuration): the parsed, ordered option list.
//! - [`Environment`](crate::env::Environment): color scheme, pixel ratio, supported types.
//! - [`resolve`](crate::resolve::resolve): picks the asset an option should show.
//!
//! Resolution is a pure function of the option and the environment. It only picks a path;
//! whether the path actually loads is for the renderer to report.
//!
//! ## Example
//!
//! ```
//! use imgswitch_source::env::{ColorScheme, Environment};
//! use imgswitch_source::model::Configuration;
//! use imgswitch_source::resolve::{resolve, AssetOrigin};
//!
//! let config = Configuration::from_json_str(r#"[
//!     { "label": "Square", "src": "example/geometry-square.svg",
//!       "sources": [{ "srcset": "example/geometry-square-dark.svg",
//!                     "media": "(prefers-color-scheme: dark)" }] },
//!     { "label": "Circle", "url": "example/geometry-circle.svg" }
//! ]"#).unwrap();
//!
//! let square = config.get(0).unwrap();
//! let dark = resolve(square, &Environment::new(ColorScheme::Dark)).unwrap();
//! assert_eq!(dark.asset_url, "example/geometry-square-dark.svg");
//! assert_eq!(dark.origin, AssetOrigin::Source(0));
//!
//! let light = resolve(square, &Environment::new(ColorScheme::Light)).unwrap();
//! assert_eq!(light.asset_url, "example/geometry-square.svg");
//!
//! // The deprecated `url` field still works.
//! let circle = resolve(config.get(1).unwrap(), &Environment::default()).unwrap();
//! assert_eq!(circle.asset_url, "example/geometry-circle.svg");
//! ```

pub mod env;
pub mod error;
pub mod media;
pub mod model;
pub mod resolve;
pub mod srcset;

pub use env::{ColorScheme, Environment};
pub use error::{ConfigLoadError, InvalidAssetError, MediaQueryError};
pub use model::{Configuration, ImageOption, Source};
pub use resolve::{AssetOrigin, ResolvedImage, resolve};
