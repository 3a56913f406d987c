// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewing environment a resolution is evaluated against.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Viewer's color-scheme preference, as reported by `prefers-color-scheme`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    /// Dark theme requested.
    Dark,
    /// Light theme requested.
    Light,
    /// No preference expressed.
    #[default]
    NoPreference,
}

impl ColorScheme {
    /// Media-query keyword for this scheme.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::NoPreference => "no-preference",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown color-scheme keyword.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown color scheme {0:?}")]
pub struct UnknownColorScheme(pub String);

impl FromStr for ColorScheme {
    type Err = UnknownColorScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "no-preference" => Ok(Self::NoPreference),
            _ => Err(UnknownColorScheme(s.to_owned())),
        }
    }
}

/// Ambient inputs for [`resolve`](crate::resolve::resolve).
///
/// Build a fresh one for every resolution; the color scheme can change at any time.
#[derive(Clone, Debug, PartialEq)]
pub struct Environment {
    /// Current color-scheme preference.
    pub color_scheme: ColorScheme,
    /// Device pixel ratio used to pick among `srcset` densities.
    pub pixel_ratio: f64,
    /// MIME types the renderer can display; `None` accepts every type.
    pub supported_types: Option<Vec<String>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::NoPreference,
            pixel_ratio: 1.0,
            supported_types: None,
        }
    }
}

impl Environment {
    /// Environment with the given color scheme and default everything else.
    pub fn new(color_scheme: ColorScheme) -> Self {
        Self {
            color_scheme,
            ..Self::default()
        }
    }

    /// Set the device pixel ratio. Non-finite or non-positive ratios fall back to 1.
    #[must_use]
    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            1.0
        };
        self
    }

    /// Restrict sources to the given MIME types.
    #[must_use]
    pub fn with_supported_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_types = Some(
            types
                .into_iter()
                .map(|t| t.into().trim().to_ascii_lowercase())
                .collect(),
        );
        self
    }

    /// Whether a source with the given `type` hint may be used.
    ///
    /// Parameters after `;` are ignored and comparison is case-insensitive.
    pub fn accepts_type(&self, mime_type: &str) -> bool {
        let Some(supported) = &self.supported_types else {
            return true;
        };
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        supported.iter().any(|t| *t == essence)
    }
}
