// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration schema: options, their sources, and the ordered option list.
//!
//! ## JSON shape
//!
//! A configuration is a JSON array of options:
//!
//! ```json
//! [
//!   { "label": "Square", "src": "example/geometry-square.svg",
//!     "sources": [{ "srcset": "example/geometry-square-dark.svg",
//!                   "media": "(prefers-color-scheme: dark)" }] },
//!   { "label": "Circle", "url": "example/geometry-circle.svg" }
//! ]
//! ```
//!
//! `url` is the deprecated spelling of `src`. It is folded into [`ImageOption::src`] while
//! parsing; when both are present `src` wins.

use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigLoadError;

/// A scheme- or type-specific alternative for an option's image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Candidate list, in `srcset` syntax.
    pub srcset: String,
    /// Media query that must match for this source to be used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    /// MIME type hint.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Source {
    /// Source with no media condition or type hint.
    pub fn new(srcset: impl Into<String>) -> Self {
        Self {
            srcset: srcset.into(),
            media: None,
            mime_type: None,
        }
    }

    /// Attach a media query.
    #[must_use]
    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    /// Attach a MIME type hint.
    #[must_use]
    pub fn with_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// One selectable entry: a label and the image(s) it shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOption")]
pub struct ImageOption {
    /// Button label.
    pub label: String,
    /// Alternative text for the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Default image, used when no source matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Ordered alternates; the first matching one wins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
}

impl ImageOption {
    /// Option with a label and a default image.
    pub fn new(label: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            alt: None,
            src: Some(src.into()),
            sources: Vec::new(),
        }
    }

    /// Option with a label and no image yet.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            alt: None,
            src: None,
            sources: Vec::new(),
        }
    }

    /// Set the alternative text.
    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Append a source.
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }
}

/// Wire form of an option, including the deprecated `url` field.
#[derive(Deserialize)]
struct RawOption {
    label: String,
    #[serde(default)]
    alt: Option<String>,
    #[serde(default)]
    src: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    sources: Option<Vec<Source>>,
}

impl From<RawOption> for ImageOption {
    fn from(raw: RawOption) -> Self {
        let src = match (raw.src, raw.url) {
            (Some(src), Some(url)) => {
                if src != url {
                    warn!(label = %raw.label, %src, %url, "both `src` and deprecated `url` set; using `src`");
                }
                Some(src)
            }
            (Some(src), None) => Some(src),
            (None, Some(url)) => {
                debug!(label = %raw.label, "option uses deprecated `url`");
                Some(url)
            }
            (None, None) => None,
        };
        Self {
            label: raw.label,
            alt: raw.alt,
            src,
            sources: raw.sources.unwrap_or_default(),
        }
    }
}

/// Ordered, immutable list of options. Order defines selection indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    options: Vec<ImageOption>,
}

impl Configuration {
    /// Wrap an option list as-is. An empty list is allowed here.
    pub fn new(options: Vec<ImageOption>) -> Self {
        Self { options }
    }

    /// Parse a JSON option array. An empty array is a valid, empty configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigLoadError> {
        Ok(Self::parsed(serde_json::from_str(json)?))
    }

    /// Parse JSON bytes; see [`Configuration::from_json_str`].
    pub fn from_slice(json: &[u8]) -> Result<Self, ConfigLoadError> {
        Ok(Self::parsed(serde_json::from_slice(json)?))
    }

    /// Parse JSON from a reader; see [`Configuration::from_json_str`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigLoadError> {
        Ok(Self::parsed(serde_json::from_reader(reader)?))
    }

    fn parsed(config: Self) -> Self {
        debug!(options = config.options.len(), "configuration parsed");
        config
    }

    /// All options in presentation order.
    pub fn options(&self) -> &[ImageOption] {
        &self.options
    }

    /// Option at `index`.
    pub fn get(&self, index: usize) -> Option<&ImageOption> {
        self.options.get(index)
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// True if there are no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterate options in order.
    pub fn iter(&self) -> core::slice::Iter<'_, ImageOption> {
        self.options.iter()
    }

    /// Button labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.label.as_str())
    }
}

impl<'a> IntoIterator for &'a Configuration {
    type Item = &'a ImageOption;
    type IntoIter = core::slice::Iter<'a, ImageOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
