// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for configuration loading and asset resolution.

use thiserror::Error;

/// A configuration could not be obtained.
///
/// Any of these leaves the switcher without a selectable state; the user sees a
/// static failure message and nothing is retried.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// No configuration location was supplied (for example an empty URL fragment).
    #[error("no configuration location given")]
    MissingLocation,
    /// The configuration could not be read.
    #[error("failed to read configuration from {location}")]
    Io {
        /// Location that was requested.
        location: String,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not a valid option list.
    #[error("failed to parse configuration")]
    Parse(#[from] serde_json::Error),
}

/// An option's resolved asset is unusable.
///
/// Only the affected option is excluded (or marked); sibling options resolve normally.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidAssetError {
    /// No source matched and the option has no fallback `src`.
    #[error("option {label:?} has no image source")]
    Missing {
        /// Label of the option.
        label: String,
    },
    /// The picked asset path is empty.
    #[error("option {label:?} has an empty image source")]
    Empty {
        /// Label of the option.
        label: String,
    },
    /// The renderer reported that the asset failed to load.
    #[error("image {url:?} for option {label:?} could not be loaded")]
    Unloadable {
        /// Label of the option.
        label: String,
        /// Asset that failed.
        url: String,
    },
}

impl InvalidAssetError {
    /// Label of the affected option.
    pub fn label(&self) -> &str {
        match self {
            Self::Missing { label } | Self::Empty { label } | Self::Unloadable { label, .. } => {
                label
            }
        }
    }
}

/// A media query could not be parsed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MediaQueryError {
    /// A comma-separated branch is empty.
    #[error("empty media query branch")]
    EmptyBranch,
    /// A parenthesized feature is not closed.
    #[error("unbalanced parenthesis in media query")]
    Unbalanced,
    /// Terms must be joined with `and`.
    #[error("expected `and` before {found:?}")]
    ExpectedAnd {
        /// Text found instead.
        found: String,
    },
}
