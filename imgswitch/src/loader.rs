// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration sources.
//!
//! The switcher never fetches anything itself. A [`ConfigSource`] turns a location
//! (a path, or whatever the page URL's fragment names) into a parsed
//! [`Configuration`] or a [`ConfigLoadError`]. Asynchronous hosts can fetch on their
//! own and hand the result to [`Switcher::finish_load`](crate::switcher::Switcher::finish_load).

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use imgswitch_source::error::ConfigLoadError;
use imgswitch_source::model::Configuration;
use tracing::debug;

/// Supplies parsed configurations by location.
pub trait ConfigSource {
    /// Load and parse the configuration at `location`.
    fn load(&self, location: &str) -> Result<Configuration, ConfigLoadError>;
}

/// Extract the configuration location from a page URL's fragment.
///
/// `https://host/#example/config.json` yields `example/config.json`. A missing or
/// empty fragment is a load failure.
pub fn config_location_from_url(url: &str) -> Result<&str, ConfigLoadError> {
    let (_, fragment) = url.split_once('#').ok_or(ConfigLoadError::MissingLocation)?;
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return Err(ConfigLoadError::MissingLocation);
    }
    Ok(fragment)
}

/// Reads JSON configurations from disk.
///
/// Relative locations are resolved against a base directory; a leading `/` is
/// treated as relative to the base too, matching site-root paths.
#[derive(Clone, Debug)]
pub struct FileConfigSource {
    base: PathBuf,
}

impl FileConfigSource {
    /// Source rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, location: &str) -> PathBuf {
        self.base.join(location.trim_start_matches('/'))
    }
}

impl ConfigSource for FileConfigSource {
    fn load(&self, location: &str) -> Result<Configuration, ConfigLoadError> {
        if location.trim().is_empty() {
            return Err(ConfigLoadError::MissingLocation);
        }
        let path = self.path_for(location);
        debug!(path = %path.display(), "reading configuration");
        let file = File::open(&path).map_err(|source| ConfigLoadError::Io {
            location: location.to_owned(),
            source,
        })?;
        Configuration::from_reader(BufReader::new(file))
    }
}

/// In-memory JSON configurations keyed by location.
#[derive(Clone, Debug, Default)]
pub struct StaticConfigSource {
    entries: HashMap<String, String>,
}

impl StaticConfigSource {
    /// Empty source; every load fails with a not-found error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `json` under `location`.
    #[must_use]
    pub fn with(mut self, location: impl Into<String>, json: impl Into<String>) -> Self {
        self.insert(location, json);
        self
    }

    /// Register `json` under `location`, replacing any previous entry.
    pub fn insert(&mut self, location: impl Into<String>, json: impl Into<String>) {
        self.entries.insert(location.into(), json.into());
    }
}

impl ConfigSource for StaticConfigSource {
    fn load(&self, location: &str) -> Result<Configuration, ConfigLoadError> {
        if location.trim().is_empty() {
            return Err(ConfigLoadError::MissingLocation);
        }
        let json = self
            .entries
            .get(location)
            .ok_or_else(|| ConfigLoadError::Io {
                location: location.to_owned(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such configuration"),
            })?;
        Configuration::from_json_str(json)
    }
}
