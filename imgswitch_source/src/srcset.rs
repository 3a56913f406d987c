// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `srcset` candidate lists.
//!
//! A `srcset` is a comma-separated list of `url [descriptor]` entries. Density
//! descriptors (`2x`) are honored; width descriptors (`480w`) and missing or
//! malformed descriptors count as `1x`. URLs containing commas are not supported.

use tracing::trace;

/// One entry of a `srcset`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SrcsetCandidate<'a> {
    /// Image URL.
    pub url: &'a str,
    /// Pixel density the image is intended for.
    pub density: f64,
}

/// Split a `srcset` into candidates, skipping empty entries.
pub fn parse_srcset(srcset: &str) -> Vec<SrcsetCandidate<'_>> {
    srcset
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split_whitespace();
            let url = parts.next()?;
            let density = parts.next().map_or(1.0, density_of);
            Some(SrcsetCandidate { url, density })
        })
        .collect()
}

fn density_of(descriptor: &str) -> f64 {
    if let Some(x) = descriptor
        .strip_suffix('x')
        .or_else(|| descriptor.strip_suffix('X'))
        && let Ok(d) = x.parse::<f64>()
        && d.is_finite()
        && d > 0.0
    {
        return d;
    }
    trace!(descriptor, "treating srcset descriptor as 1x");
    1.0
}

/// Pick the candidate for a device pixel ratio.
///
/// Prefers the lowest density that still covers `pixel_ratio`; falls back to the
/// densest candidate. Ties keep list order.
pub fn pick<'a>(candidates: &[SrcsetCandidate<'a>], pixel_ratio: f64) -> Option<&'a str> {
    let covering = candidates
        .iter()
        .filter(|c| c.density >= pixel_ratio)
        .fold(None::<&SrcsetCandidate<'a>>, |best, c| match best {
            Some(b) if b.density <= c.density => Some(b),
            _ => Some(c),
        });
    let chosen = covering.or_else(|| {
        candidates.iter().fold(None, |best, c| match best {
            Some(b) if b.density >= c.density => Some(b),
            _ => Some(c),
        })
    })?;
    Some(chosen.url)
}
