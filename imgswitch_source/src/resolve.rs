// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Source resolution: pick the concrete asset an option should show.
//!
//! ## Order
//!
//! 1. Walk [`ImageOption::sources`] in order. A source is a candidate if its
//!    `media` matches the environment (no `media` always matches) and its `type`
//!    is accepted. The first candidate with a usable `srcset` wins.
//! 2. Otherwise use [`ImageOption::src`] (which already absorbed the deprecated `url`).
//! 3. Otherwise the option is invalid.
//!
//! Resolution never fetches anything and has no side effects; the same option
//! and environment always give the same answer.

use tracing::{trace, warn};

use crate::env::Environment;
use crate::error::InvalidAssetError;
use crate::media::MediaQuery;
use crate::model::{ImageOption, Source};
use crate::srcset::{parse_srcset, pick};

/// Where a resolved asset came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AssetOrigin {
    /// The source at this position in [`ImageOption::sources`].
    Source(usize),
    /// The option's default `src`.
    Fallback,
}

/// The asset picked for an option.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedImage<'a> {
    /// URL to display.
    pub asset_url: &'a str,
    /// Where `asset_url` came from.
    pub origin: AssetOrigin,
    /// The winning source, when one matched. Renderers emitting `<picture>` use
    /// its `srcset` and `media` verbatim.
    pub source: Option<&'a Source>,
    /// The option's default image, if any.
    pub fallback_url: Option<&'a str>,
    /// Alternative text.
    pub alt: Option<&'a str>,
}

/// Pick the asset for `option` under `env`.
pub fn resolve<'a>(
    option: &'a ImageOption,
    env: &Environment,
) -> Result<ResolvedImage<'a>, InvalidAssetError> {
    let fallback_url = option.src.as_deref();
    let alt = option.alt.as_deref();

    for (i, source) in option.sources.iter().enumerate() {
        if !source_applies(source, env) {
            continue;
        }
        let candidates = parse_srcset(&source.srcset);
        match pick(&candidates, env.pixel_ratio) {
            Some(url) => {
                trace!(label = %option.label, source = i, url, "resolved from source");
                return Ok(ResolvedImage {
                    asset_url: url,
                    origin: AssetOrigin::Source(i),
                    source: Some(source),
                    fallback_url,
                    alt,
                });
            }
            None => {
                warn!(label = %option.label, source = i, "matching source has an empty srcset; skipping");
            }
        }
    }

    match fallback_url {
        None => Err(InvalidAssetError::Missing {
            label: option.label.clone(),
        }),
        Some(src) if src.trim().is_empty() => Err(InvalidAssetError::Empty {
            label: option.label.clone(),
        }),
        Some(src) => Ok(ResolvedImage {
            asset_url: src,
            origin: AssetOrigin::Fallback,
            source: None,
            fallback_url,
            alt,
        }),
    }
}

fn source_applies(source: &Source, env: &Environment) -> bool {
    if let Some(mime_type) = &source.mime_type
        && !env.accepts_type(mime_type)
    {
        return false;
    }
    let Some(media) = &source.media else {
        return true;
    };
    match MediaQuery::parse(media) {
        Ok(query) => query.matches(env),
        Err(err) => {
            warn!(media = %media, %err, "ignoring source with unparseable media query");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ColorScheme;

    const DARK: &str = "(prefers-color-scheme: dark)";

    fn square() -> ImageOption {
        ImageOption::new("Square", "example/geometry-square.svg")
            .with_alt("A square")
            .with_source(Source::new("example/geometry-square-dark.svg").with_media(DARK))
    }

    #[test]
    fn dark_source_wins_in_dark_mode() {
        let opt = square();
        let r = resolve(&opt, &Environment::new(ColorScheme::Dark)).unwrap();
        assert_eq!(r.asset_url, "example/geometry-square-dark.svg");
        assert_eq!(r.origin, AssetOrigin::Source(0));
        assert_eq!(r.source.and_then(|s| s.media.as_deref()), Some(DARK));
        assert_eq!(r.fallback_url, Some("example/geometry-square.svg"));
        assert_eq!(r.alt, Some("A square"));
    }

    #[test]
    fn light_and_no_preference_fall_back_identically() {
        let opt = square();
        let light = resolve(&opt, &Environment::new(ColorScheme::Light)).unwrap();
        let none = resolve(&opt, &Environment::new(ColorScheme::NoPreference)).unwrap();
        assert_eq!(light, none);
        assert_eq!(light.asset_url, "example/geometry-square.svg");
        assert_eq!(light.origin, AssetOrigin::Fallback);
        assert!(light.source.is_none());
    }

    #[test]
    fn resolution_is_deterministic() {
        let opt = square();
        let env = Environment::new(ColorScheme::Dark);
        assert_eq!(resolve(&opt, &env), resolve(&opt, &env));
    }

    #[test]
    fn first_match_wins_so_generic_sources_shadow_later_ones() {
        let opt = ImageOption::new("A", "a.svg")
            .with_source(Source::new("generic.svg"))
            .with_source(Source::new("dark.svg").with_media(DARK));
        let r = resolve(&opt, &Environment::new(ColorScheme::Dark)).unwrap();
        assert_eq!(r.asset_url, "generic.svg");
    }

    #[test]
    fn unsupported_types_are_skipped() {
        let opt = ImageOption::new("A", "a.png")
            .with_source(Source::new("a.avif").with_type("image/avif"))
            .with_source(Source::new("a.webp").with_type("image/webp"));
        let env = Environment::default().with_supported_types(["image/webp", "image/png"]);
        assert_eq!(resolve(&opt, &env).unwrap().asset_url, "a.webp");
        assert_eq!(
            resolve(&opt, &Environment::default()).unwrap().asset_url,
            "a.avif"
        );
    }

    #[test]
    fn srcset_density_follows_pixel_ratio() {
        let opt = ImageOption::labeled("A").with_source(Source::new("a.png 1x, a@2x.png 2x"));
        let env = Environment::default().with_pixel_ratio(2.0);
        assert_eq!(resolve(&opt, &env).unwrap().asset_url, "a@2x.png");
        assert_eq!(
            resolve(&opt, &Environment::default()).unwrap().asset_url,
            "a.png"
        );
    }

    #[test]
    fn empty_srcset_and_bad_media_are_skipped() {
        let opt = ImageOption::new("A", "a.svg")
            .with_source(Source::new("  ").with_media(DARK))
            .with_source(Source::new("broken.svg").with_media("(prefers-color-scheme: dark"));
        let r = resolve(&opt, &Environment::new(ColorScheme::Dark)).unwrap();
        assert_eq!(r.asset_url, "a.svg");
        assert_eq!(r.origin, AssetOrigin::Fallback);
    }

    #[test]
    fn missing_and_empty_fallbacks_are_invalid() {
        let missing = ImageOption::labeled("Nothing").with_source(Source::new("d.svg").with_media(DARK));
        assert_eq!(
            resolve(&missing, &Environment::new(ColorScheme::Light)),
            Err(InvalidAssetError::Missing {
                label: "Nothing".into()
            })
        );
        // The dark source still resolves the same option in dark mode.
        assert!(resolve(&missing, &Environment::new(ColorScheme::Dark)).is_ok());

        let empty = ImageOption::new("Blank", " ");
        assert_eq!(
            resolve(&empty, &Environment::default()),
            Err(InvalidAssetError::Empty {
                label: "Blank".into()
            })
        );
    }
}
