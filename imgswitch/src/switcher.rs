// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The switcher: configuration lifecycle, input routing, and asset lookup.
//!
//! ## Overview
//!
//! [`Switcher`] owns one [`SelectionController`], one [`GestureTracker`], and the
//! loaded [`Configuration`]. Renderers read [`Switcher::segments`] and
//! [`Switcher::current_asset`]; hosts push raw events through [`Switcher::handle`].
//!
//! ## Selectable segments
//!
//! Segment indices address the *selectable* options, which are all options
//! under [`InvalidAssetPolicy::Mark`] and only the usable ones under
//! [`InvalidAssetPolicy::Exclude`]. An option is usable if it resolves to an
//! asset that has not been reported unloadable under at least one color scheme,
//! so a live theme switch never changes the segment count.
//!
//! ## Failures
//!
//! Only loading can fail visibly: after a failed load the selection is empty and
//! [`Switcher::status_message`] returns [`LOAD_FAILURE_MESSAGE`]. Every input is
//! absorbed; nothing here panics on malformed events.

use std::collections::HashSet;
use std::fmt;

use imgswitch_gesture::highlight::HighlightState;
use imgswitch_gesture::tracker::GestureTracker;
use imgswitch_gesture::types::{GestureConfig, SegmentRow};
use imgswitch_select::controller::SelectionController;
use imgswitch_select::types::{Direction, Intent, SelectionState, Transition};
use imgswitch_source::env::{ColorScheme, Environment};
use imgswitch_source::error::{ConfigLoadError, InvalidAssetError};
use imgswitch_source::model::{Configuration, ImageOption};
use imgswitch_source::resolve::{ResolvedImage, resolve};
use tracing::{debug, info, warn};

use crate::environment::ColorSchemeQuery;
use crate::input::{InputEvent, InputOutcome, SegmentFlags, SegmentView};
use crate::loader::{ConfigSource, config_location_from_url};

/// Text shown to the user when the configuration cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load configuration";

/// What to do with options whose image cannot be shown.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum InvalidAssetPolicy {
    /// Drop them from the selectable segments.
    #[default]
    Exclude,
    /// Keep them selectable and flag them [`SegmentFlags::INVALID`].
    Mark,
}

/// Tuning for a [`Switcher`].
#[derive(Clone, Debug, PartialEq)]
pub struct SwitcherOptions {
    /// Handling of invalid options.
    pub invalid_assets: InvalidAssetPolicy,
    /// Touch-drag tuning.
    pub gesture: GestureConfig,
    /// Device pixel ratio passed to resolution.
    pub pixel_ratio: f64,
    /// MIME types the renderer can display; `None` accepts all.
    pub supported_types: Option<Vec<String>>,
}

impl Default for SwitcherOptions {
    fn default() -> Self {
        Self {
            invalid_assets: InvalidAssetPolicy::default(),
            gesture: GestureConfig::default(),
            pixel_ratio: 1.0,
            supported_types: None,
        }
    }
}

/// Lifecycle of the configuration.
#[derive(Debug)]
pub enum LoadState {
    /// Nothing requested yet.
    Idle,
    /// A load is in flight.
    Pending,
    /// A configuration is loaded.
    Ready,
    /// The last load failed.
    Failed(ConfigLoadError),
}

/// Segmented image switcher core.
pub struct Switcher<Q> {
    query: Q,
    options: SwitcherOptions,
    state: LoadState,
    config: Configuration,
    unloadable: HashSet<String>,
    selectable: Vec<usize>,
    selection: SelectionController,
    gesture: GestureTracker,
    highlight: HighlightState,
}

impl<Q> fmt::Debug for Switcher<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Switcher")
            .field("state", &self.state)
            .field("selection", &self.selection.state())
            .field("selectable", &self.selectable)
            .finish_non_exhaustive()
    }
}

impl<Q: ColorSchemeQuery> Switcher<Q> {
    /// Switcher with default options.
    pub fn new(query: Q) -> Self {
        Self::with_options(query, SwitcherOptions::default())
    }

    /// Switcher with explicit options.
    pub fn with_options(query: Q, options: SwitcherOptions) -> Self {
        let gesture = GestureTracker::with_config(options.gesture);
        Self {
            query,
            options,
            state: LoadState::Idle,
            config: Configuration::default(),
            unloadable: HashSet::new(),
            selectable: Vec::new(),
            selection: SelectionController::new(),
            gesture,
            highlight: HighlightState::new(),
        }
    }

    // --- Loading ---

    /// Drop the current configuration and mark a load as in flight.
    pub fn begin_load(&mut self) {
        self.clear();
        self.state = LoadState::Pending;
    }

    /// Install the result of a load.
    pub fn finish_load(&mut self, result: Result<Configuration, ConfigLoadError>) {
        self.clear();
        match result {
            Ok(config) => {
                self.config = config;
                self.rebuild_selectable();
                info!(
                    options = self.config.len(),
                    selectable = self.selectable.len(),
                    "configuration loaded"
                );
                self.state = LoadState::Ready;
            }
            Err(err) => {
                warn!(error = %err, "configuration load failed");
                self.state = LoadState::Failed(err);
            }
        }
    }

    /// Load synchronously from `source`.
    pub fn load_from<S: ConfigSource + ?Sized>(&mut self, source: &S, location: &str) {
        self.begin_load();
        self.finish_load(source.load(location));
    }

    /// Load the configuration named by a page URL's fragment.
    pub fn load_from_url<S: ConfigSource + ?Sized>(&mut self, source: &S, url: &str) {
        self.begin_load();
        let result = config_location_from_url(url).and_then(|location| source.load(location));
        self.finish_load(result);
    }

    /// Current lifecycle state.
    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    /// True once a configuration is loaded.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready)
    }

    /// User-visible status text; only set after a failed load.
    pub fn status_message(&self) -> Option<&'static str> {
        match self.state {
            LoadState::Failed(_) => Some(LOAD_FAILURE_MESSAGE),
            _ => None,
        }
    }

    /// Loaded configuration (empty unless ready).
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    // --- Reading ---

    /// Selection over the selectable segments.
    pub fn selection(&self) -> SelectionState {
        self.selection.state()
    }

    /// Segment currently hovered by a drag.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlight.current()
    }

    /// Configuration index and option behind a segment.
    pub fn option_for_segment(&self, segment: usize) -> Option<(usize, &ImageOption)> {
        let &option_index = self.selectable.get(segment)?;
        Some((option_index, self.config.get(option_index)?))
    }

    /// Configuration index and option currently selected.
    pub fn selected_option(&self) -> Option<(usize, &ImageOption)> {
        self.option_for_segment(self.selection.index()?)
    }

    /// Selectable options in segment order, with their configuration indices.
    pub fn selectable(&self) -> impl Iterator<Item = (usize, &ImageOption)> {
        self.selectable
            .iter()
            .filter_map(|&i| Some((i, self.config.get(i)?)))
    }

    /// Button labels in segment order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.selectable().map(|(_, o)| o.label.as_str())
    }

    /// Environment for a resolution right now. The color scheme is queried afresh.
    pub fn environment(&self) -> Environment {
        self.environment_for(self.query.prefers_color_scheme())
    }

    /// Resolved asset for a segment, or `None` if the segment does not exist.
    pub fn resolved_asset(
        &self,
        segment: usize,
    ) -> Option<Result<ResolvedImage<'_>, InvalidAssetError>> {
        let (_, option) = self.option_for_segment(segment)?;
        Some(self.asset_for(option, &self.environment()))
    }

    /// Resolved asset for the current selection.
    pub fn current_asset(&self) -> Option<Result<ResolvedImage<'_>, InvalidAssetError>> {
        self.resolved_asset(self.selection.index()?)
    }

    /// Every selectable segment with its visual state.
    pub fn segments(&self) -> Vec<SegmentView<'_>> {
        let env = self.environment();
        let state = self.selection.state();
        self.selectable()
            .enumerate()
            .map(|(segment, (option_index, option))| {
                let mut flags = SegmentFlags::empty();
                flags.set(SegmentFlags::SELECTED, state.is_selected(segment));
                flags.set(
                    SegmentFlags::HIGHLIGHTED,
                    self.highlight.current() == Some(segment),
                );
                flags.set(
                    SegmentFlags::INVALID,
                    self.asset_for(option, &env).is_err(),
                );
                SegmentView {
                    segment,
                    option_index,
                    label: &option.label,
                    flags,
                }
            })
            .collect()
    }

    // --- Mutation ---

    /// Select a segment. Out-of-range indices are ignored.
    pub fn select_index(&mut self, segment: usize) -> Transition {
        self.selection.select_index(segment)
    }

    /// Move one segment left or right, clamped.
    pub fn move_relative(&mut self, direction: Direction) -> Transition {
        self.selection.move_relative(direction)
    }

    /// Commit a gesture outcome; `None` is ignored.
    pub fn apply_gesture_candidate(&mut self, candidate: Option<usize>) -> Transition {
        self.selection.apply_gesture_candidate(candidate)
    }

    /// Apply any intent.
    pub fn apply(&mut self, intent: Intent) -> Transition {
        self.selection.apply(intent)
    }

    /// Route a raw input event.
    pub fn handle(&mut self, event: InputEvent) -> InputOutcome {
        let mut outcome = InputOutcome::default();
        match event {
            InputEvent::Click(segment) => {
                outcome.transition = Some(self.select_index(segment));
            }
            InputEvent::Key(key) => {
                outcome.transition = Intent::from_key(key).map(|intent| self.apply(intent));
            }
            InputEvent::TouchStart { row, touches } => {
                let row = SegmentRow::new(row, self.selection.count());
                let candidate = self.gesture.touch_start(row, &touches);
                outcome.highlight = self.highlight.update(candidate);
            }
            InputEvent::TouchMove(touches) => {
                if let Some(candidate) = self.gesture.touch_move(&touches) {
                    outcome.highlight = self.highlight.update(Some(candidate));
                }
            }
            InputEvent::TouchEnd(touches) => {
                let committed = self.gesture.touch_end(&touches);
                outcome.highlight = self.highlight.clear();
                outcome.transition = Some(self.apply_gesture_candidate(committed));
            }
            InputEvent::TouchCancel => {
                self.gesture.touch_cancel();
                outcome.highlight = self.highlight.clear();
            }
        }
        outcome
    }

    /// Record that the renderer failed to load `url`.
    ///
    /// Every option resolving to `url` becomes invalid. Returns `false` if the URL
    /// was already known to be unloadable.
    pub fn report_unloadable(&mut self, url: &str) -> bool {
        if !self.unloadable.insert(url.to_owned()) {
            return false;
        }
        warn!(url, "asset reported unloadable");
        let before = self.selectable.len();
        self.rebuild_selectable();
        if self.selectable.len() != before {
            // The captured row geometry no longer matches the segments.
            self.gesture.touch_cancel();
            let _ = self.highlight.clear();
        }
        true
    }

    // --- Internals ---

    fn clear(&mut self) {
        self.config = Configuration::default();
        self.unloadable.clear();
        self.selectable.clear();
        self.selection.reset(0);
        self.gesture.touch_cancel();
        let _ = self.highlight.clear();
    }

    fn environment_for(&self, scheme: ColorScheme) -> Environment {
        let env = Environment::new(scheme).with_pixel_ratio(self.options.pixel_ratio);
        match &self.options.supported_types {
            Some(types) => env.with_supported_types(types.iter().map(String::as_str)),
            None => env,
        }
    }

    fn asset_for<'a>(
        &self,
        option: &'a ImageOption,
        env: &Environment,
    ) -> Result<ResolvedImage<'a>, InvalidAssetError> {
        let resolved = resolve(option, env)?;
        if self.unloadable.contains(resolved.asset_url) {
            return Err(InvalidAssetError::Unloadable {
                label: option.label.clone(),
                url: resolved.asset_url.to_owned(),
            });
        }
        Ok(resolved)
    }

    fn is_usable(&self, option: &ImageOption) -> bool {
        [ColorScheme::Dark, ColorScheme::Light, ColorScheme::NoPreference]
            .into_iter()
            .any(|scheme| {
                self.asset_for(option, &self.environment_for(scheme))
                    .is_ok()
            })
    }

    fn rebuild_selectable(&mut self) {
        let previous = self.selected_option().map(|(i, _)| i);
        let selectable: Vec<usize> = match self.options.invalid_assets {
            InvalidAssetPolicy::Mark => (0..self.config.len()).collect(),
            InvalidAssetPolicy::Exclude => self
                .config
                .iter()
                .enumerate()
                .filter(|(i, option)| {
                    let usable = self.is_usable(option);
                    if !usable {
                        debug!(option = i, label = %option.label, "excluding option without a usable image");
                    }
                    usable
                })
                .map(|(i, _)| i)
                .collect(),
        };
        let count = selectable.len();
        // Keep the selected option if it survived, else move to its nearest successor.
        let segment = previous
            .map(|opt| {
                selectable
                    .iter()
                    .position(|&i| i >= opt)
                    .unwrap_or(count.saturating_sub(1))
            })
            .unwrap_or(0);
        self.selectable = selectable;
        self.selection.resize(count, segment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{FixedScheme, SchemeCell};
    use crate::loader::StaticConfigSource;
    use imgswitch_select::types::Key;
    use imgswitch_source::model::Source;
    use kurbo::{Point, Rect};

    fn four() -> Configuration {
        Configuration::new(vec![
            ImageOption::new("Dark Variant", "example/dark.svg"),
            ImageOption::new("Light Variant", "example/light.svg"),
            ImageOption::new("First Republic", "example/first-republic.svg"),
            ImageOption::new("Second Republic", "example/second-republic.svg"),
        ])
    }

    fn ready(config: Configuration) -> Switcher<FixedScheme> {
        let mut s = Switcher::new(FixedScheme(ColorScheme::Light));
        s.finish_load(Ok(config));
        s
    }

    fn asset(s: &Switcher<impl ColorSchemeQuery>) -> String {
        s.current_asset().unwrap().unwrap().asset_url.to_owned()
    }

    #[test]
    fn load_starts_at_first_option() {
        let s = ready(four());
        assert!(s.is_ready());
        assert_eq!(s.selection().index(), Some(0));
        assert_eq!(s.selection().count(), 4);
        assert_eq!(asset(&s), "example/dark.svg");
        assert_eq!(s.status_message(), None);
    }

    #[test]
    fn failed_load_shows_message_and_absorbs_input() {
        let mut s = Switcher::new(FixedScheme(ColorScheme::Light));
        s.load_from(&StaticConfigSource::new(), "missing.json");
        assert_eq!(s.status_message(), Some(LOAD_FAILURE_MESSAGE));
        assert_eq!(s.selection().count(), 0);
        assert!(!s.handle(InputEvent::Key(Key::ArrowRight)).changed());
        assert!(!s.handle(InputEvent::Click(0)).changed());
        assert!(s.current_asset().is_none());
        assert!(s.segments().is_empty());
    }

    #[test]
    fn begin_load_clears_previous_configuration() {
        let mut s = ready(four());
        s.select_index(2);
        s.begin_load();
        assert!(matches!(s.load_state(), LoadState::Pending));
        assert!(s.selection().is_empty());
        assert_eq!(s.status_message(), None);
    }

    #[test]
    fn click_and_keys_route_through_selection() {
        let mut s = ready(four());
        assert!(s.handle(InputEvent::Click(1)).changed());
        assert_eq!(asset(&s), "example/light.svg");
        s.handle(InputEvent::Key(Key::ArrowRight));
        assert_eq!(s.selection().index(), Some(2));
        s.handle(InputEvent::Key(Key::ArrowLeft));
        s.handle(InputEvent::Key(Key::ArrowLeft));
        s.handle(InputEvent::Key(Key::ArrowLeft));
        assert_eq!(s.selection().index(), Some(0));
        let outcome = s.handle(InputEvent::Key(Key::Other));
        assert_eq!(outcome.transition, None);
    }

    #[test]
    fn touch_drag_highlights_then_commits() {
        let mut s = ready(four());
        let row = Rect::new(0.0, 300.0, 400.0, 340.0);
        let start = s.handle(InputEvent::TouchStart {
            row,
            touches: vec![Point::new(5.0, 320.0)],
        });
        assert_eq!(start.highlight.len(), 1);
        assert_eq!(s.highlighted(), Some(0));
        assert!(s.handle(InputEvent::TouchMove(vec![])).highlight.is_empty());
        s.handle(InputEvent::TouchMove(vec![Point::new(250.0, 320.0)]));
        assert_eq!(s.highlighted(), Some(2));
        assert!(s.segments()[2].flags.contains(SegmentFlags::HIGHLIGHTED));
        let end = s.handle(InputEvent::TouchEnd(vec![Point::new(250.0, 320.0)]));
        assert_eq!(end.transition, Some(Transition::Changed { from: 0, to: 2 }));
        assert_eq!(s.highlighted(), None);
        assert_eq!(asset(&s), "example/first-republic.svg");
    }

    #[test]
    fn touch_cancel_keeps_selection() {
        let mut s = ready(four());
        s.handle(InputEvent::TouchStart {
            row: Rect::new(0.0, 0.0, 400.0, 40.0),
            touches: vec![Point::new(5.0, 20.0)],
        });
        s.handle(InputEvent::TouchMove(vec![Point::new(250.0, 20.0)]));
        let out = s.handle(InputEvent::TouchCancel);
        assert!(!out.changed());
        assert_eq!(s.selection().index(), Some(0));
        // A stray end after cancel does nothing.
        assert!(!s.handle(InputEvent::TouchEnd(vec![Point::new(250.0, 20.0)])).changed());
    }

    #[test]
    fn color_scheme_is_queried_on_every_resolution() {
        let scheme = SchemeCell::new(ColorScheme::Light);
        let mut s = Switcher::new(scheme.clone());
        s.finish_load(Ok(Configuration::new(vec![
            ImageOption::new("Square", "example/geometry-square.svg").with_source(
                Source::new("example/geometry-square-dark.svg")
                    .with_media("(prefers-color-scheme: dark)"),
            ),
        ])));
        assert_eq!(asset(&s), "example/geometry-square.svg");
        scheme.set(ColorScheme::Dark);
        assert_eq!(asset(&s), "example/geometry-square-dark.svg");
    }

    #[test]
    fn exclude_policy_drops_invalid_options() {
        let s = ready(Configuration::new(vec![
            ImageOption::new("A", "a.svg"),
            ImageOption::labeled("Broken"),
            ImageOption::new("C", "c.svg"),
        ]));
        assert_eq!(s.labels().collect::<Vec<_>>(), ["A", "C"]);
        assert_eq!(s.option_for_segment(1).map(|(i, _)| i), Some(2));
    }

    #[test]
    fn scheme_specific_options_stay_selectable() {
        let s = ready(Configuration::new(vec![
            ImageOption::labeled("Night only").with_source(
                Source::new("night.svg").with_media("(prefers-color-scheme: dark)"),
            ),
        ]));
        assert_eq!(s.selection().count(), 1);
        // Light mode cannot show it, so it is flagged.
        assert!(s.segments()[0].flags.contains(SegmentFlags::INVALID));
    }

    #[test]
    fn mark_policy_keeps_invalid_options() {
        let mut s = Switcher::with_options(
            FixedScheme(ColorScheme::Light),
            SwitcherOptions {
                invalid_assets: InvalidAssetPolicy::Mark,
                ..Default::default()
            },
        );
        s.finish_load(Ok(Configuration::new(vec![
            ImageOption::new("A", "example/ceci-nest-pas-une-pic.png"),
            ImageOption::new("B", "example/b.svg"),
        ])));
        assert!(s.report_unloadable("example/ceci-nest-pas-une-pic.png"));
        assert!(!s.report_unloadable("example/ceci-nest-pas-une-pic.png"));
        assert_eq!(s.selection().count(), 2);
        let segments = s.segments();
        assert_eq!(
            segments[0].flags,
            SegmentFlags::SELECTED | SegmentFlags::INVALID
        );
        assert_eq!(segments[1].flags, SegmentFlags::empty());
        assert!(matches!(
            s.current_asset(),
            Some(Err(InvalidAssetError::Unloadable { .. }))
        ));
    }

    #[test]
    fn unloadable_selected_option_moves_selection_to_successor() {
        let mut s = ready(four());
        s.select_index(1);
        s.report_unloadable("example/light.svg");
        assert_eq!(s.selection().count(), 3);
        assert_eq!(s.selected_option().map(|(i, _)| i), Some(2));

        s.select_index(2);
        s.report_unloadable("example/second-republic.svg");
        assert_eq!(s.selection().count(), 2);
        assert_eq!(s.selected_option().map(|(i, _)| i), Some(2));
    }

    #[test]
    fn empty_configuration_is_ready_with_nothing_selectable() {
        let source = StaticConfigSource::new().with("empty.json", "[]");
        let mut s = Switcher::new(FixedScheme(ColorScheme::Light));
        s.load_from(&source, "empty.json");
        assert!(s.is_ready());
        assert_eq!(s.status_message(), None);
        assert_eq!(s.selection().count(), 0);
        assert_eq!(s.selection().index(), None);
        assert!(s.current_asset().is_none());
        assert!(!s.handle(InputEvent::Click(0)).changed());
    }

    #[test]
    fn supported_types_and_pixel_ratio_are_normalized() {
        let mut s = Switcher::with_options(
            FixedScheme(ColorScheme::Light),
            SwitcherOptions {
                supported_types: Some(vec![" image/WebP ".to_owned()]),
                pixel_ratio: f64::NAN,
                ..Default::default()
            },
        );
        s.finish_load(Ok(Configuration::new(vec![
            ImageOption::new("A", "a.png").with_source(
                Source::new("a.webp 1x, a@2x.webp 2x").with_type("image/webp"),
            ),
        ])));
        assert_eq!(s.environment().pixel_ratio, 1.0);
        assert_eq!(asset(&s), "a.webp");
    }

    #[test]
    fn load_from_url_uses_fragment() {
        let source = StaticConfigSource::new()
            .with("example/config.json", r#"[{ "label": "A", "src": "a.svg" }]"#);
        let mut s = Switcher::new(FixedScheme(ColorScheme::Dark));
        s.load_from_url(&source, "http://localhost/#example/config.json");
        assert!(s.is_ready());
        s.load_from_url(&source, "http://localhost/");
        assert_eq!(s.status_message(), Some(LOAD_FAILURE_MESSAGE));
    }
}
