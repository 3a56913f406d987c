// Copyright 2025 the Imgswitch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media query predicates for `<source media="...">`.
//!
//! ## Supported grammar
//!
//! - Comma-separated branches; the query matches if any branch does.
//! - Each branch: optional `not` / `only`, then terms joined by `and`.
//! - Terms: media types (`all`, `screen`, `print`) or parenthesized features.
//! - Features: `prefers-color-scheme: <dark|light|no-preference>` and the boolean form
//!   `(prefers-color-scheme)`. A lone unparenthesized feature
//!   (`prefers-color-scheme: dark`) is accepted too.
//!
//! Unknown media types and features never match. An empty query matches everything.

use crate::env::{ColorScheme, Environment};
use crate::error::MediaQueryError;

/// A parsed media query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaQuery {
    branches: Vec<Branch>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Branch {
    negated: bool,
    terms: Vec<Term>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Term {
    Always,
    Never,
    Scheme(ColorScheme),
    AnyScheme,
}

impl MediaQuery {
    /// Parse a media query string.
    pub fn parse(text: &str) -> Result<Self, MediaQueryError> {
        if text.trim().is_empty() {
            return Ok(Self {
                branches: Vec::new(),
            });
        }
        let branches = text
            .split(',')
            .map(parse_branch)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { branches })
    }

    /// True if the query places no condition.
    pub fn is_unconditional(&self) -> bool {
        self.branches.is_empty()
    }

    /// Evaluate against an environment.
    pub fn matches(&self, env: &Environment) -> bool {
        self.is_unconditional() || self.branches.iter().any(|b| b.matches(env))
    }
}

impl Branch {
    fn matches(&self, env: &Environment) -> bool {
        let all = self.terms.iter().all(|t| t.matches(env));
        all != self.negated
    }
}

impl Term {
    fn matches(&self, env: &Environment) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Scheme(s) => env.color_scheme == *s,
            Self::AnyScheme => env.color_scheme != ColorScheme::NoPreference,
        }
    }
}

fn parse_branch(text: &str) -> Result<Branch, MediaQueryError> {
    let mut rest = text.trim();
    if rest.is_empty() {
        return Err(MediaQueryError::EmptyBranch);
    }
    let mut negated = false;
    if let Some(r) = strip_keyword(rest, "not") {
        negated = true;
        rest = r;
    } else if let Some(r) = strip_keyword(rest, "only") {
        rest = r;
    }
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(MediaQueryError::EmptyBranch);
    }

    // `prefers-color-scheme: dark` without parentheses.
    if !rest.contains('(') && rest.contains(':') {
        return Ok(Branch {
            negated,
            terms: vec![parse_feature(rest)],
        });
    }

    let mut terms = Vec::new();
    let mut rest = rest;
    let mut expect_term = true;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        if !expect_term {
            rest = strip_keyword(rest, "and").ok_or_else(|| MediaQueryError::ExpectedAnd {
                found: rest.to_owned(),
            })?;
            expect_term = true;
            continue;
        }
        if let Some(inner) = rest.strip_prefix('(') {
            let close = inner.find(')').ok_or(MediaQueryError::Unbalanced)?;
            terms.push(parse_feature(&inner[..close]));
            rest = &inner[close + 1..];
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '(')
                .unwrap_or(rest.len());
            terms.push(media_type(&rest[..end]));
            rest = &rest[end..];
        }
        expect_term = false;
    }
    if expect_term {
        // Trailing `and` or a bare `not`.
        return Err(MediaQueryError::EmptyBranch);
    }
    Ok(Branch { negated, terms })
}

fn media_type(word: &str) -> Term {
    match word.to_ascii_lowercase().as_str() {
        "all" | "screen" => Term::Always,
        _ => Term::Never,
    }
}

fn parse_feature(text: &str) -> Term {
    let (name, value) = match text.split_once(':') {
        Some((n, v)) => (n.trim(), Some(v.trim())),
        None => (text.trim(), None),
    };
    if !name.eq_ignore_ascii_case("prefers-color-scheme") {
        return Term::Never;
    }
    match value {
        None => Term::AnyScheme,
        Some(v) => v.parse().map(Term::Scheme).unwrap_or(Term::Never),
    }
}

/// Strip a case-insensitive keyword followed by whitespace, `(`, or the end of input.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &text[keyword.len()..];
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() || c == '(' => Some(rest),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(scheme: ColorScheme) -> Environment {
        Environment::new(scheme)
    }

    fn matches(query: &str, scheme: ColorScheme) -> bool {
        MediaQuery::parse(query).unwrap().matches(&env(scheme))
    }

    #[test]
    fn parenthesized_color_scheme() {
        assert!(matches("(prefers-color-scheme: dark)", ColorScheme::Dark));
        assert!(!matches("(prefers-color-scheme: dark)", ColorScheme::Light));
        assert!(!matches(
            "(prefers-color-scheme: dark)",
            ColorScheme::NoPreference
        ));
    }

    #[test]
    fn bare_color_scheme() {
        assert!(matches("prefers-color-scheme: light", ColorScheme::Light));
        assert!(!matches("prefers-color-scheme: light", ColorScheme::Dark));
    }

    #[test]
    fn empty_query_always_matches() {
        let q = MediaQuery::parse("  ").unwrap();
        assert!(q.is_unconditional());
        assert!(q.matches(&env(ColorScheme::Dark)));
    }

    #[test]
    fn media_types_and_conjunctions() {
        assert!(matches(
            "screen and (prefers-color-scheme: dark)",
            ColorScheme::Dark
        ));
        assert!(!matches(
            "print and (prefers-color-scheme: dark)",
            ColorScheme::Dark
        ));
        assert!(matches("all", ColorScheme::Light));
        assert!(!matches("tv", ColorScheme::Light));
    }

    #[test]
    fn comma_is_or() {
        let q = "(prefers-color-scheme: dark), (prefers-color-scheme: no-preference)";
        assert!(matches(q, ColorScheme::Dark));
        assert!(matches(q, ColorScheme::NoPreference));
        assert!(!matches(q, ColorScheme::Light));
    }

    #[test]
    fn not_negates_branch() {
        assert!(matches("not all and (prefers-color-scheme: dark)", ColorScheme::Light));
        assert!(!matches("not all and (prefers-color-scheme: dark)", ColorScheme::Dark));
    }

    #[test]
    fn boolean_feature_and_unknown_features() {
        assert!(matches("(prefers-color-scheme)", ColorScheme::Light));
        assert!(!matches("(prefers-color-scheme)", ColorScheme::NoPreference));
        assert!(!matches("(min-width: 600px)", ColorScheme::Dark));
        assert!(!matches("(prefers-color-scheme: sepia)", ColorScheme::Dark));
    }

    #[test]
    fn malformed_queries_are_errors() {
        assert_eq!(
            MediaQuery::parse("(prefers-color-scheme: dark"),
            Err(MediaQueryError::Unbalanced)
        );
        assert_eq!(
            MediaQuery::parse("screen, "),
            Err(MediaQueryError::EmptyBranch)
        );
        assert!(matches!(
            MediaQuery::parse("screen (prefers-color-scheme: dark)"),
            Err(MediaQueryError::ExpectedAnd { .. })
        ));
        assert_eq!(
            MediaQuery::parse("screen and"),
            Err(MediaQueryError::EmptyBranch)
        );
    }
}
