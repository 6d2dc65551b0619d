//! The runtime configuration object.
//!
//! [`RcParams`] is the in-process equivalent of the plotting library's
//! `rcParams`: a map from option name to value, bound to a [`Catalog`] of
//! recognized options. Unlike the library's global, an `RcParams` is an
//! ordinary value. Callers own it, pass it to whatever draws, and can
//! snapshot, restore or reset it explicitly.
//!
//! # Example
//!
//! ```rust
//! use plotstyle_rc::{RcParams, StyleSheet};
//!
//! let mut rc = RcParams::defaults();
//! let dropped = rc.use_style(&StyleSheet::parse("font.size: 8\nnot.an.option: 1\n"));
//!
//! assert_eq!(rc.get_f64("font.size"), Some(8.0));
//! assert_eq!(dropped, vec!["not.an.option".to_string()]);
//!
//! rc.reset();
//! assert_eq!(rc.get_f64("font.size"), Some(10.0));
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::RcError;
use crate::stylesheet::StyleSheet;

/// Options a stylesheet is not allowed to change.
///
/// These describe the session rather than the look of a figure, so style
/// loading leaves them alone. Entries ending in `.` are prefixes.
pub const STYLE_BLACKLIST: &[&str] = &[
    "backend",
    "interactive",
    "toolbar",
    "timezone",
    "date.epoch",
    "figure.max_open_warning",
    "figure.raise_window",
    "savefig.directory",
    "webagg.",
];

/// Whether a stylesheet may set `key`.
pub fn is_style_blacklisted(key: &str) -> bool {
    STYLE_BLACKLIST.iter().any(|entry| {
        if entry.ends_with('.') {
            key.starts_with(entry)
        } else {
            key == *entry
        }
    })
}

/// A runtime configuration bound to a catalog of recognized options.
#[derive(Debug, Clone, PartialEq)]
pub struct RcParams {
    catalog: Arc<Catalog>,
    values: BTreeMap<String, String>,
}

/// Saved option values, restorable with [`RcParams::restore`].
#[derive(Debug, Clone, PartialEq)]
pub struct RcSnapshot {
    values: BTreeMap<String, String>,
}

impl Default for RcParams {
    fn default() -> Self {
        Self::defaults()
    }
}

impl RcParams {
    /// Library defaults from the standard catalog.
    pub fn defaults() -> Self {
        Self::with_catalog(Catalog::standard())
    }

    /// Defaults from a custom catalog.
    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        let values = catalog.defaults().clone();
        Self { catalog, values }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the bound catalog recognizes `key`.
    pub fn is_supported(&self, key: &str) -> bool {
        self.catalog.supports(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parses the value of `key` as a float.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key)?.trim().parse().ok()
    }

    /// Parses the value of `key` with the library's boolean spellings.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        parse_bool(self.get(key)?)
    }

    /// Parses a comma-joined pair such as `figure.figsize`.
    pub fn get_pair(&self, key: &str) -> Option<(f64, f64)> {
        let (a, b) = self.get(key)?.split_once(',')?;
        Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
    }

    /// Sets a single option, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`RcError::UnsupportedOption`] if the catalog does not know `key`.
    pub fn set(
        &mut self,
        key: &str,
        value: impl Into<String>,
    ) -> Result<Option<String>, RcError> {
        if !self.is_supported(key) {
            return Err(RcError::unsupported(key));
        }
        Ok(self.values.insert(key.to_string(), value.into()))
    }

    /// Copies every supported entry in; returns the names that were dropped.
    ///
    /// Unsupported names are not an error: a style written for one library
    /// version must still load on another.
    pub fn update<I, K, V>(&mut self, entries: I) -> Vec<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut dropped = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            if self.is_supported(&key) {
                self.values.insert(key, value.into());
            } else {
                log::debug!("Dropping unsupported option '{}'", key);
                dropped.push(key);
            }
        }
        dropped
    }

    /// Restores every option to its catalog default.
    pub fn reset(&mut self) {
        self.values = self.catalog.defaults().clone();
    }

    /// The active rendering backend.
    pub fn backend(&self) -> &str {
        self.get("backend").unwrap_or_default()
    }

    /// Switches the rendering backend.
    pub fn set_backend(&mut self, name: &str) -> Result<(), RcError> {
        self.set("backend", name).map(|_| ())
    }

    /// Applies a parsed stylesheet the way the library's style loader does.
    ///
    /// Blacklisted options are ignored with a warning and unsupported options
    /// are dropped. Both kinds are reported in the returned list.
    pub fn use_style(&mut self, sheet: &StyleSheet) -> Vec<String> {
        let (ignored, allowed): (Vec<_>, Vec<_>) =
            sheet.iter().partition(|(key, _)| is_style_blacklisted(key));

        let mut dropped: Vec<String> = ignored
            .into_iter()
            .map(|(key, _)| {
                log::warn!("Style includes a parameter, '{}', that is not related to style; ignoring", key);
                key.to_string()
            })
            .collect();
        dropped.extend(self.update(allowed));
        dropped
    }

    /// Reads a stylesheet file and applies it with [`use_style`](Self::use_style).
    pub fn use_style_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<String>, RcError> {
        let sheet = StyleSheet::from_file(path)?;
        Ok(self.use_style(&sheet))
    }

    pub fn snapshot(&self) -> RcSnapshot {
        RcSnapshot {
            values: self.values.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: RcSnapshot) {
        self.values = snapshot.values;
    }

    /// All options in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Names of options whose values differ from `other`.
    pub fn diff<'a>(&'a self, other: &'a RcParams) -> Vec<&'a str> {
        let mut keys: Vec<&str> = self
            .values
            .iter()
            .filter(|(k, v)| other.values.get(*k) != Some(*v))
            .map(|(k, _)| k.as_str())
            .collect();
        keys.extend(
            other
                .values
                .keys()
                .filter(|k| !self.values.contains_key(*k))
                .map(String::as_str),
        );
        keys.sort_unstable();
        keys
    }
}

/// Boolean spellings accepted by the plotting library.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "t" | "y" | "yes" | "on" | "true" | "1" => Some(true),
        "f" | "n" | "no" | "off" | "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> RcParams {
        RcParams::with_catalog(Arc::new(Catalog::from_pairs([
            ("backend", "agg"),
            ("font.size", "10.0"),
            ("figure.figsize", "6.4, 4.8"),
            ("text.usetex", "False"),
        ])))
    }

    #[test]
    fn test_defaults_match_catalog() {
        let rc = RcParams::defaults();
        assert_eq!(rc.get("font.family"), Some("sans-serif"));
        assert_eq!(rc.backend(), "agg");
        assert_eq!(rc.iter().count(), rc.catalog().len());
    }

    #[test]
    fn test_typed_getters() {
        let rc = small();
        assert_eq!(rc.get_f64("font.size"), Some(10.0));
        assert_eq!(rc.get_bool("text.usetex"), Some(false));
        assert_eq!(rc.get_pair("figure.figsize"), Some((6.4, 4.8)));
        assert_eq!(rc.get_f64("backend"), None);
        assert_eq!(rc.get_pair("font.size"), None);
    }

    #[test]
    fn test_set_supported() {
        let mut rc = small();
        let previous = rc.set("font.size", "8").unwrap();
        assert_eq!(previous.as_deref(), Some("10.0"));
        assert_eq!(rc.get("font.size"), Some("8"));
    }

    #[test]
    fn test_set_unsupported() {
        let mut rc = small();
        let err = rc.set("font.weirdness", "11").unwrap_err();
        assert!(matches!(err, RcError::UnsupportedOption { ref key } if key == "font.weirdness"));
        assert_eq!(rc.get("font.weirdness"), None);
    }

    #[test]
    fn test_update_drops_unknown() {
        let mut rc = small();
        let dropped = rc.update([("font.size", "8"), ("figure.labelsize", "8")]);
        assert_eq!(dropped, vec!["figure.labelsize".to_string()]);
        assert_eq!(rc.get("font.size"), Some("8"));
    }

    #[test]
    fn test_reset() {
        let mut rc = small();
        rc.update([("font.size", "8"), ("text.usetex", "True")]);
        rc.reset();
        assert_eq!(rc, small());
    }

    #[test]
    fn test_use_style_respects_blacklist() {
        let mut rc = small();
        let sheet = StyleSheet::parse("backend: pgf\nfont.size: 12\n");
        let dropped = rc.use_style(&sheet);
        assert_eq!(rc.backend(), "agg");
        assert_eq!(rc.get("font.size"), Some("12"));
        assert_eq!(dropped, vec!["backend".to_string()]);
    }

    #[test]
    fn test_set_backend_bypasses_blacklist() {
        let mut rc = small();
        rc.set_backend("pgf").unwrap();
        assert_eq!(rc.backend(), "pgf");
    }

    #[test]
    fn test_blacklist_prefix() {
        assert!(is_style_blacklisted("webagg.port"));
        assert!(is_style_blacklisted("backend"));
        assert!(!is_style_blacklisted("backend_fallback.x"));
        assert!(!is_style_blacklisted("font.size"));
    }

    #[test]
    fn test_use_style_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mplstyle");
        std::fs::write(&path, "font.size: 7\n").unwrap();

        let mut rc = small();
        let dropped = rc.use_style_file(&path).unwrap();
        assert!(dropped.is_empty());
        assert_eq!(rc.get_f64("font.size"), Some(7.0));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut rc = small();
        let saved = rc.snapshot();
        rc.update([("font.size", "20")]);
        rc.restore(saved);
        assert_eq!(rc.get("font.size"), Some("10.0"));
    }

    #[test]
    fn test_diff() {
        let base = small();
        let mut changed = small();
        changed.update([("font.size", "8"), ("text.usetex", "True")]);
        assert_eq!(changed.diff(&base), vec!["font.size", "text.usetex"]);
        assert!(base.diff(&base).is_empty());
    }

    #[test]
    fn test_parse_bool_spellings() {
        for yes in ["True", "true", "YES", "on", "1", " t "] {
            assert_eq!(parse_bool(yes), Some(true), "{}", yes);
        }
        for no in ["False", "no", "OFF", "0", "f"] {
            assert_eq!(parse_bool(no), Some(false), "{}", no);
        }
        assert_eq!(parse_bool("maybe"), None);
    }
}
