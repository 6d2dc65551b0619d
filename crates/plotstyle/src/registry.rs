//! Style registry: lookup of [`StyleRecord`]s by key.
//!
//! The built-in registry is parsed from the embedded `styles.yaml` the first
//! time it is used and is immutable afterwards. Additional registries can be
//! parsed from YAML text or files with the same format: a mapping from style
//! key to record body, in registration order.
//!
//! ```rust
//! use plotstyle::StyleRegistry;
//!
//! let registry = StyleRegistry::from_yaml(r#"
//! Poster:
//!   name: Conference Poster
//!   font: Times New Roman
//!   font_package: stix
//!   fontsize: 24
//!   linewidth: 1.0
//!   figure_widths: { panel: 10.0 }
//!   default_figure_size: [10.0, 6.18]
//! "#).unwrap();
//!
//! assert_eq!(registry.keys(), vec!["Poster"]);
//! assert!(registry.get("Banner").is_err());
//! ```
//!
//! # Validation
//!
//! Registries reject records with an empty `figure_widths`, non-positive
//! sizes or widths, empty font names, and accent colors not listed in
//! [`ACCENT_COLORS`](crate::colors::ACCENT_COLORS). Duplicate keys are
//! rejected by the YAML parser.

use std::path::Path;

use once_cell::sync::Lazy;

use crate::colors;
use crate::error::StyleError;
use crate::record::StyleRecord;

const BUILTIN_STYLES: &str = include_str!("../assets/styles.yaml");

static BUILTIN: Lazy<StyleRegistry> = Lazy::new(|| {
    StyleRegistry::from_yaml(BUILTIN_STYLES)
        .unwrap_or_else(|err| panic!("built-in styles.yaml is invalid: {}", err))
});

/// An ordered, immutable collection of styles.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRegistry {
    records: Vec<StyleRecord>,
}

impl StyleRegistry {
    /// The styles shipped with this crate.
    pub fn builtin() -> &'static StyleRegistry {
        &BUILTIN
    }

    /// Parses a registry from YAML.
    ///
    /// # Errors
    ///
    /// [`StyleError::Definition`] if the YAML is malformed or a record fails
    /// validation.
    pub fn from_yaml(yaml: &str) -> Result<Self, StyleError> {
        let document: serde_yaml::Mapping = serde_yaml::from_str(yaml)?;

        let mut records = Vec::with_capacity(document.len());
        for (key, body) in document {
            let key = match key {
                serde_yaml::Value::String(s) => s,
                other => {
                    return Err(StyleError::definition(format!(
                        "style keys must be strings, found {:?}",
                        other
                    )))
                }
            };
            let mut record: StyleRecord = serde_yaml::from_value(body)
                .map_err(|e| StyleError::definition(format!("style '{}': {}", key, e)))?;
            record.key = key;
            records.push(record);
        }

        validate(&records)?;
        Ok(Self { records })
    }

    /// Reads and parses a registry file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StyleError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Looks up a style by key.
    ///
    /// # Errors
    ///
    /// [`StyleError::UnknownStyle`] listing every registered key.
    pub fn get(&self, key: &str) -> Result<&StyleRecord, StyleError> {
        self.records
            .iter()
            .find(|r| r.key == key)
            .ok_or_else(|| StyleError::UnknownStyle {
                key: key.to_string(),
                available: self.keys(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.iter().any(|r| r.key == key)
    }

    /// All keys in registration order.
    pub fn keys(&self) -> Vec<String> {
        self.records.iter().map(|r| r.key.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validate(records: &[StyleRecord]) -> Result<(), StyleError> {
    for record in records {
        let fail = |msg: String| Err(StyleError::definition(format!("style '{}': {}", record.key, msg)));

        if record.font.trim().is_empty() {
            return fail("font must not be empty".to_string());
        }
        if record.figure_widths.is_empty() {
            return fail("figure_widths must not be empty".to_string());
        }
        if let Some((label, width)) = record.figure_widths.iter().find(|(_, w)| *w <= 0.0) {
            return fail(format!("figure width '{}' must be positive, got {}", label, width));
        }
        if !record.fontsize.is_positive() || !record.linewidth.is_positive() {
            return fail("fontsize and linewidth must be positive".to_string());
        }
        let size = record.default_figure_size;
        if size.width <= 0.0 || size.height <= 0.0 {
            return fail("default_figure_size must be positive".to_string());
        }
        if let Some(color) = record
            .custom_colors
            .iter()
            .find(|c| colors::accent(c).is_none())
        {
            return fail(format!("unknown custom color '{}'", color));
        }
    }
    Ok(())
}
