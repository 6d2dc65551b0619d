//! Parsing of matplotlibrc-format stylesheets.
//!
//! A stylesheet is plain text with one `key : value` pair per line:
//!
//! ```text
//! # comment
//! font.size : 8
//! figure.figsize : 5.6, 3.461
//! axes.prop_cycle : cycler('color', ['k'])   # trailing comment
//! ```
//!
//! Parsing is lenient, matching the plotting library's own loader:
//!
//! - `#` starts a comment unless it sits inside a quoted string
//! - blank lines are ignored
//! - lines without a colon are skipped with a warning
//! - a value wrapped in double quotes is unquoted
//! - duplicate keys keep the last value, with a warning
//!
//! Unknown option names are kept here; they are dropped when the sheet is
//! applied to an [`RcParams`](crate::RcParams).

use std::path::Path;

use crate::error::RcError;

/// Ordered `key : value` entries parsed from stylesheet text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    entries: Vec<(String, String)>,
}

impl StyleSheet {
    /// Creates an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses stylesheet text. Never fails; malformed lines are skipped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plotstyle_rc::StyleSheet;
    ///
    /// let sheet = StyleSheet::parse("font.size: 8\nlegend.fancybox: False # no rounding\n");
    /// assert_eq!(sheet.get("font.size"), Some("8"));
    /// assert_eq!(sheet.get("legend.fancybox"), Some("False"));
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut sheet = Self::new();

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = strip_comment(raw);
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                log::warn!("Missing colon in stylesheet line {}: {:?}", line_no, raw);
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                log::warn!("Empty option name in stylesheet line {}", line_no);
                continue;
            }

            let value = unquote(value.trim());
            if sheet.get(key).is_some() {
                log::warn!("Duplicate key '{}' in stylesheet line {}", key, line_no);
            }
            sheet.insert(key, value);
        }

        sheet
    }

    /// Reads and parses a stylesheet file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RcError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RcError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Sets `key`, replacing any earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the sheet, yielding its entries in file order.
    pub fn into_entries(self) -> Vec<(String, String)> {
        self.entries
    }
}

/// Trims the line and cuts it at the first `#` outside quotes.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    for (i, ch) in line.char_indices() {
        match (quote, ch) {
            (None, '#') => return line[..i].trim(),
            (None, '"') | (None, '\'') => quote = Some(ch),
            (Some(q), c) if c == q => quote = None,
            _ => {}
        }
    }
    line.trim()
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_basic() {
        let sheet = StyleSheet::parse("font.size : 8\nfigure.figsize: 5.6, 3.461\n");
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.get("font.size"), Some("8"));
        assert_eq!(sheet.get("figure.figsize"), Some("5.6, 3.461"));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let sheet = StyleSheet::parse("# heading\n\n   \nfont.size: 9 # inline\n#font.size: 12\n");
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get("font.size"), Some("9"));
    }

    #[test]
    fn test_hash_inside_quotes_is_kept() {
        let sheet = StyleSheet::parse("axes.edgecolor: \"#004174\"\nlabel: 'a#b' # c\n");
        assert_eq!(sheet.get("axes.edgecolor"), Some("#004174"));
        assert_eq!(sheet.get("label"), Some("'a#b'"));
    }

    #[test]
    fn test_value_may_contain_colons_and_brackets() {
        let sheet = StyleSheet::parse("axes.prop_cycle: cycler('color', ['k'])\ndate.epoch: 1970-01-01T00:00:00\n");
        assert_eq!(sheet.get("axes.prop_cycle"), Some("cycler('color', ['k'])"));
        assert_eq!(sheet.get("date.epoch"), Some("1970-01-01T00:00:00"));
    }

    #[test]
    fn test_missing_colon_skipped() {
        let sheet = StyleSheet::parse("this line is broken\nfont.size: 8\n");
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_empty_key_skipped() {
        let sheet = StyleSheet::parse(": 8\n");
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_duplicate_keeps_last_in_original_position() {
        let sheet = StyleSheet::parse("a: 1\nb: 2\na: 3\n");
        let entries: Vec<_> = sheet.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_empty_value_allowed() {
        let sheet = StyleSheet::parse("text.latex.preamble:\n");
        assert_eq!(sheet.get("text.latex.preamble"), Some(""));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.mplstyle");
        std::fs::write(&path, "lines.linewidth: 1.0\n").unwrap();

        let sheet = StyleSheet::from_file(&path).unwrap();
        assert_eq!(sheet.get("lines.linewidth"), Some("1.0"));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = StyleSheet::from_file(dir.path().join("absent.mplstyle"));
        assert!(matches!(result, Err(RcError::Io { .. })));
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(text in "\\PC{0,200}") {
            let _ = StyleSheet::parse(&text);
        }

        #[test]
        fn prop_simple_pairs_survive(
            key in "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}",
            value in "[A-Za-z0-9., -]{0,20}",
        ) {
            let sheet = StyleSheet::parse(&format!("{}: {}\n", key, value));
            prop_assert_eq!(sheet.get(&key), Some(value.trim()));
        }
    }
}
