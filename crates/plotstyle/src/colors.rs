//! Standard plotting colors and venue accent colors.
//!
//! Every style gets the standard palette. Styles may add accents by name
//! through their `custom_colors` list; the names must appear in
//! [`ACCENT_COLORS`].

use serde::Serialize;

/// Colors available under every style, in display order.
pub const STANDARD_COLORS: &[(&str, &str)] = &[
    ("red", "#D62728"),
    ("orange", "#FF7F0E"),
    ("yellow", "#FDB813"),
    ("green", "#2CA02C"),
    ("blue", "#0079C1"),
    ("violet", "#9467BD"),
    ("cyan", "#17BECF"),
    ("magenta", "#D64ECF"),
    ("brown", "#8C564B"),
    ("darkgrey", "#3F3F3F"),
    ("grey", "#7F7F7F"),
    ("lightgrey", "#BFBFBF"),
    ("black", "#000000"),
    ("white", "#FFFFFF"),
];

/// Venue-specific accents.
pub const ACCENT_COLORS: &[(&str, &str)] = &[
    // Astronomy & Astrophysics
    ("aa_blue", "#0000FF"),
    // American Geophysical Union
    ("agu_blue", "#004174"),
    // Caltech, Pantone PMS 1585c
    ("caltech_orange", "#FF6C0C"),
    // Monthly Notices of the Royal Astronomical Society
    ("mnras_lavender", "#AEA6CE"),
];

/// Hex value of a named accent.
pub fn accent(name: &str) -> Option<&'static str> {
    ACCENT_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, hex)| *hex)
}

/// An ordered name to hex-color map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    entries: Vec<(String, String)>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

impl Palette {
    /// The standard colors only.
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_COLORS
                .iter()
                .map(|(n, h)| (n.to_string(), h.to_string()))
                .collect(),
        }
    }

    /// The standard colors followed by the named accents.
    ///
    /// Unknown accent names are skipped; registries validate them up front.
    pub fn with_accents<S: AsRef<str>>(names: &[S]) -> Self {
        let mut palette = Self::standard();
        for name in names {
            let name = name.as_ref();
            match accent(name) {
                Some(hex) => palette.entries.push((name.to_string(), hex.to_string())),
                None => log::debug!("Skipping unknown accent color '{}'", name),
            }
        }
        palette
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, h)| h.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, h)| (n.as_str(), h.as_str()))
    }

    /// Names beyond the standard palette.
    pub fn accent_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|(n, _)| n.as_str())
            .filter(|n| !STANDARD_COLORS.iter().any(|(s, _)| s == n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_lookup() {
        assert_eq!(accent("agu_blue"), Some("#004174"));
        assert_eq!(accent("caltech_orange"), Some("#FF6C0C"));
        assert_eq!(accent("red"), None);
    }

    #[test]
    fn test_standard_palette() {
        let palette = Palette::standard();
        assert_eq!(palette.len(), STANDARD_COLORS.len());
        assert_eq!(palette.get("blue"), Some("#0079C1"));
        assert_eq!(palette.accent_names().count(), 0);
    }

    #[test]
    fn test_with_accents() {
        let palette = Palette::with_accents(&["mnras_lavender", "nope"]);
        assert_eq!(palette.get("mnras_lavender"), Some("#AEA6CE"));
        assert_eq!(palette.get("nope"), None);
        let accents: Vec<_> = palette.accent_names().collect();
        assert_eq!(accents, vec!["mnras_lavender"]);
    }
}
