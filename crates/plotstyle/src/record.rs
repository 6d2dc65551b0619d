//! Style records: the typographic and layout parameters of one venue.
//!
//! Records are immutable once loaded. They are normally obtained from a
//! [`StyleRegistry`](crate::StyleRegistry), which parses them from YAML:
//!
//! ```yaml
//! AGU:
//!   name: American Geophysical Union
//!   font: Times New Roman
//!   font_package: stix
//!   fontsize: 8
//!   linewidth: 0.5
//!   figure_widths:
//!     column: 3.5
//!     text: 5.6
//!     page: 7.5
//!   default_figure_size: [5.6, 3.461]
//!   custom_colors: [agu_blue]
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Formats a float so integral values keep a trailing `.0`.
///
/// Non-integral values use the shortest representation that round-trips.
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// A number that remembers whether it was written as an integer.
///
/// `8` renders as `"8"` and `0.5` as `"0.5"`; scaling keeps the kind, so
/// doubling `0.5` renders as `"1.0"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
}

impl Scalar {
    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::Int(n) => n as f64,
            Scalar::Float(x) => x,
        }
    }

    /// Multiplies by an integer factor without changing the kind.
    pub fn scaled(self, factor: i64) -> Scalar {
        match self {
            Scalar::Int(n) => Scalar::Int(n * factor),
            Scalar::Float(x) => Scalar::Float(x * factor as f64),
        }
    }

    pub fn is_positive(self) -> bool {
        self.as_f64() > 0.0
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) => f.write_str(&format_decimal(*x)),
        }
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(n.into())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Height over width. Usually close to the inverse golden ratio.
    pub fn aspect(&self) -> f64 {
        self.height / self.width
    }

    /// The `width, height` form used by runtime configuration files.
    pub fn to_rc_value(&self) -> String {
        format!(
            "{}, {}",
            format_decimal(self.width),
            format_decimal(self.height)
        )
    }
}

impl From<(f64, f64)> for FigureSize {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

impl From<FigureSize> for (f64, f64) {
    fn from(size: FigureSize) -> Self {
        (size.width, size.height)
    }
}

impl fmt::Display for FigureSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.to_rc_value())
    }
}

/// Figure widths in inches, keyed by layout context, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FigureWidths(Vec<(String, f64)>);

impl FigureWidths {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, w)| *w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(l, w)| (l.as_str(), *w))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FigureWidths {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(l, w)| (l.into(), w)).collect())
    }
}

impl Serialize for FigureWidths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, width) in &self.0 {
            map.serialize_entry(label, width)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FigureWidths {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WidthsVisitor;

        impl<'de> Visitor<'de> for WidthsVisitor {
            type Value = FigureWidths;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of layout context to width in inches")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut widths = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, width)) = access.next_entry::<String, f64>()? {
                    widths.push((label, width));
                }
                Ok(FigureWidths(widths))
            }
        }

        deserializer.deserialize_map(WidthsVisitor)
    }
}

/// One named style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleRecord {
    /// Filled from the registry key, not from the record body.
    #[serde(skip)]
    pub(crate) key: String,
    pub(crate) name: String,
    pub(crate) font: String,
    pub(crate) font_package: String,
    #[serde(default)]
    pub(crate) font_package_options: Option<String>,
    pub(crate) fontsize: Scalar,
    pub(crate) linewidth: Scalar,
    pub(crate) figure_widths: FigureWidths,
    pub(crate) default_figure_size: FigureSize,
    #[serde(default)]
    pub(crate) custom_colors: Vec<String>,
}

impl StyleRecord {
    /// Short unique name, e.g. `AGU`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Full venue name, e.g. `American Geophysical Union`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    /// LaTeX package providing the font, e.g. `stix`.
    pub fn font_package(&self) -> &str {
        &self.font_package
    }

    pub fn font_package_options(&self) -> Option<&str> {
        self.font_package_options.as_deref()
    }

    /// Font size in points.
    pub fn fontsize(&self) -> Scalar {
        self.fontsize
    }

    /// Base line width; plotted lines use twice this.
    pub fn linewidth(&self) -> Scalar {
        self.linewidth
    }

    pub fn figure_widths(&self) -> &FigureWidths {
        &self.figure_widths
    }

    pub fn default_figure_size(&self) -> FigureSize {
        self.default_figure_size
    }

    /// Names of venue accent colors, see [`crate::colors`].
    pub fn custom_colors(&self) -> &[String] {
        &self.custom_colors
    }
}

impl fmt::Display for StyleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   Name: {}", self.name)?;
        writeln!(f, "   Font: {}", self.font)?;
        writeln!(f, "   Font size: {}", self.fontsize)?;
        writeln!(f, "   Line width: {}", self.linewidth)?;
        writeln!(f, "   Figure widths:")?;
        for (label, width) in self.figure_widths.iter() {
            writeln!(f, "      {}: {} in", label, format_decimal(width))?;
        }
        write!(f, "   Default figure size: {}", self.default_figure_size)?;
        if !self.custom_colors.is_empty() {
            write!(f, "\n   Custom color: {}", self.custom_colors.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGU: &str = r#"
name: American Geophysical Union
font: Times New Roman
font_package: stix
fontsize: 8
linewidth: 0.5
figure_widths:
  column: 3.5
  text: 5.6
  page: 7.5
default_figure_size: [5.6, 3.461]
custom_colors: [agu_blue]
"#;

    fn agu() -> StyleRecord {
        let mut record: StyleRecord = serde_yaml::from_str(AGU).unwrap();
        record.key = "AGU".to_string();
        record
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1.0), "1.0");
        assert_eq!(format_decimal(0.5), "0.5");
        assert_eq!(format_decimal(3.461), "3.461");
        assert_eq!(format_decimal(2.19), "2.19");
        assert_eq!(format_decimal(-4.0), "-4.0");
    }

    #[test]
    fn test_scalar_display_keeps_kind() {
        assert_eq!(Scalar::Int(8).to_string(), "8");
        assert_eq!(Scalar::Float(8.0).to_string(), "8.0");
        assert_eq!(Scalar::Float(0.5).scaled(2).to_string(), "1.0");
        assert_eq!(Scalar::Float(0.397).scaled(2).to_string(), "0.794");
        assert_eq!(Scalar::Int(1).scaled(2).to_string(), "2");
    }

    #[test]
    fn test_scalar_from_yaml() {
        let int: Scalar = serde_yaml::from_str("9").unwrap();
        let float: Scalar = serde_yaml::from_str("0.249").unwrap();
        assert_eq!(int, Scalar::Int(9));
        assert_eq!(float, Scalar::Float(0.249));
    }

    #[test]
    fn test_figure_size_rc_value() {
        assert_eq!(FigureSize::new(5.6, 3.461).to_rc_value(), "5.6, 3.461");
        assert_eq!(FigureSize::new(4.0, 2.5).to_rc_value(), "4.0, 2.5");
        assert_eq!(FigureSize::new(5.6, 3.461).to_string(), "(5.6, 3.461)");
    }

    #[test]
    fn test_figure_widths_keep_order() {
        let record = agu();
        let labels: Vec<_> = record.figure_widths().labels().collect();
        assert_eq!(labels, vec!["column", "text", "page"]);
        assert_eq!(record.figure_widths().get("text"), Some(5.6));
        assert_eq!(record.figure_widths().get("margin"), None);
    }

    #[test]
    fn test_record_fields() {
        let record = agu();
        assert_eq!(record.key(), "AGU");
        assert_eq!(record.fontsize(), Scalar::Int(8));
        assert_eq!(record.linewidth(), Scalar::Float(0.5));
        assert_eq!(record.font_package_options(), None);
        assert_eq!(record.custom_colors().to_vec(), vec!["agu_blue".to_string()]);
        assert!((record.default_figure_size().aspect() - 0.618).abs() < 0.001);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = format!("{}colour: blue\n", AGU);
        assert!(serde_yaml::from_str::<StyleRecord>(&yaml).is_err());
    }

    #[test]
    fn test_display() {
        let text = agu().to_string();
        assert!(text.contains("   Name: American Geophysical Union"));
        assert!(text.contains("      text: 5.6 in"));
        assert!(text.contains("   Default figure size: (5.6, 3.461)"));
        assert!(text.ends_with("   Custom color: agu_blue"));
    }

    #[test]
    fn test_figure_widths_from_iter() {
        let widths: FigureWidths = [("column", 3.4), ("page", 7.05)].into_iter().collect();
        assert_eq!(widths.len(), 2);
        let yaml = serde_yaml::to_string(&widths).unwrap();
        assert!(yaml.find("column").unwrap() < yaml.find("page").unwrap());
    }
}
