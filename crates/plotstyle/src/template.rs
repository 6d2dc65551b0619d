//! Placeholder substitution for style templates.
//!
//! Style templates are stylesheet text with bracketed placeholders:
//!
//! | Placeholder     | Replacement                                    |
//! |-----------------|------------------------------------------------|
//! | `[linewidth]`   | base line width                                |
//! | `[2*linewidth]` | twice the base line width                      |
//! | `[fontsize]`    | font size in points                            |
//! | `[figsize]`     | default figure size as `width, height`         |
//! | `[preamble]`    | single-line LaTeX preamble                     |
//! | `[fontfamily]`  | `serif`, or `sans-serif` in presentation mode  |
//!
//! A template is parsed once into literal text and placeholder slots, then
//! rendered against an immutable [`Replacements`] map. Rendering never
//! re-scans substituted text, and replacement values may not contain `[` or
//! `]` at all, so the result is independent of substitution order.
//!
//! Bracketed text that is not a known placeholder, such as the
//! `['k']` in `cycler('color', ['k'])`, passes through untouched.
//!
//! # Example
//!
//! ```rust
//! use plotstyle::template::{Placeholder, Replacements, Template};
//!
//! let template = Template::parse("font.size : [fontsize]\n");
//! let values = Replacements::new().with(Placeholder::Fontsize, "8").unwrap();
//!
//! assert_eq!(template.render_partial(&values).unwrap(), "font.size : 8\n");
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::record::{Scalar, StyleRecord};

/// Errors from template parsing and rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A required placeholder does not occur in the template.
    #[error("Template has no '{0}' placeholder")]
    MissingPlaceholder(String),

    /// The template uses a placeholder that has no value.
    #[error("No value supplied for placeholder '{0}'")]
    MissingValue(String),

    /// A replacement value contains a square bracket.
    #[error("Value for placeholder '{token}' contains a square bracket: {value}")]
    BracketInValue { token: String, value: String },
}

/// The placeholders a style template may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    Linewidth,
    DoubleLinewidth,
    Fontsize,
    Figsize,
    Preamble,
    Fontfamily,
}

impl Placeholder {
    pub const ALL: [Placeholder; 6] = [
        Placeholder::Linewidth,
        Placeholder::DoubleLinewidth,
        Placeholder::Fontsize,
        Placeholder::Figsize,
        Placeholder::Preamble,
        Placeholder::Fontfamily,
    ];

    /// The text between the brackets.
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::Linewidth => "linewidth",
            Placeholder::DoubleLinewidth => "2*linewidth",
            Placeholder::Fontsize => "fontsize",
            Placeholder::Figsize => "figsize",
            Placeholder::Preamble => "preamble",
            Placeholder::Fontfamily => "fontfamily",
        }
    }

    /// The full token, brackets included.
    pub fn token(self) -> String {
        format!("[{}]", self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Whether a style template must contain this placeholder.
    ///
    /// Older templates hard-code the font family, so `[fontfamily]` is optional.
    pub fn is_required(self) -> bool {
        !matches!(self, Placeholder::Fontfamily)
    }
}

/// Immutable placeholder values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    values: BTreeMap<Placeholder, String>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes every placeholder value for a style.
    ///
    /// `fontsize` is the effective size after any override; `preamble` must
    /// already be flattened to one line.
    pub fn for_style(
        record: &StyleRecord,
        fontsize: Scalar,
        preamble: &str,
        presentation: bool,
    ) -> Result<Self, TemplateError> {
        let family = if presentation { "sans-serif" } else { "serif" };
        Self::new()
            .with(Placeholder::Linewidth, record.linewidth().to_string())?
            .with(
                Placeholder::DoubleLinewidth,
                record.linewidth().scaled(2).to_string(),
            )?
            .with(Placeholder::Fontsize, fontsize.to_string())?
            .with(
                Placeholder::Figsize,
                record.default_figure_size().to_rc_value(),
            )?
            .with(Placeholder::Preamble, preamble)?
            .with(Placeholder::Fontfamily, family)
    }

    /// Adds a value, rejecting anything containing `[` or `]`.
    pub fn with(
        mut self,
        placeholder: Placeholder,
        value: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let value = value.into();
        if value.contains(['[', ']']) {
            return Err(TemplateError::BracketInValue {
                token: placeholder.token(),
                value,
            });
        }
        self.values.insert(placeholder, value);
        Ok(self)
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.values.get(&placeholder).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Placeholder, &str)> {
        self.values.iter().map(|(p, v)| (*p, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Placeholder),
}

/// A parsed style template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Splits `source` into literal text and placeholder slots.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut text = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(open) = rest.find('[') {
            text.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let slot = after
                .find(']')
                .and_then(|close| Placeholder::from_name(&after[..close]).map(|p| (p, close)));

            match slot {
                Some((placeholder, close)) => {
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Slot(placeholder));
                    rest = &after[close + 1..];
                }
                None => {
                    text.push('[');
                    rest = after;
                }
            }
        }

        text.push_str(rest);
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Self { segments }
    }

    /// Placeholders occurring in the template.
    pub fn placeholders(&self) -> BTreeSet<Placeholder> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Slot(p) => Some(*p),
                Segment::Text(_) => None,
            })
            .collect()
    }

    /// Renders a complete style template.
    ///
    /// # Errors
    ///
    /// [`TemplateError::MissingPlaceholder`] if a required placeholder never
    /// occurs, or [`TemplateError::MissingValue`] if a used placeholder has
    /// no value.
    pub fn render(&self, values: &Replacements) -> Result<String, TemplateError> {
        let present = self.placeholders();
        if let Some(missing) = Placeholder::ALL
            .into_iter()
            .find(|p| p.is_required() && !present.contains(p))
        {
            return Err(TemplateError::MissingPlaceholder(missing.token()));
        }
        self.render_partial(values)
    }

    /// Renders without requiring any particular placeholder to be present.
    pub fn render_partial(&self, values: &Replacements) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(p) => {
                    let value = values
                        .get(*p)
                        .ok_or_else(|| TemplateError::MissingValue(p.token()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FULL: &str = "a: [linewidth]\nb: [2*linewidth]\nc: [fontsize]\nd: [figsize]\ne: [preamble]\nf: [fontfamily]\n";

    fn values() -> Replacements {
        Replacements::new()
            .with(Placeholder::Linewidth, "0.5")
            .and_then(|r| r.with(Placeholder::DoubleLinewidth, "1.0"))
            .and_then(|r| r.with(Placeholder::Fontsize, "8"))
            .and_then(|r| r.with(Placeholder::Figsize, "5.6, 3.461"))
            .and_then(|r| r.with(Placeholder::Preamble, r"\usepackage{stix}"))
            .and_then(|r| r.with(Placeholder::Fontfamily, "serif"))
            .unwrap()
    }

    #[test]
    fn test_placeholder_names_round_trip() {
        for p in Placeholder::ALL {
            assert_eq!(Placeholder::from_name(p.name()), Some(p));
        }
        assert_eq!(Placeholder::DoubleLinewidth.token(), "[2*linewidth]");
        assert_eq!(Placeholder::from_name("linewidths"), None);
    }

    #[test]
    fn test_render_full() {
        let out = Template::parse(FULL).render(&values()).unwrap();
        assert_eq!(
            out,
            "a: 0.5\nb: 1.0\nc: 8\nd: 5.6, 3.461\ne: \\usepackage{stix}\nf: serif\n"
        );
    }

    #[test]
    fn test_repeated_placeholder() {
        let template = Template::parse("[fontsize]/[fontsize]");
        let out = template.render_partial(&values()).unwrap();
        assert_eq!(out, "8/8");
    }

    #[test]
    fn test_unknown_brackets_pass_through() {
        let template = Template::parse("axes.prop_cycle : cycler('color', ['k'])\n[unknown] [ [fontsize");
        assert!(template.placeholders().is_empty());
        let out = template.render_partial(&Replacements::new()).unwrap();
        assert_eq!(out, "axes.prop_cycle : cycler('color', ['k'])\n[unknown] [ [fontsize");
    }

    #[test]
    fn test_nested_bracket_before_placeholder() {
        let template = Template::parse("[[fontsize]]");
        assert_eq!(template.render_partial(&values()).unwrap(), "[8]");
    }

    #[test]
    fn test_missing_required_placeholder() {
        let template = Template::parse("font.size : [fontsize]\n");
        let err = template.render(&values()).unwrap_err();
        assert_eq!(err, TemplateError::MissingPlaceholder("[linewidth]".to_string()));
    }

    #[test]
    fn test_fontfamily_optional() {
        let source = FULL.replace("f: [fontfamily]\n", "");
        assert!(Template::parse(&source).render(&values()).is_ok());
    }

    #[test]
    fn test_missing_value() {
        let template = Template::parse("[preamble]");
        let err = template.render_partial(&Replacements::new()).unwrap_err();
        assert_eq!(err, TemplateError::MissingValue("[preamble]".to_string()));
    }

    #[test]
    fn test_bracket_in_value_rejected() {
        let err = Replacements::new()
            .with(Placeholder::Preamble, r"\usepackage[T1]{fontenc}")
            .unwrap_err();
        assert!(matches!(err, TemplateError::BracketInValue { ref token, .. } if token == "[preamble]"));
    }

    #[test]
    fn test_order_of_insertion_irrelevant() {
        let forward = values();
        let mut backward = Replacements::new();
        for (p, v) in forward.iter().collect::<Vec<_>>().into_iter().rev() {
            backward = backward.with(p, v).unwrap();
        }
        let template = Template::parse(FULL);
        assert_eq!(
            template.render(&forward).unwrap(),
            template.render(&backward).unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_values_never_contain_brackets(value in "\\PC{0,40}") {
            match Replacements::new().with(Placeholder::Preamble, value.clone()) {
                Ok(r) => {
                    let v = r.get(Placeholder::Preamble).unwrap();
                    prop_assert!(!v.contains('[') && !v.contains(']'));
                }
                Err(_) => prop_assert!(value.contains('[') || value.contains(']')),
            }
        }

        #[test]
        fn prop_render_is_idempotent(prefix in "[a-z.: \\n]{0,30}", suffix in "[a-z.: \\n\\[\\]]{0,30}") {
            let template = Template::parse(&format!("{}{}{}", prefix, FULL, suffix));
            let first = template.render(&values()).unwrap();
            let second = template.render(&values()).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_text_without_placeholders_is_unchanged(text in "[^\\[]{0,60}") {
            let out = Template::parse(&text).render_partial(&Replacements::new()).unwrap();
            prop_assert_eq!(out, text);
        }
    }
}
