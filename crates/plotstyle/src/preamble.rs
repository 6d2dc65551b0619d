//! LaTeX preamble assembly.
//!
//! A preamble is the common fragment, then the font package directive, then
//! a font fragment, then any extra packages the caller asked for, joined and
//! flattened onto a single line so it fits a `key : value` stylesheet entry. Presentation mode swaps the font fragment
//! for the sans-serif presentation fragment and leaves out the style's own
//! font package; an explicitly requested package is still loaded.

use crate::error::StyleError;
use crate::resources::Resources;

/// A LaTeX font package with optional load options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontPackage {
    name: String,
    options: Option<String>,
}

impl FontPackage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: Option<impl Into<String>>) -> Self {
        self.options = options.map(Into::into).filter(|o: &String| !o.is_empty());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> Option<&str> {
        self.options.as_deref()
    }

    /// The `\usepackage` directive for this package.
    ///
    /// Options go through `\PassOptionsToPackage` so the directive never
    /// contains square brackets.
    pub fn directive(&self) -> String {
        if self.name.is_empty() {
            return String::new();
        }
        match &self.options {
            Some(options) => format!(
                r"\PassOptionsToPackage{{{}}}{{{}}}\usepackage{{{}}}",
                options, self.name, self.name
            ),
            None => format!(r"\usepackage{{{}}}", self.name),
        }
    }
}

/// Builds single-line preambles from a [`Resources`] tree.
#[derive(Debug, Clone, Copy)]
pub struct PreambleBuilder<'a> {
    resources: &'a Resources,
    extra: &'a [String],
}

impl<'a> PreambleBuilder<'a> {
    pub fn new(resources: &'a Resources) -> Self {
        Self {
            resources,
            extra: &[],
        }
    }

    /// LaTeX appended after the font fragment, e.g. `\usepackage{bm}`.
    pub fn extra_packages(mut self, extra: &'a [String]) -> Self {
        self.extra = extra;
        self
    }

    /// Assembles the preamble for `font`.
    ///
    /// # Errors
    ///
    /// [`StyleError::FontFragmentNotFound`] if `font` has no fragment and
    /// presentation mode is off, or [`StyleError::ResourceNotFound`] for a
    /// missing common or presentation fragment.
    pub fn build(
        &self,
        font: &str,
        package: Option<&FontPackage>,
        presentation: bool,
    ) -> Result<String, StyleError> {
        let common = self.resources.common_preamble()?;
        let fragment = if presentation {
            self.resources.presentation_preamble()?
        } else {
            self.resources.font_preamble(font)?
        };
        let directive = package.map(FontPackage::directive).unwrap_or_default();

        let mut preamble = String::with_capacity(common.len() + directive.len() + fragment.len());
        preamble.push_str(&common);
        preamble.push_str(&directive);
        preamble.push_str(&fragment);
        for package in self.extra {
            preamble.push_str(package);
        }
        Ok(flatten(&preamble))
    }
}

/// Removes line breaks so the preamble fits one stylesheet line.
pub fn flatten(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}
