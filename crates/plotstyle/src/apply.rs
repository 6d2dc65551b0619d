//! Rendering styles and applying them to a runtime configuration.
//!
//! [`Styler`] ties the pieces together: it looks a record up in a
//! [`StyleRegistry`], assembles the preamble, renders the template, and
//! applies the result to an [`RcParams`] the caller owns.
//!
//! Two application strategies produce the same configuration:
//!
//! - [`Strategy::Stylesheet`] writes the rendered text to the transient
//!   stylesheet file and loads it the way a style file is loaded; the file is
//!   removed before returning.
//! - [`Strategy::Dictionary`] parses the rendered text into option/value
//!   pairs in memory and copies the supported ones in directly.
//!
//! # Example
//!
//! ```rust
//! use plotstyle::{StyleOptions, Styler};
//! use plotstyle_rc::RcParams;
//!
//! let mut rc = RcParams::defaults();
//! let options = StyleOptions::new().dictionary().silent(true);
//! let applied = Styler::new().apply(&mut rc, "AGU", &options).unwrap();
//!
//! assert_eq!(rc.get("font.size"), Some("8"));
//! assert_eq!(applied.figure_widths().get("column"), Some(3.5));
//! ```

use plotstyle_rc::{RcParams, StyleSheet};

use crate::colors::Palette;
use crate::error::StyleError;
use crate::preamble::{FontPackage, PreambleBuilder};
use crate::record::{FigureWidths, Scalar, StyleRecord};
use crate::registry::StyleRegistry;
use crate::resources::Resources;
use crate::summary;
use crate::template::{Replacements, Template};
use crate::transient::with_transient_stylesheet;

/// Display font used in presentation mode.
pub const PRESENTATION_FONT: &str = "Fira Sans";

/// Backend that runs an external LaTeX engine for text layout.
pub const PRESENTATION_BACKEND: &str = "pgf";

/// How a rendered style reaches the runtime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Through a transient stylesheet file.
    #[default]
    Stylesheet,
    /// Directly, option by option.
    Dictionary,
}

/// Per-application overrides and switches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOptions {
    font_size: Option<Scalar>,
    font_package: Option<String>,
    font_package_options: Option<String>,
    presentation: bool,
    silent: bool,
    strategy: Strategy,
    reset_first: bool,
    latex_packages: Vec<String>,
    params: Vec<(String, String)>,
}

impl StyleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the style's font size.
    pub fn font_size(mut self, size: impl Into<Scalar>) -> Self {
        self.font_size = Some(size.into());
        self
    }

    /// Overrides the style's LaTeX font package.
    pub fn font_package(mut self, package: impl Into<String>) -> Self {
        self.font_package = Some(package.into());
        self
    }

    /// Options for the font package, e.g. `bitstream-charter`.
    pub fn font_package_options(mut self, options: impl Into<String>) -> Self {
        self.font_package_options = Some(options.into());
        self
    }

    /// Sans-serif presentation mode with the LaTeX-capable backend.
    pub fn presentation(mut self, yes: bool) -> Self {
        self.presentation = yes;
        self
    }

    /// Suppresses the printed summary.
    pub fn silent(mut self, yes: bool) -> Self {
        self.silent = yes;
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Shorthand for [`Strategy::Dictionary`].
    pub fn dictionary(self) -> Self {
        self.strategy(Strategy::Dictionary)
    }

    /// Resets the configuration to defaults before applying.
    ///
    /// Off by default: consecutive applications stack, and options one style
    /// sets but the next does not mention keep their earlier values.
    pub fn reset_first(mut self, yes: bool) -> Self {
        self.reset_first = yes;
        self
    }

    /// Extra LaTeX appended to the preamble after the font setup.
    ///
    /// Package options must be passed with `\PassOptionsToPackage`; square
    /// brackets are rejected when the style is rendered.
    pub fn latex_package(mut self, latex: impl Into<String>) -> Self {
        self.latex_packages.push(latex.into());
        self
    }

    pub fn latex_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.latex_packages.extend(packages.into_iter().map(Into::into));
        self
    }

    /// Extra runtime option applied after the style itself.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn get_font_size(&self) -> Option<Scalar> {
        self.font_size
    }

    pub fn is_presentation(&self) -> bool {
        self.presentation
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn get_strategy(&self) -> Strategy {
        self.strategy
    }

    /// The font package to load, or `None` for no directive.
    ///
    /// Presentation mode loads only an explicitly requested package. The
    /// style's own options are kept only when its own package is used.
    fn effective_package(&self, record: &StyleRecord) -> Option<FontPackage> {
        match (&self.font_package, self.presentation) {
            (Some(name), _) => {
                Some(FontPackage::new(name.as_str()).with_options(self.font_package_options.clone()))
            }
            (None, true) => None,
            (None, false) => Some(
                FontPackage::new(record.font_package()).with_options(
                    self.font_package_options
                        .clone()
                        .or_else(|| record.font_package_options().map(str::to_string)),
                ),
            ),
        }
    }
}

/// A style rendered to stylesheet text, not yet applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStyle {
    replacements: Replacements,
    text: String,
}

impl RenderedStyle {
    /// Complete stylesheet text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn replacements(&self) -> &Replacements {
        &self.replacements
    }

    /// The rendered text as option/value pairs.
    pub fn to_sheet(&self) -> StyleSheet {
        StyleSheet::parse(&self.text)
    }
}

/// The outcome of applying a style.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedStyle {
    record: StyleRecord,
    fontsize: Scalar,
    presentation: bool,
    colors: Palette,
    dropped: Vec<String>,
}

impl AppliedStyle {
    pub fn record(&self) -> &StyleRecord {
        &self.record
    }

    pub fn key(&self) -> &str {
        self.record.key()
    }

    /// Font in effect: the style's, or the presentation font.
    pub fn font(&self) -> &str {
        if self.presentation {
            PRESENTATION_FONT
        } else {
            self.record.font()
        }
    }

    /// Font size in effect, after any override.
    pub fn fontsize(&self) -> Scalar {
        self.fontsize
    }

    pub fn linewidth(&self) -> Scalar {
        self.record.linewidth()
    }

    pub fn figure_widths(&self) -> &FigureWidths {
        self.record.figure_widths()
    }

    pub fn presentation(&self) -> bool {
        self.presentation
    }

    /// Standard colors plus this style's accents.
    pub fn colors(&self) -> &Palette {
        &self.colors
    }

    /// Options that were not applied: unsupported by the catalog, or not
    /// settable from a stylesheet.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// The human-readable summary printed on application.
    pub fn summary(&self) -> Result<String, StyleError> {
        summary::render(self)
    }
}

/// Renders and applies styles from a registry.
#[derive(Debug, Clone)]
pub struct Styler<'r> {
    registry: &'r StyleRegistry,
    resources: Resources,
}

impl Default for Styler<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Styler<'static> {
    /// Built-in styles with bundled resources.
    pub fn new() -> Self {
        Self::with_registry(StyleRegistry::builtin())
    }
}

impl<'r> Styler<'r> {
    pub fn with_registry(registry: &'r StyleRegistry) -> Self {
        Self {
            registry,
            resources: Resources::bundled(),
        }
    }

    pub fn resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    pub fn registry(&self) -> &StyleRegistry {
        self.registry
    }

    pub fn get_resources(&self) -> &Resources {
        &self.resources
    }

    /// Renders the named style without applying it.
    pub fn render(&self, name: &str, options: &StyleOptions) -> Result<RenderedStyle, StyleError> {
        let record = self.registry.get(name)?;
        self.render_record(record, options)
    }

    /// Renders a record without applying it.
    ///
    /// Deterministic: the same record and options always give the same text.
    pub fn render_record(
        &self,
        record: &StyleRecord,
        options: &StyleOptions,
    ) -> Result<RenderedStyle, StyleError> {
        let package = options.effective_package(record);
        let preamble = PreambleBuilder::new(&self.resources)
            .extra_packages(&options.latex_packages)
            .build(
            record.font(),
            package.as_ref(),
            options.presentation,
        )?;

        let fontsize = options.font_size.unwrap_or(record.fontsize());
        let replacements =
            Replacements::for_style(record, fontsize, &preamble, options.presentation)?;

        let template = Template::parse(&self.resources.template()?);
        let text = template.render(&replacements)?;
        Ok(RenderedStyle { replacements, text })
    }

    /// Applies the named style to `rc`.
    ///
    /// # Errors
    ///
    /// - [`StyleError::UnknownStyle`] if `name` is not registered
    /// - [`StyleError::FontFragmentNotFound`] / [`StyleError::ResourceNotFound`]
    ///   for missing resources
    /// - [`StyleError::Io`] if the transient stylesheet cannot be written or removed
    ///
    /// On error `rc` may have been partly updated; the transient file never
    /// outlives the call.
    pub fn apply(
        &self,
        rc: &mut RcParams,
        name: &str,
        options: &StyleOptions,
    ) -> Result<AppliedStyle, StyleError> {
        let record = self.registry.get(name)?;
        let rendered = self.render_record(record, options)?;

        if options.reset_first {
            rc.reset();
        }

        let mut dropped = match options.strategy {
            Strategy::Stylesheet => with_transient_stylesheet(
                self.resources.transient_path(),
                rendered.text(),
                |path| rc.use_style_file(path).map_err(StyleError::from),
            )?,
            Strategy::Dictionary => rc.update(rendered.to_sheet().into_entries()),
        };
        dropped.extend(rc.update(options.params.iter().cloned()));

        if options.presentation {
            rc.set_backend(PRESENTATION_BACKEND)?;
        }

        let applied = AppliedStyle {
            record: record.clone(),
            fontsize: options.font_size.unwrap_or(record.fontsize()),
            presentation: options.presentation,
            colors: Palette::with_accents(record.custom_colors()),
            dropped,
        };

        log::info!(
            "Applied style '{}'{} via {:?}",
            record.key(),
            if options.presentation { " (presentation)" } else { "" },
            options.strategy
        );
        if !applied.dropped.is_empty() {
            log::debug!("Options not applied: {}", applied.dropped.join(", "));
        }

        if !options.silent {
            println!("{}", applied.summary()?);
        }
        Ok(applied)
    }

    /// Applies a style, runs `f`, then restores `rc` to its prior state.
    ///
    /// `rc` is restored even if `f` panics.
    pub fn context<T, F>(
        &self,
        rc: &mut RcParams,
        name: &str,
        options: &StyleOptions,
        f: F,
    ) -> Result<T, StyleError>
    where
        F: FnOnce(&mut RcParams, &AppliedStyle) -> T,
    {
        struct Restore<'a> {
            rc: &'a mut RcParams,
            saved: Option<plotstyle_rc::RcSnapshot>,
        }

        impl Drop for Restore<'_> {
            fn drop(&mut self) {
                if let Some(saved) = self.saved.take() {
                    self.rc.restore(saved);
                }
            }
        }

        let saved = rc.snapshot();
        let guard = Restore {
            rc,
            saved: Some(saved),
        };
        let applied = self.apply(&mut *guard.rc, name, options)?;
        Ok(f(&mut *guard.rc, &applied))
    }
}

/// Enables LaTeX text with `latex_preamble` and copies supported `params`.
///
/// Returns the option names that were dropped.
pub fn apply_custom<I, K, V>(rc: &mut RcParams, params: I, latex_preamble: &str) -> Vec<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut dropped = rc.update(params);
    dropped.extend(rc.update([
        ("text.usetex", "True"),
        ("text.latex.preamble", latex_preamble),
    ]));
    dropped
}
