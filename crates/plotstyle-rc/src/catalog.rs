//! The set of runtime options a plotting library version understands.
//!
//! A [`Catalog`] maps every recognized option name to its default value, in
//! the same textual form a matplotlibrc file would use. [`RcParams`] is always
//! bound to a catalog: options outside it are rejected by
//! [`RcParams::set`](crate::RcParams::set) and silently dropped by the bulk
//! update paths.
//!
//! [`Catalog::standard`] describes the library version this crate targets.
//! Custom catalogs are useful to emulate older or newer library versions:
//!
//! ```rust
//! use plotstyle_rc::Catalog;
//!
//! let old = Catalog::from_pairs([("font.size", "10.0"), ("backend", "agg")]);
//! assert!(old.supports("font.size"));
//! assert!(!old.supports("figure.labelsize"));
//! ```
//!
//! [`RcParams`]: crate::RcParams

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

/// Default values for the standard catalog.
const STANDARD_DEFAULTS: &[(&str, &str)] = &[
    ("backend", "agg"),
    ("interactive", "False"),
    ("timezone", "UTC"),
    ("toolbar", "toolbar2"),
    ("date.epoch", "1970-01-01T00:00:00"),
    ("webagg.port", "8988"),
    ("webagg.open_in_browser", "True"),
    // lines & patches
    ("lines.linewidth", "1.5"),
    ("lines.markeredgewidth", "1.0"),
    ("lines.markersize", "6.0"),
    ("patch.linewidth", "1.0"),
    ("hatch.linewidth", "1.0"),
    // boxplots
    ("boxplot.whiskers", "1.5"),
    ("boxplot.flierprops.linewidth", "1.0"),
    ("boxplot.boxprops.linewidth", "1.0"),
    ("boxplot.whiskerprops.linewidth", "1.0"),
    ("boxplot.capprops.linewidth", "1.0"),
    ("boxplot.medianprops.linewidth", "1.0"),
    ("boxplot.meanprops.linewidth", "1.0"),
    // fonts & text
    ("font.family", "sans-serif"),
    ("font.size", "10.0"),
    (
        "font.serif",
        "DejaVu Serif, Bitstream Vera Serif, Computer Modern Roman, Times New Roman, serif",
    ),
    (
        "font.sans-serif",
        "DejaVu Sans, Bitstream Vera Sans, Computer Modern Sans Serif, Helvetica, sans-serif",
    ),
    ("text.usetex", "False"),
    ("text.latex.preamble", ""),
    ("mathtext.fontset", "dejavusans"),
    // pgf
    ("pgf.preamble", ""),
    ("pgf.rcfonts", "True"),
    ("pgf.texsystem", "xelatex"),
    // axes
    ("axes.linewidth", "0.8"),
    ("axes.edgecolor", "black"),
    ("axes.titlesize", "large"),
    ("axes.labelsize", "medium"),
    (
        "axes.prop_cycle",
        "cycler('color', ['1f77b4', 'ff7f0e', '2ca02c', 'd62728', '9467bd', '8c564b', 'e377c2', '7f7f7f', 'bcbd22', '17becf'])",
    ),
    ("grid.linewidth", "0.8"),
    // ticks
    ("xtick.major.width", "0.8"),
    ("xtick.minor.width", "0.6"),
    ("ytick.major.width", "0.8"),
    ("ytick.minor.width", "0.6"),
    ("xtick.labelsize", "medium"),
    ("ytick.labelsize", "medium"),
    ("xtick.minor.visible", "False"),
    ("ytick.minor.visible", "False"),
    // legend
    ("legend.fontsize", "medium"),
    ("legend.fancybox", "True"),
    ("legend.edgecolor", "0.8"),
    ("legend.framealpha", "0.8"),
    // figure
    ("figure.figsize", "6.4, 4.8"),
    ("figure.dpi", "100.0"),
    ("figure.titlesize", "large"),
    ("figure.labelsize", "large"),
    ("figure.constrained_layout.use", "False"),
    ("figure.max_open_warning", "20"),
    ("figure.raise_window", "True"),
    // output
    ("image.cmap", "viridis"),
    ("savefig.dpi", "figure"),
    ("savefig.directory", "~"),
    ("pdf.fonttype", "3"),
    ("ps.fonttype", "3"),
];

static STANDARD: Lazy<Arc<Catalog>> =
    Lazy::new(|| Arc::new(Catalog::from_pairs(STANDARD_DEFAULTS.iter().copied())));

/// Recognized runtime option names and their default values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    defaults: BTreeMap<String, String>,
}

impl Catalog {
    /// Returns the shared catalog for the targeted library version.
    pub fn standard() -> Arc<Catalog> {
        Arc::clone(&STANDARD)
    }

    /// Builds a catalog from `(option, default)` pairs.
    ///
    /// Later pairs overwrite earlier ones with the same option name.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            defaults: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Whether `key` is a recognized option.
    pub fn supports(&self, key: &str) -> bool {
        self.defaults.contains_key(key)
    }

    /// The default value of `key`, if recognized.
    pub fn default_value(&self, key: &str) -> Option<&str> {
        self.defaults.get(key).map(String::as_str)
    }

    /// Recognized option names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.defaults.keys().map(String::as_str)
    }

    /// Number of recognized options.
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// Whether the catalog recognizes nothing at all.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    pub(crate) fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }
}
