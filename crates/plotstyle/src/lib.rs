//! # plotstyle - Journal Styles for Plotting Runtimes
//!
//! `plotstyle` configures a matplotlib-like runtime so figures match the
//! typography and dimensions of a journal or document class: font, font size,
//! line widths, figure widths, and a LaTeX preamble that loads the right font
//! packages.
//!
//! ## Core Concepts
//!
//! - [`StyleRecord`]: one venue's typographic and geometric parameters
//! - [`StyleRegistry`]: ordered lookup of records by key, built in or from YAML
//! - [`PreambleBuilder`]: assembles the single-line LaTeX preamble
//! - [`Template`]: the stylesheet template with `[placeholder]` tokens
//! - [`Styler`]: renders a style and applies it to an [`RcParams`]
//! - [`runtime`]: the process-wide configuration and its convenience functions
//!
//! ## Quick Start
//!
//! ```rust
//! use plotstyle::{list_available_styles, StyleOptions, Styler};
//! use plotstyle_rc::RcParams;
//!
//! assert!(list_available_styles().contains(&"AGU".to_string()));
//!
//! let mut rc = RcParams::defaults();
//! let options = StyleOptions::new().silent(true).dictionary();
//! let applied = Styler::new().apply(&mut rc, "AGU", &options).unwrap();
//!
//! assert_eq!(rc.get_pair("figure.figsize"), Some((5.6, 3.461)));
//! assert_eq!(applied.linewidth().to_string(), "0.5");
//! ```
//!
//! ## Presentation Mode
//!
//! Presentation mode swaps the style's serif font for a sans-serif slide font
//! and switches to a LaTeX-capable backend, keeping the venue's sizes:
//!
//! ```rust
//! use plotstyle::{StyleOptions, Styler};
//! use plotstyle_rc::RcParams;
//!
//! let mut rc = RcParams::defaults();
//! let options = StyleOptions::new().presentation(true).silent(true).dictionary();
//! Styler::new().apply(&mut rc, "MNRAS", &options).unwrap();
//!
//! assert_eq!(rc.get("font.family"), Some("sans-serif"));
//! assert_eq!(rc.backend(), "pgf");
//! ```
//!
//! Styles stack: applying one style after another leaves options the second
//! does not mention at the first style's values. Use
//! [`StyleOptions::reset_first`] or [`reset_defaults`] to start clean.

pub mod apply;
pub mod colors;
mod error;
pub mod preamble;
pub mod record;
pub mod registry;
pub mod resources;
pub mod runtime;
mod summary;
pub mod template;
pub mod transient;

use std::path::PathBuf;

pub use apply::{
    apply_custom, AppliedStyle, RenderedStyle, StyleOptions, Styler, Strategy,
    PRESENTATION_BACKEND, PRESENTATION_FONT,
};
pub use colors::{Palette, ACCENT_COLORS, STANDARD_COLORS};
pub use error::StyleError;
pub use preamble::{FontPackage, PreambleBuilder};
pub use record::{FigureSize, FigureWidths, Scalar, StyleRecord};
pub use registry::StyleRegistry;
pub use resources::Resources;
pub use runtime::{apply_custom_style, apply_style, reset_defaults, style_context};
pub use template::{Placeholder, Replacements, Template, TemplateError};
pub use transient::{with_transient_stylesheet, TransientStylesheet};

pub use plotstyle_rc::{RcParams, StyleSheet};

/// Keys of the built-in styles, in registration order.
pub fn list_available_styles() -> Vec<String> {
    StyleRegistry::builtin().keys()
}

/// The directory holding the bundled font files.
pub fn get_font_directory() -> PathBuf {
    Resources::bundled().font_directory()
}
