//! Location of the template, preamble fragments and fonts.
//!
//! All resources resolve relative to one root directory. By default that is
//! the `assets/` directory shipped with this crate:
//!
//! ```text
//! assets/
//! ├── template.mplstyle         style template with [placeholders]
//! ├── preamble/
//! │   ├── common.tex            always included
//! │   ├── presentation.tex      sans-serif replacement for presentation mode
//! │   └── fonts/
//! │       └── <font>.tex        one per font, e.g. timesnewroman.tex
//! └── fonts/                    font files
//! ```
//!
//! Font fragments are looked up by the normalized font name: lowercase with
//! all whitespace removed, so `Times New Roman` maps to `timesnewroman.tex`.
//!
//! The transient stylesheet written during application lands in the scratch
//! directory, which is the root unless overridden.
//!
//! # Deployed binaries
//!
//! [`Resources::bundled`] points at this crate's source directory as it was
//! at compile time. For a registry dependency that is inside the cargo
//! source checkout, which then also receives the transient stylesheet. A
//! binary copied to another machine has no such directory. Ship the
//! `assets/` tree alongside the binary and use [`Resources::at`], and point
//! the transient file at a writable location with
//! [`Resources::with_scratch_dir`]:
//!
//! ```rust
//! use plotstyle::{Resources, Styler};
//!
//! let scratch = std::env::temp_dir();
//! let styler = Styler::new().resources(Resources::bundled().with_scratch_dir(&scratch));
//! assert_eq!(styler.get_resources().transient_path(), scratch.join("temporary.mplstyle"));
//! ```

use std::io;
use std::path::{Path, PathBuf};

use crate::error::StyleError;

pub const TEMPLATE_FILE: &str = "template.mplstyle";
pub const TRANSIENT_FILE: &str = "temporary.mplstyle";
const PREAMBLE_DIR: &str = "preamble";
const FONT_FRAGMENT_DIR: &str = "fonts";
const COMMON_FRAGMENT: &str = "common.tex";
const PRESENTATION_FRAGMENT: &str = "presentation.tex";
const FONTS_DIR: &str = "fonts";

/// Normalizes a font name into its fragment file stem.
pub fn normalize_font_name(font: &str) -> String {
    font.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolves resource files under a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    root: PathBuf,
    scratch: Option<PathBuf>,
}

impl Default for Resources {
    fn default() -> Self {
        Self::bundled()
    }
}

impl Resources {
    /// The resources shipped with this crate.
    ///
    /// The path is fixed when this crate is compiled; see the module docs
    /// for deployed binaries.
    pub fn bundled() -> Self {
        Self::at(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
    }

    /// Resources rooted at `root`.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scratch: None,
        }
    }

    /// Writes the transient stylesheet under `dir` instead of the root.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch = Some(dir.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn font_directory(&self) -> PathBuf {
        self.root.join(FONTS_DIR)
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.as_deref().unwrap_or(&self.root)
    }

    /// Fixed path of the transient stylesheet.
    pub fn transient_path(&self) -> PathBuf {
        self.scratch_dir().join(TRANSIENT_FILE)
    }

    pub fn template_path(&self) -> PathBuf {
        self.root.join(TEMPLATE_FILE)
    }

    pub fn font_fragment_path(&self, font: &str) -> PathBuf {
        self.root
            .join(PREAMBLE_DIR)
            .join(FONT_FRAGMENT_DIR)
            .join(format!("{}.tex", normalize_font_name(font)))
    }

    /// Raw style template text.
    pub fn template(&self) -> Result<String, StyleError> {
        read_resource(&self.template_path())
    }

    pub fn common_preamble(&self) -> Result<String, StyleError> {
        read_resource(&self.root.join(PREAMBLE_DIR).join(COMMON_FRAGMENT))
    }

    pub fn presentation_preamble(&self) -> Result<String, StyleError> {
        read_resource(&self.root.join(PREAMBLE_DIR).join(PRESENTATION_FRAGMENT))
    }

    /// Preamble fragment for `font`.
    ///
    /// # Errors
    ///
    /// [`StyleError::FontFragmentNotFound`] naming the font if no fragment exists.
    pub fn font_preamble(&self, font: &str) -> Result<String, StyleError> {
        let path = self.font_fragment_path(font);
        match read_resource(&path) {
            Err(StyleError::ResourceNotFound { path }) => Err(StyleError::FontFragmentNotFound {
                font: font.to_string(),
                path,
            }),
            other => other,
        }
    }
}

fn read_resource(path: &Path) -> Result<String, StyleError> {
    log::debug!("Reading resource {}", path.display());
    std::fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => StyleError::ResourceNotFound {
            path: path.to_path_buf(),
        },
        _ => StyleError::Io(err),
    })
}
