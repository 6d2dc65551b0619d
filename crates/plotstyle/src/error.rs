//! Error types for style lookup, rendering and application.

use std::io;
use std::path::PathBuf;

use plotstyle_rc::RcError;

use crate::template::TemplateError;

/// Errors raised while resolving, rendering or applying a style.
///
/// Every variant is a deterministic user error or an environment problem;
/// none of them is worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// The requested style key is not registered.
    #[error("Unknown style '{key}'. Available styles are: {}", .available.join(", "))]
    UnknownStyle { key: String, available: Vec<String> },

    /// No preamble fragment exists for the selected font.
    #[error("No preamble fragment for font '{font}' (expected {})", .path.display())]
    FontFragmentNotFound { font: String, path: PathBuf },

    /// A bundled resource file is missing.
    #[error("Resource not found: {}", .path.display())]
    ResourceNotFound { path: PathBuf },

    /// A style definition could not be parsed or failed validation.
    #[error("Invalid style definition: {0}")]
    Definition(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Rc(#[from] RcError),

    /// The human-readable summary could not be rendered.
    #[error("Failed to render style summary: {0}")]
    Summary(#[from] minijinja::Error),

    /// Writing or removing the transient stylesheet failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl StyleError {
    /// Create a definition error.
    pub fn definition(msg: impl Into<String>) -> Self {
        Self::Definition(msg.into())
    }
}

impl From<serde_yaml::Error> for StyleError {
    fn from(err: serde_yaml::Error) -> Self {
        StyleError::Definition(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_style_lists_available() {
        let err = StyleError::UnknownStyle {
            key: "Nature".to_string(),
            available: vec!["AGU".to_string(), "MNRAS".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'Nature'"));
        assert!(msg.contains("AGU, MNRAS"));
    }

    #[test]
    fn test_font_fragment_names_font() {
        let err = StyleError::FontFragmentNotFound {
            font: "Comic Sans".to_string(),
            path: PathBuf::from("preamble/fonts/comicsans.tex"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Comic Sans"));
        assert!(msg.contains("comicsans.tex"));
    }

    #[test]
    fn test_io_is_transparent() {
        let err: StyleError = io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into();
        assert_eq!(err.to_string(), "read-only");
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<u32>("not a number").unwrap_err();
        let err: StyleError = yaml_err.into();
        assert!(matches!(err, StyleError::Definition(_)));
    }
}
