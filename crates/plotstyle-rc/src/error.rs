//! Error types for runtime configuration.

use std::io;
use std::path::PathBuf;

/// Errors raised while reading or mutating a runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum RcError {
    /// The option name is not known to the active catalog.
    #[error("'{key}' is not a recognized runtime configuration option")]
    UnsupportedOption { key: String },

    /// A stylesheet file could not be read.
    #[error("Failed to read stylesheet {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RcError {
    /// Create an unsupported-option error.
    pub fn unsupported(key: impl Into<String>) -> Self {
        Self::UnsupportedOption { key: key.into() }
    }
}
