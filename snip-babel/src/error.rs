//! Error types for snippet conversion

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a conversion run.
///
/// Recoverable conditions (skipped entries, non-strict duplicates) are not
/// errors; they are reported through [`crate::diagnostics::Diagnostics`].
#[derive(Error, Debug)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    /// The format exists but cannot perform the requested direction
    #[error("{0}")]
    NotSupported(String),

    /// No reader could be chosen for the input file
    #[error("Unsupported input '{}': unknown snippet file type", .0.display())]
    UnsupportedInput(PathBuf),

    /// Source content could not be interpreted as its format
    #[error("Could not parse '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Source content failed the well-formedness check
    #[error("Invalid {kind} file '{}'", path.display())]
    Validation { path: PathBuf, kind: &'static str },

    /// A trigger appeared twice while strict uniqueness is on
    #[error("Duplicate trigger '{title}' in '{}'. Triggers must be unique.", path.display())]
    DuplicateTrigger { title: String, path: PathBuf },

    /// Neither the source nor the configuration named a scope
    #[error("No scope found in '{}' and no scope override configured", .0.display())]
    MissingScope(PathBuf),

    /// Error during serialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Filesystem error while reading or writing
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FormatError {
    pub fn parse(path: &Path, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
