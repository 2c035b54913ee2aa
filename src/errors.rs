//! Error types for gitwizard operations.
//!
//! Two layers are used:
//!
//! - [`GitwizardError`]: typed failures of a single operation (reading one
//!   file, opening the repository, validating an argument).
//! - [`collection::AnalysisResults`]: batch results that keep going after a
//!   per-file failure and carry the failures next to the successes.
//!
//! Analyzers never abort a batch because of one bad file. Only argument
//! validation and repository access fail an operation as a whole.
//!
//! # Example
//!
//! ```rust
//! use gitwizard::errors::GitwizardError;
//!
//! let err = GitwizardError::invalid_argument("min_length", "must be at least 1");
//! assert!(matches!(err, GitwizardError::InvalidArgument { .. }));
//! assert_eq!(err.to_string(), "Invalid argument `min_length`: must be at least 1");
//! ```

pub mod collection;

pub use collection::{AnalysisFailure, AnalysisResults, OperationType};

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, GitwizardError>;

/// Main error type for gitwizard operations
#[derive(Debug, Error)]
pub enum GitwizardError {
    /// A source file could not be read or is not valid UTF-8
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Caller supplied an argument outside the accepted domain
    #[error("Invalid argument `{name}`: {message}")]
    InvalidArgument { name: String, message: String },

    /// Configuration file could not be parsed or failed validation
    #[error("Configuration error{}: {message}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Operation not offered by the active repository backend
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// libgit2 failures
    #[error(transparent)]
    Repository(#[from] git2::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GitwizardError {
    /// Create a file read error with path context
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error, optionally tied to a file
    pub fn config(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_file_read_display_includes_path() {
        let err = GitwizardError::file_read(
            "src/app.py",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to read src/app.py: permission denied"
        );
        assert!(matches!(err, GitwizardError::FileRead { .. }));
    }

    #[test]
    fn test_config_display_with_and_without_path() {
        let with_path =
            GitwizardError::config("bad value", Some(PathBuf::from(".gitwizard.toml")));
        assert_eq!(
            with_path.to_string(),
            "Configuration error in .gitwizard.toml: bad value"
        );

        let without_path = GitwizardError::config("bad value", None);
        assert_eq!(without_path.to_string(), "Configuration error: bad value");
    }

    #[test]
    fn test_io_conversion() {
        let err: GitwizardError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, GitwizardError::Io(_)));
    }
}
