//! Error types for the local2cdn library.
//!
//! This module provides the error hierarchy for configuration loading,
//! rule compilation and document processing, using `thiserror` for
//! ergonomic error handling.
//!
//! Only configuration problems are fatal for a run. Per-entry and per-file
//! problems are reported as warnings by the compiler and the run driver
//! instead of surfacing here.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a local2cdn error.
///
/// # Examples
///
/// ```
/// use local2cdn::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("http://cdn.example.com/app.js".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the local2cdn library.
#[derive(Debug, Error)]
pub enum Error {
    /// The `maps` option is missing or has an unusable shape.
    #[error("invalid maps: {reason}")]
    InvalidMaps {
        /// Why the maps option was rejected.
        reason: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A resource kind name was not recognized.
    #[error("unknown resource kind '{value}' (expected js, css or image)")]
    UnknownKind {
        /// The unrecognized value.
        value: String,
    },
}

impl Error {
    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use local2cdn::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::PathNotFound { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if error is a configuration problem that must abort the run.
    ///
    /// # Examples
    ///
    /// ```
    /// use local2cdn::Error;
    ///
    /// let err = Error::InvalidMaps { reason: "maps is required".into() };
    /// assert!(err.is_configuration());
    /// ```
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidMaps { .. } | Self::Configuration(_) | Self::Validation { .. }
        )
    }
}
