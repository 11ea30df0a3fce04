//! Error types for the cfgtree library.
//!
//! This module provides the error hierarchy for loading, parsing, merging
//! and option handling, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a cfgtree error.
///
/// # Examples
///
/// ```
/// use cfgtree::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the cfgtree library.
///
/// A missing configuration file is never an error: loaders report it as an
/// absent value instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration file exists but its contents could not be parsed.
    ///
    /// The display form is the parser diagnostic followed by the offending
    /// file, e.g. `expected value at line 1 column 1; in file "/etc/app/db.json"`.
    #[error("{message}; in file \"{}\"", path.display())]
    Parse {
        /// The parser diagnostic.
        message: String,
        /// Resolved absolute path of the file.
        path: PathBuf,
    },

    /// A file or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The traversal root is missing or not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// Directory traversal failed.
    #[error("traversal error: {0}")]
    Traversal(#[from] walkdir::Error),

    /// A format tag that no parser handles.
    #[error("unknown format '{tag}' (expected one of: json, yaml, yml)")]
    UnknownFormat {
        /// The unrecognized tag.
        tag: String,
    },

    /// An option failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The option that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An options file could not be parsed.
    #[error("invalid options file {}: {source}", path.display())]
    OptionsFile {
        /// Path of the options file.
        path: PathBuf,
        /// The YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A value could not be serialized for output.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Check if error was caused by malformed file contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgtree::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::Parse {
    ///     message: "expected value".to_string(),
    ///     path: PathBuf::from("/conf/app.json"),
    /// };
    /// assert!(err.is_parse_error());
    /// ```
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Check if error comes from the options layer rather than from loading.
    #[must_use]
    pub fn is_options_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::OptionsFile { .. } | Self::UnknownFormat { .. }
        )
    }
}
