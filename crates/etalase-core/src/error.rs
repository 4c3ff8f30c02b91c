//! Error types for Etalase operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across all Etalase crates. Uses `thiserror` for derive macros.
//!
//! The variants follow the content-site failure taxonomy:
//!
//! - [`Error::NotFound`]: a requested slug does not exist
//! - [`Error::Parse`]: a document's frontmatter is malformed
//! - [`Error::Write`]: an admin update could not be persisted
//!
//! Missing content directories are not errors at all; repositories return
//! empty collections for them. Malformed field values degrade to defaults
//! and are logged rather than raised.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Etalase operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error at {path}: {source}")]
    IoPath {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A content document could not be parsed.
    #[error("Failed to parse {file}: {message}")]
    Parse {
        /// File name of the offending document.
        file: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A content document could not be written.
    #[error("Failed to write {path}: {message}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Failure description.
        message: String,
    },

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create an I/O error from a raw `std::io::Error`.
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(err)
    }

    /// Create an I/O error that records the path involved.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoPath {
            path: path.as_ref().to_path_buf(),
            source: err,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a parse error for the named file.
    pub fn parse(file: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: msg.into(),
        }
    }

    /// Create a write failure for the given destination.
    pub fn write(path: impl AsRef<Path>, msg: impl Into<String>) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            message: msg.into(),
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// True for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True for [`Error::Parse`].
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// True when the caller supplied bad input rather than the server failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidData(_) | Self::NotFound(_))
    }
}

/// Result type alias using Etalase's Error type.
pub type Result<T> = std::result::Result<T, Error>;
