//! Error types for webac-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for webac-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in webac-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from webac-storage
    #[error("Storage error: {0}")]
    Storage(#[from] webac_storage::Error),

    /// Access resolution failed.
    #[error("Resolution error: {0}")]
    Resolution(#[from] webac_acl::Error),

    /// Configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Creates an I/O error tagged with the path involved.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
