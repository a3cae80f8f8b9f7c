//! Error types for webac-storage

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for webac-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in webac-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from webac-core
    #[error("Core error: {0}")]
    Core(#[from] webac_core::Error),

    /// A dataset file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A TOML dataset failed to parse.
    #[error("Invalid TOML dataset: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON dataset failed to parse.
    #[error("Invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset file extension is neither `.toml` nor `.json`.
    #[error("Unsupported dataset format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The same resource is described twice.
    #[error("Resource {0} is defined more than once")]
    DuplicateResource(String),
}

impl Error {
    /// Creates an I/O error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
