//! Error types for webac-core

use thiserror::Error;

/// Result type alias for webac-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in webac-core
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A term could not be parsed from its compact text form.
    #[error("Invalid RDF term: {0:?}")]
    InvalidTerm(String),

    /// The resource service failed to answer a lookup.
    #[error("Resource service unavailable for {resource}: {message}")]
    Unavailable {
        /// Resource being looked up
        resource: String,
        /// What went wrong
        message: String,
    },

    /// A lookup did not complete in time.
    #[error("Lookup of {resource} timed out after {millis}ms")]
    Timeout {
        /// Resource being looked up
        resource: String,
        /// Elapsed budget in milliseconds
        millis: u64,
    },
}

impl Error {
    /// Creates a new unavailable error for a resource.
    pub fn unavailable<R, M>(resource: R, message: M) -> Self
    where
        R: Into<String>,
        M: Into<String>,
    {
        Error::Unavailable {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// The resource the failed lookup targeted, if any.
    pub fn resource(&self) -> Option<&str> {
        match self {
            Error::InvalidTerm(_) => None,
            Error::Unavailable { resource, .. } | Error::Timeout { resource, .. } => {
                Some(resource)
            }
        }
    }
}
