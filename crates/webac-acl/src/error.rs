//! Error types for webac-acl

use thiserror::Error;
use webac_core::{ResourceRef, Term};

/// Result type alias for webac-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving access.
///
/// None of these cross the [`Authorizer::authorize`](crate::Authorizer::authorize)
/// boundary: every variant collapses into a denial there.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An `acl:Authorization` lacked modes or agents.
    ///
    /// Produced and dropped inside the parser; never surfaced to callers.
    #[error("Malformed authorization {subject}: {reason}")]
    MalformedAuthorization {
        /// Subject of the offending authorization
        subject: Term,
        /// What is missing
        reason: &'static str,
    },

    /// The resource service failed or timed out during a lookup.
    #[error("Resolution failed at {resource}: {source}")]
    ResolutionFailure {
        /// Resource being looked up when the failure happened
        resource: ResourceRef,
        /// Underlying accessor error
        #[source]
        source: webac_core::Error,
    },

    /// The hierarchy walk exceeded its depth bound.
    #[error("Hierarchy walk exceeded maximum depth of {depth}")]
    CycleGuardTripped {
        /// The configured bound
        depth: usize,
    },
}

impl Error {
    /// Creates a resolution failure for a lookup of `resource`.
    pub fn resolution(resource: &ResourceRef, source: webac_core::Error) -> Self {
        Error::ResolutionFailure {
            resource: resource.clone(),
            source,
        }
    }

    /// Returns whether the failure came from the resource service rather
    /// than the walk itself.
    pub fn is_accessor_failure(&self) -> bool {
        matches!(self, Error::ResolutionFailure { .. })
    }
}
