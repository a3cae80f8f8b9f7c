//! Enforcement error types.

use http::{Method, StatusCode};
use webac_core::{AgentRef, ResourceRef};

/// Why a request was refused.
#[derive(Debug, thiserror::Error)]
pub enum EnforcementError {
    /// An anonymous request lacked the required modes.
    #[error("authentication required to access {target}")]
    Unauthenticated {
        /// Requested resource
        target: ResourceRef,
    },

    /// An authenticated agent lacked the required modes.
    #[error("{agent} may not access {target}")]
    Forbidden {
        /// Requesting agent
        agent: AgentRef,
        /// Requested resource
        target: ResourceRef,
    },

    /// The method has no WebAC mode.
    #[error("method {0} is not supported")]
    MethodNotAllowed(Method),
}

impl EnforcementError {
    /// HTTP status for this refusal.
    pub fn status(&self) -> StatusCode {
        match self {
            EnforcementError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            EnforcementError::Forbidden { .. } => StatusCode::FORBIDDEN,
            EnforcementError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Error category reported in response bodies.
    pub fn category(&self) -> &'static str {
        match self {
            EnforcementError::Unauthenticated { .. } => "authentication",
            EnforcementError::Forbidden { .. } => "authorization",
            EnforcementError::MethodNotAllowed(_) => "request",
        }
    }
}
