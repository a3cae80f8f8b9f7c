//! Requesting agent identity and extraction helpers.

use webac_core::AgentRef;

/// An authenticated agent, identified by WebID.
///
/// Stored in HTTP request extensions by whatever layer performs
/// authentication. Requests without one are treated as anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAgent {
    /// The agent's WebID.
    pub web_id: String,
}

impl AuthenticatedAgent {
    /// Create an authenticated agent.
    pub fn new(web_id: impl Into<String>) -> Self {
        Self {
            web_id: web_id.into(),
        }
    }

    /// The agent as seen by the authorizer.
    pub fn agent(&self) -> AgentRef {
        AgentRef::web_id(self.web_id.as_str())
    }
}

/// Extract the `AuthenticatedAgent` from HTTP request `Parts`, if present.
pub fn authenticated_from_parts(parts: &http::request::Parts) -> Option<&AuthenticatedAgent> {
    parts.extensions.get::<AuthenticatedAgent>()
}

/// The requesting agent from HTTP request `Parts`.
///
/// Returns [`AgentRef::Anonymous`] if no authenticated agent is present.
pub fn agent_from_parts(parts: &http::request::Parts) -> AgentRef {
    agent_from_extensions(&parts.extensions)
}

/// The requesting agent from request extensions.
pub fn agent_from_extensions(extensions: &http::Extensions) -> AgentRef {
    extensions
        .get::<AuthenticatedAgent>()
        .map(AuthenticatedAgent::agent)
        .unwrap_or(AgentRef::Anonymous)
}
