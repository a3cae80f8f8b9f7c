//! WebAC enforcement for HTTP services.
//!
//! Provides:
//! - [`AuthenticatedAgent`]: identity placed in request extensions by an
//!   upstream authentication layer
//! - [`WebAcLayer`] / [`WebAcService`]: Tower middleware asking an
//!   [`Authorizer`](webac_acl::Authorizer) before forwarding each request
//! - [`EnforcementConfig`]: configuration for the layer
//! - [`EnforcementError`]: why a request was refused

mod agent;
mod error;
mod methods;
mod middleware;

use serde::{Deserialize, Serialize};

pub use agent::{
    AuthenticatedAgent, agent_from_extensions, agent_from_parts, authenticated_from_parts,
};
pub use error::EnforcementError;
pub use methods::{allow_header, allowed_methods, required_modes, target_from_uri};
pub use middleware::{WebAcLayer, WebAcService};

/// Configuration for the enforcement middleware.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnforcementConfig {
    /// Whether decisions are enforced. When false, all requests pass through.
    pub enabled: bool,
    /// Scheme and authority prepended to request paths to form resource IRIs
    /// (e.g., "https://pod.example").
    pub base_url: String,
    /// Realm advertised in `WWW-Authenticate` challenges.
    pub realm: String,
}

impl Default for EnforcementConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://localhost".to_string(),
            realm: "webac".to_string(),
        }
    }
}
