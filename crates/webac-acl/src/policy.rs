//! Authorizer configuration and the fallback policy.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use webac_core::{AgentRef, ResourceRef};

use crate::authorization::ModeSet;
use crate::hierarchy::DEFAULT_MAX_DEPTH;

/// What to grant when no ACL exists anywhere up to the partition root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefaultPolicy {
    /// Nobody gets any access.
    #[default]
    DenyAll,
    /// Everybody, including the anonymous agent, gets every mode.
    GrantAll,
    /// The listed agents get every mode; everybody else gets nothing.
    AdministratorsOnly {
        /// Agents with full access to unprotected resources.
        #[serde(default)]
        administrators: BTreeSet<AgentRef>,
    },
}

impl DefaultPolicy {
    /// The modes this policy grants to `agent`.
    pub fn modes_for(&self, agent: &AgentRef) -> ModeSet {
        match self {
            DefaultPolicy::DenyAll => ModeSet::EMPTY,
            DefaultPolicy::GrantAll => ModeSet::ALL,
            DefaultPolicy::AdministratorsOnly { administrators } => {
                if administrators.contains(agent) {
                    ModeSet::ALL
                } else {
                    ModeSet::EMPTY
                }
            }
        }
    }
}

/// Configuration for an [`Authorizer`](crate::Authorizer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizerConfig {
    /// Upper boundary of the hierarchy walk. `None` walks until the accessor
    /// reports no parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_root: Option<ResourceRef>,

    /// Maximum number of containers ascended before failing closed.
    pub max_depth: usize,

    /// Whether resolved modes are cached between calls.
    pub cache_enabled: bool,

    /// Applied when no ACL governs a resource.
    pub default_policy: DefaultPolicy,
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        Self {
            partition_root: None,
            max_depth: DEFAULT_MAX_DEPTH,
            cache_enabled: true,
            default_policy: DefaultPolicy::default(),
        }
    }
}

impl AuthorizerConfig {
    /// Set the partition root.
    pub fn with_partition_root(mut self, root: impl Into<ResourceRef>) -> Self {
        self.partition_root = Some(root.into());
        self
    }

    /// Set the default policy.
    pub fn with_default_policy(mut self, policy: DefaultPolicy) -> Self {
        self.default_policy = policy;
        self
    }

    /// Set the depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable the decision cache.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }
}
