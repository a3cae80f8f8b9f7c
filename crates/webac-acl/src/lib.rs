//! WebAC authorization resolution.
//!
//! Given an agent, a target resource and a set of requested access modes,
//! decide whether access is granted. The pipeline:
//!
//! - [`HierarchyWalker`]: locate the ACL governing the target, ascending the
//!   containment hierarchy when the target has none of its own
//! - [`parse_authorizations`]: turn the ACL graph into [`Authorization`]s
//! - [`matches`] / [`matches_with_groups`]: decide whether an authorization
//!   applies to the agent and target
//! - [`effective_modes`]: union the modes of every applicable authorization
//! - [`Authorizer`]: the decision API composing the above, with a
//!   [`DecisionCache`] invalidated by ACL change notifications
//!
//! Every failure on the decision path denies access.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod authorization;
pub mod cache;
pub mod decision;
pub mod error;
pub mod hierarchy;
pub mod matcher;
pub mod parser;
pub mod policy;
pub mod resolver;

pub use authorization::{AgentClass, Authorization, Mode, ModeSet};
pub use cache::{CacheKey, CachedResolution, DecisionCache};
pub use decision::{AclOutcome, Authorizer, Decision, Resolution};
pub use error::{Error, Result};
pub use hierarchy::{GoverningAcl, HierarchyWalker, Walk, DEFAULT_MAX_DEPTH};
pub use matcher::{in_scope, matches, matches_with_groups};
pub use parser::parse_authorizations;
pub use policy::{AuthorizerConfig, DefaultPolicy};
pub use resolver::effective_modes;
