//! Authorization applicability.

use std::collections::BTreeSet;

use webac_core::{AgentRef, ResourceRef};

use crate::authorization::{AgentClass, Authorization};

/// Decide whether `auth` applies to `agent` acting on `target`.
///
/// `inherited` is `true` when the ACL holding `auth` was found on an
/// ancestor of `target` rather than on `target` itself.
pub fn matches(
    auth: &Authorization,
    agent: &AgentRef,
    target: &ResourceRef,
    inherited: bool,
) -> bool {
    matches_with_groups(auth, agent, &BTreeSet::new(), target, inherited)
}

/// Like [`matches`], also honouring the groups `agent` is a member of.
pub fn matches_with_groups(
    auth: &Authorization,
    agent: &AgentRef,
    groups: &BTreeSet<ResourceRef>,
    target: &ResourceRef,
    inherited: bool,
) -> bool {
    in_scope(auth, target, inherited) && grants_agent(auth, agent, groups)
}

/// Scope check: direct `acl:accessTo`, or an inheritable grant reached
/// through at least one container boundary.
pub fn in_scope(auth: &Authorization, target: &ResourceRef, inherited: bool) -> bool {
    auth.access_to.contains(target) || (inherited && auth.inheritable)
}

fn grants_agent(auth: &Authorization, agent: &AgentRef, groups: &BTreeSet<ResourceRef>) -> bool {
    auth.agents.contains(agent)
        || auth.agent_classes.contains(&AgentClass::Public)
        || (auth.agent_classes.contains(&AgentClass::AuthenticatedAgent) && !agent.is_anonymous())
        || !auth.agent_groups.is_disjoint(groups)
}
