//! Effective mode computation.

use std::collections::BTreeSet;

use webac_core::{AgentRef, ResourceRef};

use crate::authorization::{Authorization, ModeSet};
use crate::matcher::matches_with_groups;

/// Union the modes of every authorization that applies to `agent` on `target`.
///
/// When `is_acl_resource` is set the result is restricted to
/// [`Mode::Control`](crate::Mode::Control): only Control grants reach an ACL
/// resource. There is no deny rule; grants are purely additive.
pub fn effective_modes(
    authorizations: &[Authorization],
    agent: &AgentRef,
    groups: &BTreeSet<ResourceRef>,
    target: &ResourceRef,
    inherited: bool,
    is_acl_resource: bool,
) -> ModeSet {
    let modes = authorizations
        .iter()
        .filter(|auth| matches_with_groups(auth, agent, groups, target, inherited))
        .fold(ModeSet::EMPTY, |acc, auth| acc.union(auth.modes));

    if is_acl_resource {
        modes.intersection(ModeSet::CONTROL)
    } else {
        modes
    }
}
