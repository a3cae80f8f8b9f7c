//! Containment hierarchy walk.
//!
//! Starting at a resource, look for its ACL (`R?ext=acl`). If the ACL is
//! missing or holds no well-formed authorization, ascend to the parent
//! container and try again, until an ACL is found or the partition root has
//! been examined. The ascent is strictly sequential: each step depends on
//! the previous container lookup, and the walk stops at the ACL closest to
//! the target.

use webac_core::{ResourceAccessor, ResourceRef};

use crate::authorization::Authorization;
use crate::error::{Error, Result};
use crate::parser::parse_authorizations;

/// Default bound on the number of containers ascended.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// The ACL that governs a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct GoverningAcl {
    /// Identifier of the ACL resource.
    pub acl: ResourceRef,
    /// The resource the ACL is attached to.
    pub owner: ResourceRef,
    /// Containers ascended before the ACL was found (0 = the target's own ACL).
    pub depth: usize,
    /// Well-formed authorizations parsed from the ACL.
    pub authorizations: Vec<Authorization>,
}

impl GoverningAcl {
    /// Returns `true` if the ACL belongs to an ancestor of the target.
    pub fn is_inherited(&self) -> bool {
        self.depth > 0
    }
}

/// Result of a hierarchy walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    /// The nearest governing ACL, `None` if no ACL exists up to the root.
    pub governing: Option<GoverningAcl>,
    /// Every resource whose ACL was examined, nearest first.
    pub visited: Vec<ResourceRef>,
}

/// Locates the ACL governing a resource.
#[derive(Debug)]
pub struct HierarchyWalker<'a, A: ?Sized> {
    accessor: &'a A,
    partition_root: Option<&'a ResourceRef>,
    max_depth: usize,
}

impl<'a, A: ResourceAccessor + ?Sized> HierarchyWalker<'a, A> {
    /// Create a walker over an accessor with the default depth bound.
    pub fn new(accessor: &'a A) -> Self {
        Self {
            accessor,
            partition_root: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Stop the walk at this resource; nothing above it is examined.
    pub fn with_partition_root(mut self, root: Option<&'a ResourceRef>) -> Self {
        self.partition_root = root;
        self
    }

    /// Set the maximum number of containers ascended.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Find the ACL governing `target`.
    ///
    /// `target` must be an ordinary resource; callers asking about an ACL
    /// resource pass the resource it governs.
    ///
    /// # Errors
    ///
    /// - [`Error::ResolutionFailure`] if any lookup fails.
    /// - [`Error::CycleGuardTripped`] if the ascent exceeds the depth bound.
    pub async fn find_governing_acl(&self, target: &ResourceRef) -> Result<Walk> {
        let mut current = target.clone();
        let mut depth = 0;
        let mut visited = Vec::new();

        loop {
            visited.push(current.clone());

            let acl = current.acl();
            let snapshot = self
                .accessor
                .get_resource(&acl)
                .await
                .map_err(|e| Error::resolution(&acl, e))?;

            if let Some(snapshot) = snapshot {
                let authorizations = parse_authorizations(&snapshot.triples);
                if !authorizations.is_empty() {
                    log::debug!(
                        "ACL for {target} found at {acl} (depth {depth}, {} authorizations)",
                        authorizations.len()
                    );
                    return Ok(Walk {
                        governing: Some(GoverningAcl {
                            acl,
                            owner: current,
                            depth,
                            authorizations,
                        }),
                        visited,
                    });
                }
                log::debug!("Ignoring {acl}: no well-formed authorizations");
            }

            if self.partition_root == Some(&current) {
                break;
            }
            let Some(parent) = self.accessor.get_container(&current) else {
                break;
            };

            depth += 1;
            if depth > self.max_depth {
                log::warn!(
                    "Hierarchy walk from {target} exceeded {} levels; possible containment cycle",
                    self.max_depth
                );
                return Err(Error::CycleGuardTripped {
                    depth: self.max_depth,
                });
            }
            current = parent;
        }

        log::debug!("No ACL governs {target}");
        Ok(Walk {
            governing: None,
            visited,
        })
    }
}
