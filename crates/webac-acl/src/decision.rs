//! The authorization decision API.
//!
//! [`Authorizer`] is the single entry point used by the HTTP enforcement
//! layer. It composes the hierarchy walk, ACL parsing, agent matching and
//! mode resolution into one non-blocking pipeline, and owns the only cache.
//!
//! # Failure semantics
//!
//! [`Authorizer::authorize`] never returns an error: any failure while
//! resolving (accessor outage, timeout, cycle guard) produces
//! [`Decision::Denied`]. Callers that need the reason use
//! [`Authorizer::try_effective_modes`].
//!
//! # Example
//!
//! ```rust,ignore
//! use webac_acl::{Authorizer, AuthorizerConfig, Mode, ModeSet};
//!
//! let authorizer = Authorizer::new(store, AuthorizerConfig::default());
//! let decision = authorizer
//!     .authorize(&agent, &target, ModeSet::from(Mode::Read))
//!     .await;
//! if decision.is_granted() {
//!     // serve the request
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use futures::future::try_join_all;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use webac_core::vocab::vcard;
use webac_core::{AclChanged, AgentRef, ResourceAccessor, ResourceRef, ResourceSnapshot, Term};

use crate::authorization::{Authorization, ModeSet};
use crate::cache::{CacheKey, CachedResolution, DecisionCache};
use crate::error::{Error, Result};
use crate::hierarchy::HierarchyWalker;
use crate::matcher::in_scope;
use crate::policy::AuthorizerConfig;
use crate::resolver::effective_modes;

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Every requested mode is held.
    Granted,
    /// At least one requested mode is missing, or resolution failed.
    Denied,
}

impl Decision {
    /// Returns `true` for [`Decision::Granted`].
    pub fn is_granted(self) -> bool {
        matches!(self, Decision::Granted)
    }

    /// Decide a request for `requested` on `target` given the `effective`
    /// modes already resolved for the agent.
    ///
    /// An empty request is always denied. Any request on an ACL resource
    /// requires [`Mode::Control`](crate::Mode::Control).
    pub fn evaluate(target: &ResourceRef, requested: ModeSet, effective: ModeSet) -> Self {
        if requested.is_empty() {
            return Decision::Denied;
        }
        let required = if target.is_acl() {
            ModeSet::CONTROL
        } else {
            requested
        };
        if required.is_subset(effective) {
            Decision::Granted
        } else {
            Decision::Denied
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Granted => write!(f, "granted"),
            Decision::Denied => write!(f, "denied"),
        }
    }
}

/// Where the effective modes came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AclOutcome {
    /// An ACL governs the target.
    Governed {
        /// The governing ACL resource.
        acl: ResourceRef,
        /// Containers ascended to reach it.
        depth: usize,
    },
    /// No ACL exists up to the partition root; the default policy applied.
    NoApplicableAcl,
}

/// Effective modes for one agent on one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Modes the agent holds.
    pub modes: ModeSet,
    /// How they were determined.
    pub outcome: AclOutcome,
}

/// WebAC decision API over a resource accessor.
pub struct Authorizer<A> {
    accessor: A,
    config: AuthorizerConfig,
    cache: Arc<DecisionCache>,
}

impl<A: ResourceAccessor> Authorizer<A> {
    /// Create an authorizer.
    pub fn new(accessor: A, config: AuthorizerConfig) -> Self {
        Self {
            accessor,
            config,
            cache: Arc::new(DecisionCache::new()),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &AuthorizerConfig {
        &self.config
    }

    /// The underlying accessor.
    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// The resolution cache.
    pub fn cache(&self) -> &DecisionCache {
        &self.cache
    }

    /// Decide whether `agent` holds every mode in `requested` on `target`.
    ///
    /// Any access to an ACL resource (`R?ext=acl`) requires
    /// [`Mode::Control`](crate::Mode::Control), whatever was requested.
    /// An empty `requested` set is denied without resolving.
    pub async fn authorize(
        &self,
        agent: &AgentRef,
        target: &ResourceRef,
        requested: ModeSet,
    ) -> Decision {
        self.authorize_with_modes(agent, target, requested).await.0
    }

    /// Like [`authorize`](Self::authorize), also returning the effective
    /// modes the decision was made from (empty on failure).
    ///
    /// Both values come from one resolution, so a caller advertising the
    /// modes never disagrees with the decision.
    pub async fn authorize_with_modes(
        &self,
        agent: &AgentRef,
        target: &ResourceRef,
        requested: ModeSet,
    ) -> (Decision, ModeSet) {
        if requested.is_empty() {
            log::debug!("{agent} requesting no modes on {target}: denied");
            return (Decision::Denied, ModeSet::EMPTY);
        }

        let modes = match self.try_effective_modes(agent, target).await {
            Ok(resolution) => resolution.modes,
            Err(e) => {
                log::warn!("Denying {agent} on {target}: {e}");
                return (Decision::Denied, ModeSet::EMPTY);
            }
        };
        let decision = Decision::evaluate(target, requested, modes);
        log::debug!("{agent} requesting [{requested}] on {target}: {decision}");
        (decision, modes)
    }

    /// The modes `agent` holds on `target`; empty if resolution fails.
    ///
    /// Intended for advertising permitted methods (e.g. an `Allow` header).
    pub async fn effective_modes(&self, agent: &AgentRef, target: &ResourceRef) -> ModeSet {
        match self.try_effective_modes(agent, target).await {
            Ok(resolution) => resolution.modes,
            Err(e) => {
                log::warn!("No modes for {agent} on {target}: {e}");
                ModeSet::EMPTY
            }
        }
    }

    /// Resolve the modes `agent` holds on `target`, reporting failures.
    ///
    /// # Errors
    ///
    /// - [`Error::ResolutionFailure`] if the accessor fails.
    /// - [`Error::CycleGuardTripped`] if the hierarchy walk exceeds its bound.
    pub async fn try_effective_modes(
        &self,
        agent: &AgentRef,
        target: &ResourceRef,
    ) -> Result<Resolution> {
        let key = CacheKey::new(target, agent);
        if self.config.cache_enabled {
            if let Some(hit) = self.cache.get(&key) {
                return Ok(hit.resolution.clone());
            }
        }

        let generation = self.cache.generation();
        let (resolution, dependencies) = self.resolve(agent, target).await?;

        if self.config.cache_enabled {
            self.cache.insert_if_current(
                key,
                CachedResolution {
                    resolution: resolution.clone(),
                    dependencies,
                },
                generation,
            );
        }
        Ok(resolution)
    }

    /// Drop cached results depending on `resource`'s ACL.
    pub fn invalidate(&self, resource: &ResourceRef) -> usize {
        self.cache.invalidate(resource)
    }

    /// Consume ACL change notifications on a background task.
    pub fn listen(&self, rx: broadcast::Receiver<AclChanged>) -> JoinHandle<()> {
        self.cache.clone().spawn_listener(rx)
    }

    async fn resolve(
        &self,
        agent: &AgentRef,
        target: &ResourceRef,
    ) -> Result<(Resolution, BTreeSet<ResourceRef>)> {
        let governed = target.governed();
        let is_acl = target.is_acl();

        let walk = HierarchyWalker::new(&self.accessor)
            .with_partition_root(self.config.partition_root.as_ref())
            .with_max_depth(self.config.max_depth)
            .find_governing_acl(&governed)
            .await?;
        let mut dependencies: BTreeSet<ResourceRef> = walk.visited.into_iter().collect();

        let Some(governing) = walk.governing else {
            let modes = self.config.default_policy.modes_for(agent);
            let modes = if is_acl {
                modes.intersection(ModeSet::CONTROL)
            } else {
                modes
            };
            return Ok((
                Resolution {
                    modes,
                    outcome: AclOutcome::NoApplicableAcl,
                },
                dependencies,
            ));
        };

        let inherited = governing.is_inherited();
        let groups = self
            .member_groups(
                agent,
                &governing.authorizations,
                &governed,
                inherited,
                &mut dependencies,
            )
            .await?;

        let modes = effective_modes(
            &governing.authorizations,
            agent,
            &groups,
            &governed,
            inherited,
            is_acl,
        );
        Ok((
            Resolution {
                modes,
                outcome: AclOutcome::Governed {
                    acl: governing.acl,
                    depth: governing.depth,
                },
            },
            dependencies,
        ))
    }

    /// Groups referenced by in-scope authorizations that `agent` belongs to.
    ///
    /// Group documents are independent reads and are fetched concurrently.
    /// A failed fetch fails the whole resolution.
    async fn member_groups(
        &self,
        agent: &AgentRef,
        authorizations: &[Authorization],
        target: &ResourceRef,
        inherited: bool,
        dependencies: &mut BTreeSet<ResourceRef>,
    ) -> Result<BTreeSet<ResourceRef>> {
        let candidates: BTreeSet<&ResourceRef> = authorizations
            .iter()
            .filter(|auth| in_scope(auth, target, inherited))
            .flat_map(|auth| auth.agent_groups.iter())
            .collect();
        if candidates.is_empty() {
            return Ok(BTreeSet::new());
        }

        let documents: BTreeSet<ResourceRef> =
            candidates.iter().map(|group| group.document()).collect();
        dependencies.extend(documents.iter().cloned());

        let fetches = documents.iter().map(|doc| async move {
            self.accessor
                .get_resource(doc)
                .await
                .map_err(|e| Error::resolution(doc, e))
        });
        let snapshots = try_join_all(fetches).await?;
        let by_document: BTreeMap<ResourceRef, Option<ResourceSnapshot>> =
            documents.into_iter().zip(snapshots).collect();

        let member = Term::iri(agent.as_str());
        let groups = candidates
            .into_iter()
            .filter(|group| {
                let Some(Some(snapshot)) = by_document.get(&group.document()) else {
                    return false;
                };
                let subject = Term::iri(group.as_str());
                snapshot.triples.iter().any(|t| {
                    t.subject == subject && t.predicate == vcard::HAS_MEMBER && t.object == member
                })
            })
            .cloned()
            .collect();
        Ok(groups)
    }
}

impl<A> fmt::Debug for Authorizer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorizer")
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .finish()
    }
}
