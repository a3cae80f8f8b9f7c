//! Resolution cache owned by the [`Authorizer`](crate::Authorizer).
//!
//! Entries are keyed by `(target, agent)` and stored as immutable `Arc`
//! snapshots; a write replaces an entry wholesale. Each entry records the
//! resources its result depends on: every resource whose ACL was examined
//! during the hierarchy walk, plus any group documents consulted. An
//! invalidation for resource `X` drops every entry depending on `X`, so
//! creating, editing or deleting an ACL anywhere on the path is observed.
//!
//! A generation counter, bumped on every invalidation, keeps a resolution
//! that started before an invalidation from being stored after it.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use webac_core::{AclChanged, AgentRef, ResourceRef};

use crate::decision::Resolution;

/// Cache key: who is asking about what.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Requested resource (possibly an ACL resource).
    pub target: ResourceRef,
    /// Requesting agent.
    pub agent: AgentRef,
}

impl CacheKey {
    /// Create a key.
    pub fn new(target: &ResourceRef, agent: &AgentRef) -> Self {
        Self {
            target: target.clone(),
            agent: agent.clone(),
        }
    }
}

/// A cached resolution and the resources it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResolution {
    /// The cached result.
    pub resolution: Resolution,
    /// Resources whose ACL (or group document) changes invalidate this entry.
    pub dependencies: BTreeSet<ResourceRef>,
}

/// Concurrent cache of resolved modes.
#[derive(Debug, Default)]
pub struct DecisionCache {
    entries: RwLock<HashMap<CacheKey, Arc<CachedResolution>>>,
    generation: AtomicU64,
}

impl DecisionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current invalidation generation.
    ///
    /// Capture this before resolving and pass it to [`insert_if_current`](Self::insert_if_current).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Look up an entry.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<CachedResolution>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Store an entry unless an invalidation happened since `generation`.
    ///
    /// Returns `true` if the entry was stored.
    pub fn insert_if_current(
        &self,
        key: CacheKey,
        entry: CachedResolution,
        generation: u64,
    ) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::Acquire) != generation {
            log::debug!("Discarding stale resolution for {}", key.target);
            return false;
        }
        entries.insert(key, Arc::new(entry));
        true
    }

    /// Drop every entry that depends on `resource`.
    ///
    /// Accepts a resource or its ACL identifier. Returns the number of
    /// entries removed.
    pub fn invalidate(&self, resource: &ResourceRef) -> usize {
        let resource = resource.governed();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        self.generation.fetch_add(1, Ordering::AcqRel);

        let before = entries.len();
        entries.retain(|_, entry| !entry.dependencies.contains(&resource));
        let removed = before - entries.len();
        log::debug!("ACL change at {resource} invalidated {removed} cached resolutions");
        removed
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        self.generation.fetch_add(1, Ordering::AcqRel);
        entries.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply change notifications from `rx` until the sender is dropped.
    ///
    /// If the listener falls behind and notifications are lost, the whole
    /// cache is cleared.
    pub fn spawn_listener(
        self: Arc<Self>,
        mut rx: broadcast::Receiver<AclChanged>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        self.invalidate(&event.resource);
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        log::warn!("Missed {missed} ACL change notifications; clearing cache");
                        self.clear();
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        log::debug!("ACL change channel closed; listener exiting");
                        break;
                    }
                }
            }
        })
    }
}
