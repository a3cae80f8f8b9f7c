//! In-memory resource tree.
//!
//! Resources are held as whole [`ResourceSnapshot`]s; containment comes from
//! each snapshot's `container`. Every mutation is announced as an
//! [`AclChanged`] on a broadcast channel, because both ACLs and group
//! documents feed access decisions. Subscribers that fall behind receive
//! `Lagged` and are expected to drop everything they cached.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tokio::sync::broadcast;
use webac_core::{AclChanged, ResourceAccessor, ResourceRef, ResourceSnapshot};

use crate::dataset::Dataset;
use crate::error::Result;

/// Default capacity of the change notification channel.
pub const DEFAULT_CHANGE_CAPACITY: usize = 256;

/// Thread-safe in-memory [`ResourceAccessor`].
#[derive(Debug)]
pub struct MemoryStore {
    resources: RwLock<HashMap<ResourceRef, ResourceSnapshot>>,
    changes: broadcast::Sender<AclChanged>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANGE_CAPACITY)
    }

    /// Create an empty store whose change channel buffers `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(capacity.max(1));
        Self {
            resources: RwLock::new(HashMap::new()),
            changes,
        }
    }

    /// Create a store holding every resource of `dataset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset contains invalid terms or duplicate
    /// resources.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        let store = Self::new();
        for snapshot in dataset.snapshots()? {
            store.put(snapshot);
        }
        Ok(store)
    }

    /// Receive a notification for every subsequent mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<AclChanged> {
        self.changes.subscribe()
    }

    /// Insert or replace a resource, returning the previous snapshot.
    pub fn put(&self, snapshot: ResourceSnapshot) -> Option<ResourceSnapshot> {
        let id = snapshot.id.clone();
        let previous = self
            .resources
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), snapshot);
        self.announce(id);
        previous
    }

    /// Remove a resource, returning its last snapshot.
    pub fn remove(&self, id: &ResourceRef) -> Option<ResourceSnapshot> {
        let removed = self
            .resources
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        if removed.is_some() {
            self.announce(id.clone());
        }
        removed
    }

    /// Current snapshot of a resource.
    pub fn get(&self, id: &ResourceRef) -> Option<ResourceSnapshot> {
        self.resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Identifiers of every stored resource, sorted.
    pub fn ids(&self) -> Vec<ResourceRef> {
        let mut ids: Vec<_> = self
            .resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Number of stored resources.
    pub fn len(&self) -> usize {
        self.resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn announce(&self, resource: ResourceRef) {
        // No subscribers is not an error.
        if let Ok(receivers) = self.changes.send(AclChanged::new(resource.clone())) {
            log::trace!("Announced change to {resource} to {receivers} subscribers");
        }
    }
}

#[async_trait]
impl ResourceAccessor for MemoryStore {
    async fn get_resource(
        &self,
        id: &ResourceRef,
    ) -> webac_core::Result<Option<ResourceSnapshot>> {
        Ok(self.get(id))
    }

    fn get_container(&self, id: &ResourceRef) -> Option<ResourceRef> {
        self.resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .and_then(|snapshot| snapshot.container.clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
