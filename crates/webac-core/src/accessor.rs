//! The storage capability consumed by authorization.
//!
//! Authorization never talks to a storage engine directly. It depends on the
//! narrow [`ResourceAccessor`] trait: an asynchronous fetch of a resource's
//! current graph, plus a synchronous lookup of its parent container. Any
//! storage backend (in-memory, database, remote service) implements it.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rdf::Triple;
use crate::resource::ResourceRef;

/// Current state of a resource as seen by the authorization layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    /// Resource identifier.
    pub id: ResourceRef,

    /// Immediate parent container, `None` for a partition root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ResourceRef>,

    /// User-managed statements, in storage order.
    #[serde(default)]
    pub triples: Vec<Triple>,
}

impl ResourceSnapshot {
    /// Create an empty snapshot for a resource.
    pub fn new(id: impl Into<ResourceRef>) -> Self {
        Self {
            id: id.into(),
            container: None,
            triples: Vec::new(),
        }
    }

    /// Set the parent container.
    pub fn with_container(mut self, container: impl Into<ResourceRef>) -> Self {
        self.container = Some(container.into());
        self
    }

    /// Append statements to the snapshot.
    pub fn with_triples(mut self, triples: impl IntoIterator<Item = Triple>) -> Self {
        self.triples.extend(triples);
        self
    }
}

/// Notification that the ACL governing a resource changed.
///
/// `resource` may name either the governed resource or its ACL; consumers
/// normalise with [`ResourceRef::governed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclChanged {
    /// The affected resource.
    pub resource: ResourceRef,
}

impl AclChanged {
    /// Create a change notification for a resource.
    pub fn new(resource: impl Into<ResourceRef>) -> Self {
        Self {
            resource: resource.into(),
        }
    }
}

/// Read-only access to resources and their containment hierarchy.
///
/// # Async
///
/// `get_resource` is async so lookups never block the calling thread.
/// `get_container` is synchronous: implementations are expected to answer it
/// from cached containment metadata.
#[async_trait]
pub trait ResourceAccessor: Send + Sync {
    /// Fetch the current snapshot of a resource, `None` if it does not exist.
    async fn get_resource(&self, id: &ResourceRef) -> Result<Option<ResourceSnapshot>>;

    /// The immediate parent container, `None` at a partition root.
    fn get_container(&self, id: &ResourceRef) -> Option<ResourceRef>;

    /// Accessor name for diagnostics.
    fn name(&self) -> &str {
        "accessor"
    }
}

#[async_trait]
impl<A: ResourceAccessor + ?Sized> ResourceAccessor for Arc<A> {
    async fn get_resource(&self, id: &ResourceRef) -> Result<Option<ResourceSnapshot>> {
        (**self).get_resource(id).await
    }

    fn get_container(&self, id: &ResourceRef) -> Option<ResourceRef> {
        (**self).get_container(id)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
