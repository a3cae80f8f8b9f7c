//! Time-bounded resource lookups.

use std::time::Duration;

use async_trait::async_trait;
use webac_core::{Error, ResourceAccessor, ResourceRef, ResourceSnapshot};

/// Wraps an accessor so every `get_resource` call completes within a budget.
///
/// A lookup that overruns fails with [`Error::Timeout`], which the
/// authorizer turns into a denial.
#[derive(Debug, Clone)]
pub struct TimeoutAccessor<A> {
    inner: A,
    budget: Duration,
}

impl<A> TimeoutAccessor<A> {
    /// Bound every lookup of `inner` to `budget`.
    pub fn new(inner: A, budget: Duration) -> Self {
        Self { inner, budget }
    }

    /// The per-lookup budget.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// The wrapped accessor.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Unwrap the accessor.
    pub fn into_inner(self) -> A {
        self.inner
    }
}

#[async_trait]
impl<A: ResourceAccessor> ResourceAccessor for TimeoutAccessor<A> {
    async fn get_resource(
        &self,
        id: &ResourceRef,
    ) -> webac_core::Result<Option<ResourceSnapshot>> {
        match tokio::time::timeout(self.budget, self.inner.get_resource(id)).await {
            Ok(result) => result,
            Err(_) => {
                let millis = u64::try_from(self.budget.as_millis()).unwrap_or(u64::MAX);
                log::warn!("{} lookup of {id} exceeded {millis}ms", self.inner.name());
                Err(Error::Timeout {
                    resource: id.to_string(),
                    millis,
                })
            }
        }
    }

    fn get_container(&self, id: &ResourceRef) -> Option<ResourceRef> {
        self.inner.get_container(id)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
