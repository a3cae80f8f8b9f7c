//! Common test utilities for WebAC authorization integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use webac_acl::{Authorizer, AuthorizerConfig};
use webac_core::vocab::{acl, foaf, rdf, vcard};
use webac_core::{AgentRef, ResourceAccessor, ResourceRef, ResourceSnapshot, Term, Triple};

pub const ROOT: &str = "http://example.org/";
pub const PUBLIC: &str = "http://example.org/public/";
pub const PUBLIC_DOC: &str = "http://example.org/public/doc";
pub const PRIVATE: &str = "http://example.org/private/";
pub const PRIVATE_DOC: &str = "http://example.org/private/doc";
pub const GROUPS_DOC: &str = "http://example.org/groups";
pub const STAFF: &str = "http://example.org/groups#staff";

pub const ALICE: &str = "https://alice.example/profile#me";
pub const BOB: &str = "https://bob.example/profile#me";

pub fn alice() -> AgentRef {
    AgentRef::web_id(ALICE)
}

pub fn bob() -> AgentRef {
    AgentRef::web_id(BOB)
}

pub fn res(iri: &str) -> ResourceRef {
    ResourceRef::new(iri)
}

// ============================================================================
// Test store
// ============================================================================

/// In-memory accessor with failure injection and fetch counting.
#[derive(Default)]
pub struct TestStore {
    resources: RwLock<HashMap<ResourceRef, ResourceSnapshot>>,
    parents: RwLock<HashMap<ResourceRef, ResourceRef>>,
    failing: RwLock<HashSet<ResourceRef>>,
    timing_out: RwLock<HashSet<ResourceRef>>,
    fetches: AtomicUsize,
}

impl TestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard tree: `/`, `/public/doc`, `/private/doc`, no ACLs.
    pub fn tree() -> Self {
        let store = Self::new();
        store.contain(PUBLIC, ROOT);
        store.contain(PUBLIC_DOC, PUBLIC);
        store.contain(PRIVATE, ROOT);
        store.contain(PRIVATE_DOC, PRIVATE);
        store
    }

    /// Declare `child` as a member of `parent`.
    pub fn contain(&self, child: &str, parent: &str) {
        self.parents.write().unwrap().insert(res(child), res(parent));
    }

    /// Store a plain resource.
    pub fn put(&self, id: &str, triples: Vec<Triple>) {
        let snapshot = ResourceSnapshot::new(id).with_triples(triples);
        self.resources.write().unwrap().insert(res(id), snapshot);
    }

    /// Store the ACL of `resource`.
    pub fn put_acl(&self, resource: &str, triples: Vec<Triple>) {
        self.put(res(resource).acl().as_str(), triples);
    }

    /// Delete the ACL of `resource`.
    pub fn remove_acl(&self, resource: &str) {
        self.resources.write().unwrap().remove(&res(resource).acl());
    }

    /// Make every lookup of `id` fail.
    pub fn fail(&self, id: &str) {
        self.failing.write().unwrap().insert(res(id));
    }

    /// Make every lookup of `id` time out.
    pub fn time_out(&self, id: &str) {
        self.timing_out.write().unwrap().insert(res(id));
    }

    /// Stop failing lookups.
    pub fn heal(&self) {
        self.failing.write().unwrap().clear();
        self.timing_out.write().unwrap().clear();
    }

    /// Number of `get_resource` calls so far.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceAccessor for TestStore {
    async fn get_resource(&self, id: &ResourceRef) -> webac_core::Result<Option<ResourceSnapshot>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.read().unwrap().contains(id) {
            return Err(webac_core::Error::unavailable(id.as_str(), "injected failure"));
        }
        if self.timing_out.read().unwrap().contains(id) {
            return Err(webac_core::Error::Timeout {
                resource: id.to_string(),
                millis: 50,
            });
        }
        Ok(self.resources.read().unwrap().get(id).cloned())
    }

    fn get_container(&self, id: &ResourceRef) -> Option<ResourceRef> {
        self.parents.read().unwrap().get(id).cloned()
    }

    fn name(&self) -> &str {
        "test"
    }
}

/// An authorizer over a shared store, partitioned at [`ROOT`].
pub fn authorizer(store: &Arc<TestStore>) -> Authorizer<Arc<TestStore>> {
    authorizer_with(store, AuthorizerConfig::default())
}

/// Like [`authorizer`], with a custom configuration.
pub fn authorizer_with(
    store: &Arc<TestStore>,
    config: AuthorizerConfig,
) -> Authorizer<Arc<TestStore>> {
    let config = if config.partition_root.is_none() {
        config.with_partition_root(ROOT)
    } else {
        config
    };
    Authorizer::new(Arc::clone(store), config)
}

// ============================================================================
// ACL builders
// ============================================================================

/// Builder for one `acl:Authorization` node.
pub struct Grant {
    subject: Term,
    triples: Vec<Triple>,
}

impl Grant {
    pub fn new(label: &str) -> Self {
        let subject = Term::blank(label);
        let triples = vec![Triple::new(
            subject.clone(),
            rdf::TYPE,
            Term::iri(acl::AUTHORIZATION),
        )];
        Self { subject, triples }
    }

    fn add(mut self, predicate: &str, object: Term) -> Self {
        self.triples
            .push(Triple::new(self.subject.clone(), predicate, object));
        self
    }

    pub fn access_to(self, resource: &str) -> Self {
        self.add(acl::ACCESS_TO, Term::iri(resource))
    }

    pub fn default_for(self, container: &str) -> Self {
        self.add(acl::DEFAULT, Term::iri(container))
    }

    pub fn read(self) -> Self {
        self.add(acl::MODE, Term::iri(acl::READ))
    }

    pub fn write(self) -> Self {
        self.add(acl::MODE, Term::iri(acl::WRITE))
    }

    pub fn append(self) -> Self {
        self.add(acl::MODE, Term::iri(acl::APPEND))
    }

    pub fn control(self) -> Self {
        self.add(acl::MODE, Term::iri(acl::CONTROL))
    }

    pub fn agent(self, web_id: &str) -> Self {
        self.add(acl::AGENT, Term::iri(web_id))
    }

    pub fn public(self) -> Self {
        self.add(acl::AGENT_CLASS, Term::iri(foaf::AGENT))
    }

    pub fn authenticated(self) -> Self {
        self.add(acl::AGENT_CLASS, Term::iri(acl::AUTHENTICATED_AGENT))
    }

    pub fn group(self, group: &str) -> Self {
        self.add(acl::AGENT_GROUP, Term::iri(group))
    }

    pub fn build(self) -> Vec<Triple> {
        self.triples
    }
}

/// Flatten grants into one ACL graph.
pub fn acl_of(grants: impl IntoIterator<Item = Grant>) -> Vec<Triple> {
    grants.into_iter().flat_map(Grant::build).collect()
}

/// A group document listing `members` under `group`.
pub fn group_doc(group: &str, members: &[&str]) -> Vec<Triple> {
    members
        .iter()
        .map(|m| Triple::iris(group, vcard::HAS_MEMBER, m))
        .collect()
}
