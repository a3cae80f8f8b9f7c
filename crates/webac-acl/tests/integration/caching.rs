//! Decision caching and invalidation.

use std::sync::Arc;

use tokio::sync::broadcast;
use webac_acl::{AuthorizerConfig, Decision, Mode, ModeSet};
use webac_core::{AclChanged, AgentRef};

use crate::common::*;

fn public_root(store: &TestStore) {
    store.put_acl(
        ROOT,
        acl_of([Grant::new("public")
            .access_to(ROOT)
            .default_for(ROOT)
            .read()
            .public()]),
    );
}

#[tokio::test]
async fn test_repeated_decisions_are_identical_and_cached() {
    let store = Arc::new(TestStore::tree());
    public_root(&store);
    let authorizer = authorizer(&store);
    let target = res(PUBLIC_DOC);
    let read = ModeSet::from(Mode::Read);

    let first = authorizer.authorize(&AgentRef::Anonymous, &target, read).await;
    let fetches = store.fetches();
    let second = authorizer.authorize(&AgentRef::Anonymous, &target, read).await;

    assert_eq!(first, Decision::Granted);
    assert_eq!(first, second);
    assert_eq!(store.fetches(), fetches, "second decision should be served from cache");
    assert_eq!(authorizer.cache().len(), 1);
}

#[tokio::test]
async fn test_cache_disabled_always_resolves() {
    let store = Arc::new(TestStore::tree());
    public_root(&store);
    let authorizer = authorizer_with(&store, AuthorizerConfig::default().with_cache(false));
    let target = res(PUBLIC_DOC);

    authorizer.effective_modes(&alice(), &target).await;
    let fetches = store.fetches();
    authorizer.effective_modes(&alice(), &target).await;

    assert!(store.fetches() > fetches);
    assert!(authorizer.cache().is_empty());
}

#[tokio::test]
async fn test_new_intermediate_acl_invalidates_descendants() {
    let store = Arc::new(TestStore::tree());
    public_root(&store);
    let authorizer = authorizer(&store);
    let read = ModeSet::from(Mode::Read);

    assert!(
        authorizer
            .authorize(&alice(), &res(PUBLIC_DOC), read)
            .await
            .is_granted()
    );

    store.put_acl(
        PUBLIC,
        acl_of([Grant::new("bob-only").default_for(PUBLIC).read().agent(BOB)]),
    );
    let removed = authorizer.invalidate(&res(PUBLIC).acl());
    assert_eq!(removed, 1);

    assert!(
        !authorizer
            .authorize(&alice(), &res(PUBLIC_DOC), read)
            .await
            .is_granted()
    );
    assert!(
        authorizer
            .authorize(&bob(), &res(PUBLIC_DOC), read)
            .await
            .is_granted()
    );
}

#[tokio::test]
async fn test_unrelated_change_keeps_entries() {
    let store = Arc::new(TestStore::tree());
    public_root(&store);
    let authorizer = authorizer(&store);

    authorizer.effective_modes(&alice(), &res(PUBLIC_DOC)).await;
    assert_eq!(authorizer.invalidate(&res(PRIVATE)), 0);
    assert_eq!(authorizer.cache().len(), 1);
}

#[tokio::test]
async fn test_change_notifications_invalidate_through_listener() {
    let store = Arc::new(TestStore::tree());
    public_root(&store);
    let authorizer = authorizer(&store);
    let read = ModeSet::from(Mode::Read);

    let (tx, rx) = broadcast::channel(16);
    let listener = authorizer.listen(rx);

    assert!(
        authorizer
            .authorize(&AgentRef::Anonymous, &res(PRIVATE_DOC), read)
            .await
            .is_granted()
    );

    store.remove_acl(ROOT);
    tx.send(AclChanged::new(res(ROOT).acl())).unwrap();
    drop(tx);
    listener.await.unwrap();

    assert!(authorizer.cache().is_empty());
    assert_eq!(
        authorizer
            .authorize(&AgentRef::Anonymous, &res(PRIVATE_DOC), read)
            .await,
        Decision::Denied
    );
}
