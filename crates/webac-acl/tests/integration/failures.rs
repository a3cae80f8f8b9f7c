//! Fail-closed behaviour when the resource service misbehaves.

use std::sync::Arc;

use webac_acl::{AuthorizerConfig, Decision, DefaultPolicy, Error, Mode, ModeSet};
use webac_core::AgentRef;

use crate::common::*;

fn open_tree() -> Arc<TestStore> {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        ROOT,
        acl_of([Grant::new("public")
            .access_to(ROOT)
            .default_for(ROOT)
            .read()
            .write()
            .public()]),
    );
    store
}

#[tokio::test]
async fn test_accessor_failure_denies() {
    let store = open_tree();
    store.fail(res(PUBLIC).acl().as_str());
    let authorizer = authorizer(&store);

    let decision = authorizer
        .authorize(&AgentRef::Anonymous, &res(PUBLIC_DOC), ModeSet::from(Mode::Read))
        .await;
    assert_eq!(decision, Decision::Denied);

    let err = authorizer
        .try_effective_modes(&AgentRef::Anonymous, &res(PUBLIC_DOC))
        .await
        .unwrap_err();
    assert!(err.is_accessor_failure());
    assert!(matches!(
        err,
        Error::ResolutionFailure { ref resource, .. } if *resource == res(PUBLIC).acl()
    ));
}

#[tokio::test]
async fn test_timeout_denies_even_with_grant_all_default() {
    let store = Arc::new(TestStore::tree());
    store.time_out(res(PRIVATE_DOC).acl().as_str());
    let authorizer = authorizer_with(
        &store,
        AuthorizerConfig::default().with_default_policy(DefaultPolicy::GrantAll),
    );

    assert_eq!(
        authorizer
            .authorize(&alice(), &res(PRIVATE_DOC), ModeSet::from(Mode::Read))
            .await,
        Decision::Denied
    );
    assert!(
        authorizer
            .effective_modes(&alice(), &res(PRIVATE_DOC))
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let store = open_tree();
    store.fail(res(PUBLIC_DOC).acl().as_str());
    let authorizer = authorizer(&store);
    let read = ModeSet::from(Mode::Read);

    assert_eq!(
        authorizer.authorize(&bob(), &res(PUBLIC_DOC), read).await,
        Decision::Denied
    );
    assert!(authorizer.cache().is_empty());

    store.heal();
    assert_eq!(
        authorizer.authorize(&bob(), &res(PUBLIC_DOC), read).await,
        Decision::Granted
    );
}

#[tokio::test]
async fn test_group_document_failure_denies() {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        PRIVATE,
        acl_of([
            Grant::new("staff").default_for(PRIVATE).read().group(STAFF),
            Grant::new("alice").default_for(PRIVATE).read().agent(ALICE),
        ]),
    );
    store.fail(GROUPS_DOC);
    let authorizer = authorizer(&store);

    // Even a direct grant is withheld when group resolution cannot finish.
    assert_eq!(
        authorizer
            .authorize(&alice(), &res(PRIVATE_DOC), ModeSet::from(Mode::Read))
            .await,
        Decision::Denied
    );
}
