//! Access decisions over a resource tree.

use std::collections::BTreeSet;
use std::sync::Arc;

use webac_acl::{AclOutcome, AuthorizerConfig, Decision, DefaultPolicy, Error, Mode, ModeSet};
use webac_core::AgentRef;

use crate::common::*;

fn read() -> ModeSet {
    ModeSet::from(Mode::Read)
}

fn write() -> ModeSet {
    ModeSet::from(Mode::Write)
}

#[tokio::test]
async fn test_no_acl_anywhere_applies_default_policy() {
    let store = Arc::new(TestStore::tree());

    let deny = authorizer(&store);
    assert_eq!(
        deny.authorize(&alice(), &res(PUBLIC_DOC), read()).await,
        Decision::Denied
    );
    let resolution = deny
        .try_effective_modes(&alice(), &res(PUBLIC_DOC))
        .await
        .unwrap();
    assert_eq!(resolution.outcome, AclOutcome::NoApplicableAcl);
    assert!(resolution.modes.is_empty());

    let grant = authorizer_with(
        &store,
        AuthorizerConfig::default().with_default_policy(DefaultPolicy::GrantAll),
    );
    assert_eq!(
        grant
            .authorize(&AgentRef::Anonymous, &res(PUBLIC_DOC), read().union(write()))
            .await,
        Decision::Granted
    );
}

#[tokio::test]
async fn test_empty_request_is_denied() {
    let store = Arc::new(TestStore::tree());

    let deny = authorizer(&store);
    assert_eq!(
        deny.authorize(&AgentRef::Anonymous, &res(PRIVATE_DOC), ModeSet::EMPTY)
            .await,
        Decision::Denied
    );

    let grant = authorizer_with(
        &store,
        AuthorizerConfig::default().with_default_policy(DefaultPolicy::GrantAll),
    );
    let (decision, modes) = grant
        .authorize_with_modes(&alice(), &res(PUBLIC_DOC), ModeSet::EMPTY)
        .await;
    assert_eq!(decision, Decision::Denied);
    assert!(modes.is_empty());
    assert_eq!(store.fetches(), 0);
}

#[tokio::test]
async fn test_authorize_with_modes_reports_effective_modes() {
    let store = Arc::new(TestStore::tree());
    let grant = authorizer_with(
        &store,
        AuthorizerConfig::default().with_default_policy(DefaultPolicy::GrantAll),
    );

    let (decision, modes) = grant
        .authorize_with_modes(&alice(), &res(PUBLIC_DOC), read())
        .await;
    assert_eq!(decision, Decision::Granted);
    assert_eq!(modes, ModeSet::ALL);

    let (decision, modes) = grant
        .authorize_with_modes(&alice(), &res(PUBLIC_DOC).acl(), read())
        .await;
    assert_eq!(decision, Decision::Granted);
    assert_eq!(modes, ModeSet::CONTROL);
}

#[tokio::test]
async fn test_administrators_only_default_policy() {
    let store = Arc::new(TestStore::tree());
    let authorizer = authorizer_with(
        &store,
        AuthorizerConfig::default().with_default_policy(DefaultPolicy::AdministratorsOnly {
            administrators: BTreeSet::from([alice()]),
        }),
    );

    assert!(
        authorizer
            .authorize(&alice(), &res(PRIVATE_DOC), ModeSet::ALL)
            .await
            .is_granted()
    );
    assert!(
        !authorizer
            .authorize(&bob(), &res(PRIVATE_DOC), read())
            .await
            .is_granted()
    );
}

#[tokio::test]
async fn test_public_read_inherited_from_root() {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        ROOT,
        acl_of([Grant::new("public")
            .access_to(ROOT)
            .default_for(ROOT)
            .read()
            .public()]),
    );
    let authorizer = authorizer(&store);

    let anonymous = AgentRef::Anonymous;
    assert_eq!(
        authorizer.authorize(&anonymous, &res(PUBLIC_DOC), read()).await,
        Decision::Granted
    );
    assert_eq!(
        authorizer.authorize(&anonymous, &res(PUBLIC_DOC), write()).await,
        Decision::Denied
    );

    let resolution = authorizer
        .try_effective_modes(&anonymous, &res(PUBLIC_DOC))
        .await
        .unwrap();
    assert_eq!(
        resolution.outcome,
        AclOutcome::Governed {
            acl: res(ROOT).acl(),
            depth: 2,
        }
    );
}

#[tokio::test]
async fn test_access_to_without_default_is_not_inherited() {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        PRIVATE,
        acl_of([Grant::new("owner").access_to(PRIVATE).read().write().agent(ALICE)]),
    );
    let authorizer = authorizer(&store);

    assert!(
        authorizer
            .authorize(&alice(), &res(PRIVATE), read())
            .await
            .is_granted()
    );
    assert!(
        !authorizer
            .authorize(&alice(), &res(PRIVATE_DOC), read())
            .await
            .is_granted()
    );
}

#[tokio::test]
async fn test_default_grant_is_not_direct() {
    // acl:default alone does not cover the container itself.
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        PRIVATE,
        acl_of([Grant::new("members").default_for(PRIVATE).read().agent(ALICE)]),
    );
    let authorizer = authorizer(&store);

    assert!(
        authorizer
            .authorize(&alice(), &res(PRIVATE_DOC), read())
            .await
            .is_granted()
    );
    assert!(
        !authorizer
            .authorize(&alice(), &res(PRIVATE), read())
            .await
            .is_granted()
    );
}

#[tokio::test]
async fn test_nearest_acl_wins_without_merging() {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        ROOT,
        acl_of([Grant::new("public")
            .access_to(ROOT)
            .default_for(ROOT)
            .read()
            .public()]),
    );
    store.put_acl(
        PRIVATE_DOC,
        acl_of([Grant::new("bob").access_to(PRIVATE_DOC).read().agent(BOB)]),
    );
    let authorizer = authorizer(&store);

    assert!(
        authorizer
            .authorize(&bob(), &res(PRIVATE_DOC), read())
            .await
            .is_granted()
    );
    // The root's public grant does not reach past the document's own ACL.
    assert!(
        !authorizer
            .authorize(&alice(), &res(PRIVATE_DOC), read())
            .await
            .is_granted()
    );
    assert!(
        authorizer
            .authorize(&alice(), &res(PUBLIC_DOC), read())
            .await
            .is_granted()
    );
}

#[tokio::test]
async fn test_modes_union_across_authorizations() {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        PUBLIC_DOC,
        acl_of([
            Grant::new("r").access_to(PUBLIC_DOC).read().agent(ALICE),
            Grant::new("a").access_to(PUBLIC_DOC).append().authenticated(),
        ]),
    );
    let authorizer = authorizer(&store);

    let modes = authorizer.effective_modes(&alice(), &res(PUBLIC_DOC)).await;
    assert_eq!(modes, ModeSet::from([Mode::Read, Mode::Append]));
    assert!(
        authorizer
            .authorize(&alice(), &res(PUBLIC_DOC), modes)
            .await
            .is_granted()
    );
    assert!(
        !authorizer
            .authorize(&alice(), &res(PUBLIC_DOC), modes.with(Mode::Write))
            .await
            .is_granted()
    );
}

#[tokio::test]
async fn test_authenticated_agent_class() {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        PUBLIC_DOC,
        acl_of([Grant::new("signed-in")
            .access_to(PUBLIC_DOC)
            .read()
            .authenticated()]),
    );
    let authorizer = authorizer(&store);

    assert!(
        authorizer
            .authorize(&bob(), &res(PUBLIC_DOC), read())
            .await
            .is_granted()
    );
    assert!(
        !authorizer
            .authorize(&AgentRef::Anonymous, &res(PUBLIC_DOC), read())
            .await
            .is_granted()
    );
}

#[tokio::test]
async fn test_acl_resource_requires_control() {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        PUBLIC_DOC,
        acl_of([
            Grant::new("editor")
                .access_to(PUBLIC_DOC)
                .read()
                .write()
                .agent(BOB),
            Grant::new("owner").access_to(PUBLIC_DOC).control().agent(ALICE),
        ]),
    );
    let authorizer = authorizer(&store);
    let acl = res(PUBLIC_DOC).acl();

    // Read and Write on the resource confer nothing on its ACL.
    assert!(
        authorizer
            .authorize(&bob(), &res(PUBLIC_DOC), read().union(write()))
            .await
            .is_granted()
    );
    assert_eq!(authorizer.authorize(&bob(), &acl, read()).await, Decision::Denied);
    assert!(authorizer.effective_modes(&bob(), &acl).await.is_empty());

    // Control permits any access to the ACL.
    assert_eq!(authorizer.authorize(&alice(), &acl, read()).await, Decision::Granted);
    assert_eq!(authorizer.authorize(&alice(), &acl, write()).await, Decision::Granted);
    assert_eq!(authorizer.effective_modes(&alice(), &acl).await, ModeSet::CONTROL);
}

#[tokio::test]
async fn test_grant_all_default_is_limited_to_control_on_acl() {
    let store = Arc::new(TestStore::tree());
    let authorizer = authorizer_with(
        &store,
        AuthorizerConfig::default().with_default_policy(DefaultPolicy::GrantAll),
    );
    let modes = authorizer
        .effective_modes(&AgentRef::Anonymous, &res(PUBLIC_DOC).acl())
        .await;
    assert_eq!(modes, ModeSet::CONTROL);
}

#[tokio::test]
async fn test_malformed_authorization_is_skipped() {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        PUBLIC_DOC,
        acl_of([
            // No modes.
            Grant::new("broken").access_to(PUBLIC_DOC).agent(BOB),
            // No grantee.
            Grant::new("orphan").access_to(PUBLIC_DOC).write(),
            Grant::new("ok").access_to(PUBLIC_DOC).read().agent(ALICE),
        ]),
    );
    let authorizer = authorizer(&store);

    assert!(
        authorizer
            .authorize(&alice(), &res(PUBLIC_DOC), read())
            .await
            .is_granted()
    );
    assert!(authorizer.effective_modes(&bob(), &res(PUBLIC_DOC)).await.is_empty());
}

#[tokio::test]
async fn test_acl_with_only_malformed_entries_is_ignored() {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        ROOT,
        acl_of([Grant::new("root").default_for(ROOT).read().agent(ALICE)]),
    );
    store.put_acl(
        PUBLIC,
        acl_of([Grant::new("broken").default_for(PUBLIC).agent(BOB)]),
    );
    let authorizer = authorizer(&store);

    let resolution = authorizer
        .try_effective_modes(&alice(), &res(PUBLIC_DOC))
        .await
        .unwrap();
    assert_eq!(resolution.modes, read());
    assert_eq!(
        resolution.outcome,
        AclOutcome::Governed {
            acl: res(ROOT).acl(),
            depth: 2,
        }
    );
}

#[tokio::test]
async fn test_walk_stops_at_partition_root() {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        ROOT,
        acl_of([Grant::new("public").default_for(ROOT).read().public()]),
    );
    let authorizer = authorizer_with(
        &store,
        AuthorizerConfig::default().with_partition_root(PRIVATE),
    );

    let resolution = authorizer
        .try_effective_modes(&alice(), &res(PRIVATE_DOC))
        .await
        .unwrap();
    assert_eq!(resolution.outcome, AclOutcome::NoApplicableAcl);
    assert!(resolution.modes.is_empty());
}

#[tokio::test]
async fn test_containment_cycle_fails_closed() {
    let store = Arc::new(TestStore::new());
    store.contain("http://example.org/a/", "http://example.org/b/");
    store.contain("http://example.org/b/", "http://example.org/a/");
    let authorizer = authorizer_with(
        &store,
        AuthorizerConfig::default()
            .with_max_depth(8)
            .with_default_policy(DefaultPolicy::GrantAll),
    );
    let target = res("http://example.org/a/");

    let err = authorizer
        .try_effective_modes(&alice(), &target)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::CycleGuardTripped { depth: 8 }));
    assert_eq!(authorizer.authorize(&alice(), &target, read()).await, Decision::Denied);
}
