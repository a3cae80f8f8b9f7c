//! Grants to agent groups.

use std::sync::Arc;

use webac_acl::{Mode, ModeSet};
use webac_core::AgentRef;

use crate::common::*;

fn staff_tree() -> Arc<TestStore> {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        PRIVATE,
        acl_of([Grant::new("staff")
            .default_for(PRIVATE)
            .read()
            .write()
            .group(STAFF)]),
    );
    store.put(GROUPS_DOC, group_doc(STAFF, &[ALICE]));
    store
}

#[tokio::test]
async fn test_group_member_is_granted() {
    let store = staff_tree();
    let authorizer = authorizer(&store);

    assert_eq!(
        authorizer.effective_modes(&alice(), &res(PRIVATE_DOC)).await,
        ModeSet::from([Mode::Read, Mode::Write])
    );
    assert!(
        authorizer
            .effective_modes(&bob(), &res(PRIVATE_DOC))
            .await
            .is_empty()
    );
    assert!(
        authorizer
            .effective_modes(&AgentRef::Anonymous, &res(PRIVATE_DOC))
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn test_membership_under_another_group_does_not_count() {
    let store = staff_tree();
    store.put(
        GROUPS_DOC,
        group_doc("http://example.org/groups#interns", &[BOB]),
    );
    let authorizer = authorizer(&store);

    assert!(
        authorizer
            .effective_modes(&bob(), &res(PRIVATE_DOC))
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn test_missing_group_document_grants_nothing() {
    let store = Arc::new(TestStore::tree());
    store.put_acl(
        PRIVATE,
        acl_of([Grant::new("staff").default_for(PRIVATE).read().group(STAFF)]),
    );
    let authorizer = authorizer(&store);

    let resolution = authorizer
        .try_effective_modes(&alice(), &res(PRIVATE_DOC))
        .await
        .unwrap();
    assert!(resolution.modes.is_empty());
}

#[tokio::test]
async fn test_group_document_change_invalidates() {
    let store = staff_tree();
    let authorizer = authorizer(&store);
    let read = ModeSet::from(Mode::Read);

    assert!(
        !authorizer
            .authorize(&bob(), &res(PRIVATE_DOC), read)
            .await
            .is_granted()
    );

    store.put(GROUPS_DOC, group_doc(STAFF, &[ALICE, BOB]));
    assert_eq!(authorizer.invalidate(&res(GROUPS_DOC)), 1);

    assert!(
        authorizer
            .authorize(&bob(), &res(PRIVATE_DOC), read)
            .await
            .is_granted()
    );
}
