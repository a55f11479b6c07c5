use std::sync::Arc;
use std::thread;

use super::*;

// -----------------------------------------------------------------------
// create_or_reuse
// -----------------------------------------------------------------------

#[test]
fn create_or_reuse_is_idempotent_per_key() {
    let registry = ApprovalRegistry::new();
    let first = registry.create_or_reuse("exec:clawhub install foo", Some("agent-1".into()));
    let second = registry.create_or_reuse("exec:clawhub install foo", Some("agent-2".into()));

    assert_eq!(first.id, second.id);
    // The reused request keeps its original requester.
    assert_eq!(second.requester_id.as_deref(), Some("agent-1"));
    assert_eq!(registry.count(), 1);
}

#[test]
fn distinct_keys_get_distinct_requests() {
    let registry = ApprovalRegistry::new();
    let a = registry.create_or_reuse("https://x/a", None);
    let b = registry.create_or_reuse("https://x/b", None);

    assert_ne!(a.id, b.id);
    assert_eq!(registry.list_pending().len(), 2);
}

#[test]
fn resolved_request_does_not_block_a_new_one() {
    let registry = ApprovalRegistry::new();
    let first = registry.create_or_reuse("https://x/y", None);
    assert!(registry.deny(&first.id));

    let second = registry.create_or_reuse("https://x/y", None);
    assert_ne!(first.id, second.id);
    assert!(second.is_pending());
}

#[test]
fn concurrent_creations_yield_one_pending_request() {
    let registry = Arc::new(ApprovalRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.create_or_reuse("https://x/y", None).id)
        })
        .collect();

    let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(ids.iter().all(|id| *id == ids[0]));
    assert_eq!(registry.list_pending().len(), 1);
}

// -----------------------------------------------------------------------
// approve / deny
// -----------------------------------------------------------------------

#[test]
fn approve_marks_key_sticky() {
    let registry = ApprovalRegistry::new();
    let request = registry.create_or_reuse("exec:bash install.sh", None);

    assert!(!registry.is_approved("exec:bash install.sh"));
    assert!(registry.approve(&request.id));
    assert!(registry.is_approved("exec:bash install.sh"));

    let stored = registry.get(&request.id).unwrap();
    assert_eq!(stored.status, RequestStatus::Approved);
}

#[test]
fn approve_is_not_repeatable() {
    let registry = ApprovalRegistry::new();
    let request = registry.create_or_reuse("https://x/y", None);

    assert!(registry.approve(&request.id));
    assert!(!registry.approve(&request.id));
    assert!(!registry.deny(&request.id));
    // The key stays approved regardless.
    assert!(registry.is_approved("https://x/y"));
}

#[test]
fn deny_does_not_approve_the_key() {
    let registry = ApprovalRegistry::new();
    let request = registry.create_or_reuse("https://x/y", None);

    assert!(registry.deny(&request.id));
    assert!(!registry.is_approved("https://x/y"));
    assert_eq!(
        registry.get(&request.id).unwrap().status,
        RequestStatus::Rejected
    );
    // Terminal: cannot be approved afterwards.
    assert!(!registry.approve(&request.id));
}

#[test]
fn unknown_id_is_a_noop() {
    let registry = ApprovalRegistry::new();
    registry.create_or_reuse("https://x/y", None);

    let ghost = RequestId::from("deadbeef");
    assert!(!registry.approve(&ghost));
    assert!(!registry.deny(&ghost));
    assert!(registry.get(&ghost).is_none());
    assert_eq!(registry.list_pending().len(), 1);
    assert!(!registry.is_approved("https://x/y"));
}

#[test]
fn approval_outlives_the_request_object() {
    let registry = ApprovalRegistry::new();
    let request = registry.create_or_reuse("https://x/y", None);
    assert!(registry.approve(&request.id));

    // A later request for the same key would never be created by the
    // dispatcher (it checks is_approved first), but even if one is, the
    // key's approval is independent of it.
    let late = registry.create_or_reuse("https://x/y", None);
    assert!(registry.deny(&late.id));
    assert!(registry.is_approved("https://x/y"));
}

// -----------------------------------------------------------------------
// Racing decisions
// -----------------------------------------------------------------------

#[test]
fn racing_approve_and_deny_admit_exactly_one_winner() {
    for _ in 0..16 {
        let registry = Arc::new(ApprovalRegistry::new());
        let request = registry.create_or_reuse("https://x/y", None);

        let approver = {
            let registry = Arc::clone(&registry);
            let id = request.id.clone();
            thread::spawn(move || registry.approve(&id))
        };
        let denier = {
            let registry = Arc::clone(&registry);
            let id = request.id.clone();
            thread::spawn(move || registry.deny(&id))
        };

        let approved = approver.join().unwrap();
        let denied = denier.join().unwrap();
        assert!(approved ^ denied, "exactly one transition must win");

        let status = registry.get(&request.id).unwrap().status;
        assert_eq!(approved, status == RequestStatus::Approved);
        assert_eq!(approved, registry.is_approved("https://x/y"));
    }
}

// -----------------------------------------------------------------------
// Queries
// -----------------------------------------------------------------------

#[test]
fn list_pending_excludes_resolved_requests() {
    let registry = ApprovalRegistry::new();
    let a = registry.create_or_reuse("key-a", None);
    let b = registry.create_or_reuse("key-b", None);
    let c = registry.create_or_reuse("key-c", None);

    assert!(registry.approve(&a.id));
    assert!(registry.deny(&b.id));

    let pending = registry.list_pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, c.id);
}

#[test]
fn list_pending_is_in_creation_order() {
    let registry = ApprovalRegistry::new();
    let keys = ["key-a", "key-b", "key-c", "key-d"];
    let ids: Vec<_> = keys
        .iter()
        .map(|key| registry.create_or_reuse(*key, None).id)
        .collect();

    let listed: Vec<_> = registry.list_pending().into_iter().map(|r| r.id).collect();
    assert_eq!(listed, ids);
}

#[test]
fn get_returns_a_snapshot() {
    let registry = ApprovalRegistry::new();
    let request = registry.create_or_reuse("https://x/y", None);

    let snapshot = registry.get(&request.id).unwrap();
    assert!(registry.approve(&request.id));
    // The clone taken before the transition is unaffected.
    assert_eq!(snapshot.status, RequestStatus::Pending);
}

#[test]
fn debug_reports_counts() {
    let registry = ApprovalRegistry::new();
    registry.create_or_reuse("https://x/y", None);
    let rendered = format!("{registry:?}");
    assert!(rendered.contains("ApprovalRegistry"));
    assert!(rendered.contains("requests"));
}
