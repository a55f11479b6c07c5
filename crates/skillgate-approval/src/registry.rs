//! In-memory registry of approval requests and sticky approvals.
//!
//! The [`ApprovalRegistry`] owns the only mutable state in the gate: the
//! request table and the set of action keys that have ever been approved.
//! Approval is sticky — once any request for a key is approved, the key
//! stays approved for the life of the process, independent of what happens
//! to the originating request object.
//!
//! All operations are total: unknown or already-resolved identifiers come
//! back as `false`/`None`, never as an error. Callers treat "request
//! vanished or already handled" as an ordinary outcome.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::request::{ApprovalRequest, RequestId, RequestStatus};

/// Request table and approved-key set, guarded together.
///
/// One lock covers both so `approve` can flip a request's status and
/// record its key as a single atomic unit.
#[derive(Default)]
struct RegistryState {
    requests: HashMap<RequestId, ApprovalRequest>,
    /// Creation order of every request id. Requests are never removed, so
    /// this stays in lockstep with `requests`.
    order: Vec<RequestId>,
    approved_keys: HashSet<String>,
}

/// Thread-safe registry of skill-install approval requests.
///
/// Constructed explicitly and shared (via `Arc`) between the tool-call
/// hook and the privileged-actor command surface; there is no process
/// global. State lives only for the process lifetime.
///
/// # Example
///
/// ```
/// use skillgate_approval::ApprovalRegistry;
///
/// let registry = ApprovalRegistry::new();
/// let request = registry.create_or_reuse("exec:bash install.sh", None);
/// assert!(registry.approve(&request.id));
/// assert!(registry.is_approved("exec:bash install.sh"));
/// ```
#[derive(Default)]
pub struct ApprovalRegistry {
    state: RwLock<RegistryState>,
}

impl ApprovalRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the pending request for `action_key`, creating one if none
    /// exists.
    ///
    /// The scan and the insert happen under one write lock, so concurrent
    /// interceptions of the same action can never race two independent
    /// pending requests into existence. Repeated calls before a decision
    /// return the identical request.
    pub fn create_or_reuse(
        &self,
        action_key: impl Into<String>,
        requester_id: Option<String>,
    ) -> ApprovalRequest {
        let action_key = action_key.into();
        let mut state = self.write();

        if let Some(existing) = state
            .requests
            .values()
            .find(|r| r.is_pending() && r.action_key == action_key)
        {
            return existing.clone();
        }

        let request = ApprovalRequest::new(action_key, requester_id);
        tracing::info!(id = %request.id, key = %request.action_key, "approval request created");
        state.order.push(request.id.clone());
        state.requests.insert(request.id.clone(), request.clone());
        request
    }

    /// Approve a pending request and mark its action key approved.
    ///
    /// Returns `false` without touching anything when the id is unknown or
    /// the request already left `Pending`.
    pub fn approve(&self, id: &RequestId) -> bool {
        let mut state = self.write();
        let key = {
            let Some(request) = state.requests.get_mut(id) else {
                return false;
            };
            if !request.is_pending() {
                return false;
            }
            request.status = RequestStatus::Approved;
            request.action_key.clone()
        };
        tracing::info!(%id, %key, "approval request granted");
        state.approved_keys.insert(key);
        true
    }

    /// Reject a pending request.
    ///
    /// Same lookup and guard as [`approve`](Self::approve); the
    /// approved-key set is not touched.
    pub fn deny(&self, id: &RequestId) -> bool {
        let mut state = self.write();
        let Some(request) = state.requests.get_mut(id) else {
            return false;
        };
        if !request.is_pending() {
            return false;
        }
        request.status = RequestStatus::Rejected;
        tracing::info!(%id, key = %request.action_key, "approval request rejected");
        true
    }

    /// Check whether an action key has ever been approved.
    #[must_use]
    pub fn is_approved(&self, action_key: &str) -> bool {
        self.read().approved_keys.contains(action_key)
    }

    /// Look up a request by id.
    #[must_use]
    pub fn get(&self, id: &RequestId) -> Option<ApprovalRequest> {
        self.read().requests.get(id).cloned()
    }

    /// All requests currently pending, in creation order.
    #[must_use]
    pub fn list_pending(&self) -> Vec<ApprovalRequest> {
        let state = self.read();
        state
            .order
            .iter()
            .filter_map(|id| state.requests.get(id))
            .filter(|r| r.is_pending())
            .cloned()
            .collect()
    }

    /// Total number of requests ever created.
    #[must_use]
    pub fn count(&self) -> usize {
        self.read().requests.len()
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(|poisoned| {
            tracing::warn!("approval registry read lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(|poisoned| {
            tracing::warn!("approval registry write lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl fmt::Debug for ApprovalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("ApprovalRegistry")
            .field("requests", &state.requests.len())
            .field("approved_keys", &state.approved_keys.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
