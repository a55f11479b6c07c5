//! Approval request entity and identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an approval request.
///
/// Short (8 lower-hex characters) so a human can relay it verbatim in chat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh random request ID.
    #[must_use]
    pub fn generate() -> Self {
        let mut hex = Uuid::new_v4().simple().to_string();
        hex.truncate(8);
        Self(hex)
    }

    /// View the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Lifecycle state of an approval request.
///
/// `Pending` is the sole initial state; the terminal states are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting a privileged decision.
    Pending,
    /// Approved — the action key is now permanently allowed.
    Approved,
    /// Rejected — the request is closed without allowing the key.
    Rejected,
}

impl RequestStatus {
    /// Check whether this status is terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// A request to approve one skill-install action.
///
/// Created by the registry when an intercepted action has no pending
/// request yet. Everything except `status` is immutable after creation;
/// `status` moves monotonically out of `Pending` exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Unique request identifier.
    pub id: RequestId,
    /// Canonical key of the action this request governs.
    pub action_key: String,
    /// Opaque identity of the agent/session that triggered interception.
    pub requester_id: Option<String>,
    /// Current lifecycle state.
    pub status: RequestStatus,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
}

impl ApprovalRequest {
    /// Create a new pending request for an action key.
    #[must_use]
    pub fn new(action_key: impl Into<String>, requester_id: Option<String>) -> Self {
        Self {
            id: RequestId::generate(),
            action_key: action_key.into(),
            requester_id,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Check whether the request is still awaiting a decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

impl fmt::Display for ApprovalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.id, self.action_key)
    }
}
