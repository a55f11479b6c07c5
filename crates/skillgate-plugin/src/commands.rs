//! Privileged-actor chat commands.
//!
//! Three commands drive the registry from the operator side: `/approve`
//! and `/deny` resolve a request by id, `/list-approvals` shows what is
//! waiting. Approve and deny are gated on the admin allowlist; listing is
//! read-only and open to everyone.

use std::sync::Arc;

use skillgate_approval::{ApprovalRegistry, RequestId};

use crate::config::GateConfig;

/// Reply returned to the chat surface by a command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReply {
    /// Text to show the sender.
    pub text: String,
}

impl CommandReply {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

const PERMISSION_DENIED: &str =
    "Permission denied: only administrators may manage install requests.";

/// Handlers for the approval commands.
///
/// Holds the shared registry and the allowlist; the host's command
/// registration wires each method to its chat command.
#[derive(Debug)]
pub struct ApprovalCommands {
    registry: Arc<ApprovalRegistry>,
    config: GateConfig,
}

impl ApprovalCommands {
    /// Create command handlers over a shared registry.
    #[must_use]
    pub fn new(registry: Arc<ApprovalRegistry>, config: GateConfig) -> Self {
        Self { registry, config }
    }

    /// Handle `/approve <request_id>`.
    pub fn approve(&self, sender_id: Option<&str>, args: Option<&str>) -> CommandReply {
        if !self.config.is_admin(sender_id) {
            return CommandReply::new(PERMISSION_DENIED);
        }
        let Some(id) = trimmed_arg(args) else {
            return CommandReply::new("Usage: /approve <request_id>");
        };

        let id = RequestId::from(id);
        if self.registry.approve(&id) {
            let action_key = self
                .registry
                .get(&id)
                .map_or_else(|| id.to_string(), |r| r.action_key);
            tracing::info!(%id, key = %action_key, sender = sender_id.unwrap_or("unknown"), "install approved");
            CommandReply::new(format!(
                "Approved: `{action_key}` may now be installed. Ask the agent to retry the install."
            ))
        } else {
            CommandReply::new(format!("Request `{id}` not found or already processed."))
        }
    }

    /// Handle `/deny <request_id>`.
    pub fn deny(&self, sender_id: Option<&str>, args: Option<&str>) -> CommandReply {
        if !self.config.is_admin(sender_id) {
            return CommandReply::new(PERMISSION_DENIED);
        }
        let Some(id) = trimmed_arg(args) else {
            return CommandReply::new("Usage: /deny <request_id>");
        };

        let id = RequestId::from(id);
        if self.registry.deny(&id) {
            let action_key = self
                .registry
                .get(&id)
                .map_or_else(|| id.to_string(), |r| r.action_key);
            tracing::info!(%id, key = %action_key, sender = sender_id.unwrap_or("unknown"), "install denied");
            CommandReply::new(format!(
                "Denied: the install request for `{action_key}` has been rejected."
            ))
        } else {
            CommandReply::new(format!("Request `{id}` not found or already processed."))
        }
    }

    /// Handle `/list-approvals`.
    pub fn list_pending(&self) -> CommandReply {
        let pending = self.registry.list_pending();
        if pending.is_empty() {
            return CommandReply::new("No pending install requests.");
        }
        let lines: Vec<String> = pending
            .iter()
            .map(|r| format!("- {}: {}", r.id, r.action_key))
            .collect();
        CommandReply::new(format!(
            "Pending install requests:\n\n{}",
            lines.join("\n")
        ))
    }
}

/// Strip surrounding whitespace from a free-text argument.
fn trimmed_arg(args: Option<&str>) -> Option<&str> {
    args.map(str::trim).filter(|s| !s.is_empty())
}
