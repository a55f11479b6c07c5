//! Before-tool-call gate.
//!
//! [`SkillInstallGate`] is the dispatcher-facing surface: the host runtime
//! calls [`ToolCallHook::on_before_tool_call`] for every tool invocation
//! and either lets it through or blocks it with a message telling the user
//! how to get the install approved.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use skillgate_approval::{
    ApprovalRegistry, ApprovalRequest, InterceptDecision, ToolInvocation, classify,
    is_execution_tool,
};

/// Context accompanying a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallContext {
    /// The tool being invoked.
    pub tool_name: String,
    /// Opaque identity of the agent performing the call.
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Session the call belongs to.
    #[serde(default)]
    pub session_key: Option<String>,
}

impl ToolCallContext {
    /// Create a context for a tool name.
    #[must_use]
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            agent_id: None,
            session_key: None,
        }
    }

    /// Set the agent identity.
    #[must_use]
    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Set the session key.
    #[must_use]
    pub fn with_session_key(mut self, session_key: impl Into<String>) -> Self {
        self.session_key = Some(session_key.into());
        self
    }
}

/// What the host should do with the intercepted invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum HookVerdict {
    /// Let the invocation proceed unmodified.
    #[default]
    Pass,
    /// Block the invocation.
    Block {
        /// Human-readable message shown in place of the tool result.
        reason: String,
    },
}

impl HookVerdict {
    /// Create a blocking verdict.
    #[must_use]
    pub fn block(reason: impl Into<String>) -> Self {
        Self::Block {
            reason: reason.into(),
        }
    }

    /// Check whether this verdict blocks the invocation.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Block { .. })
    }

    /// The block reason, if blocking.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Block { reason } => Some(reason),
            Self::Pass => None,
        }
    }
}

/// Hook invoked by the host dispatcher before every tool call.
#[async_trait]
pub trait ToolCallHook: Send + Sync {
    /// Decide whether `invocation` may proceed.
    async fn on_before_tool_call(
        &self,
        invocation: &ToolInvocation,
        ctx: &ToolCallContext,
    ) -> HookVerdict;
}

/// The skill-install gate.
///
/// Classifies each invocation; intercepted actions pass only once their
/// action key has been approved, otherwise the invocation is blocked and a
/// pending request (one per key) is surfaced to the privileged actor.
#[derive(Debug)]
pub struct SkillInstallGate {
    registry: Arc<ApprovalRegistry>,
}

impl SkillInstallGate {
    /// Create a gate over a shared registry.
    #[must_use]
    pub fn new(registry: Arc<ApprovalRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this gate consults.
    #[must_use]
    pub fn registry(&self) -> &ApprovalRegistry {
        &self.registry
    }
}

#[async_trait]
impl ToolCallHook for SkillInstallGate {
    async fn on_before_tool_call(
        &self,
        invocation: &ToolInvocation,
        ctx: &ToolCallContext,
    ) -> HookVerdict {
        let InterceptDecision::Intercept {
            action_key,
            preview,
        } = classify(invocation)
        else {
            return HookVerdict::Pass;
        };

        if self.registry.is_approved(&action_key) {
            tracing::debug!(key = %action_key, "skill install already approved, passing through");
            return HookVerdict::Pass;
        }

        let request = self
            .registry
            .create_or_reuse(action_key, ctx.agent_id.clone());
        tracing::info!(
            id = %request.id,
            key = %request.action_key,
            agent = ctx.agent_id.as_deref().unwrap_or("unknown"),
            "blocking skill install pending approval"
        );
        HookVerdict::block(block_message(
            &request,
            &preview,
            is_execution_tool(&invocation.tool_name),
        ))
    }
}

/// Format the message shown when an install is held for approval.
///
/// Embeds the request id and the exact command a privileged actor can
/// paste to approve it. Execution tools show the detected command;
/// direct-install tools show the skill source (which is the action key).
fn block_message(request: &ApprovalRequest, preview: &str, exec_tool: bool) -> String {
    let detail = if exec_tool {
        format!("Detected skill install command: `{preview}`")
    } else {
        format!("Skill source: {preview}")
    };
    format!(
        "Approval required\n\
         \n\
         {detail}\n\
         Request id: {id}\n\
         \n\
         Ask an administrator to run:\n\
         `/approve {id}`",
        id = request.id,
    )
}
