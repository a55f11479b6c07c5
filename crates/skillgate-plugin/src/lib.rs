//! Skillgate plugin — host-facing surfaces for the install gate.
//!
//! Wires the approval core (`skillgate-approval`) to a host runtime:
//!
//! - [`SkillInstallGate`] implements the before-tool-call hook that blocks
//!   unapproved skill installs.
//! - [`ApprovalCommands`] backs the `/approve`, `/deny`, and
//!   `/list-approvals` chat commands.
//! - [`GateConfig`] carries the admin allowlist.
//!
//! Both surfaces share one [`ApprovalRegistry`]; [`SkillApprovalPlugin`]
//! builds the pair around a fresh registry for hosts that want the whole
//! bundle in one call.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod config;
pub mod hook;

pub use commands::{ApprovalCommands, CommandReply};
pub use config::{ConfigError, GateConfig};
pub use hook::{HookVerdict, SkillInstallGate, ToolCallContext, ToolCallHook};

use skillgate_approval::ApprovalRegistry;
use std::sync::Arc;

/// The assembled plugin: one registry shared by both surfaces.
///
/// # Example
///
/// ```
/// use skillgate_plugin::{GateConfig, SkillApprovalPlugin};
///
/// let plugin = SkillApprovalPlugin::new(GateConfig::default());
/// let _hook = plugin.gate();
/// let _commands = plugin.commands();
/// ```
#[derive(Debug)]
pub struct SkillApprovalPlugin {
    registry: Arc<ApprovalRegistry>,
    gate: SkillInstallGate,
    commands: ApprovalCommands,
}

impl SkillApprovalPlugin {
    /// Build the plugin around a fresh registry.
    #[must_use]
    pub fn new(config: GateConfig) -> Self {
        let registry = Arc::new(ApprovalRegistry::new());
        Self {
            gate: SkillInstallGate::new(Arc::clone(&registry)),
            commands: ApprovalCommands::new(Arc::clone(&registry), config),
            registry,
        }
    }

    /// The before-tool-call hook to register with the dispatcher.
    #[must_use]
    pub fn gate(&self) -> &SkillInstallGate {
        &self.gate
    }

    /// The chat command handlers to register with the command surface.
    #[must_use]
    pub fn commands(&self) -> &ApprovalCommands {
        &self.commands
    }

    /// The shared registry (for inspection and tests).
    #[must_use]
    pub fn registry(&self) -> &ApprovalRegistry {
        &self.registry
    }
}
