//! Skillgate approval core — classification and request registry.
//!
//! This crate is the policy-and-approval heart of the Skillgate tool gate:
//! it decides whether a tool invocation constitutes a skill install
//! ([`classify`]) and tracks the resulting approval requests with sticky,
//! deduplicated approvals ([`ApprovalRegistry`]). The host-facing plumbing
//! (tool-call hook, chat commands, config) lives in `skillgate-plugin`.
//!
//! # Example
//!
//! ```
//! use skillgate_approval::{classify, ApprovalRegistry, ToolInvocation};
//!
//! let invocation =
//!     ToolInvocation::new("exec").with_param("command", "clawhub install weather");
//! let decision = classify(&invocation);
//! let key = decision.action_key().unwrap();
//!
//! let registry = ApprovalRegistry::new();
//! let request = registry.create_or_reuse(key, None);
//! assert!(!registry.is_approved(key));
//!
//! // A privileged actor approves; the key stays approved from then on.
//! assert!(registry.approve(&request.id));
//! assert!(registry.is_approved(key));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod classify;
pub mod patterns;
pub mod registry;
pub mod request;

pub use classify::{
    InterceptDecision, ToolInvocation, classify, extract_command, is_direct_install_tool,
    is_execution_tool,
};
pub use registry::ApprovalRegistry;
pub use request::{ApprovalRequest, RequestId, RequestStatus};
