//! Tool-invocation classification.
//!
//! [`classify`] decides, from a tool name and its parameters, whether the
//! invocation is a skill-install action that must be held for approval, and
//! if so derives the canonical action key used for deduplication plus a
//! short preview for display. Pure and stateless — the caller owns all
//! follow-up (registry lookups, blocking, messaging).
//!
//! Two matching strategies, in order:
//!
//! 1. **Direct-install tools** — the tool name alone signals an install;
//!    the key is the skill source (`url`/`source` parameter) when present.
//! 2. **Execution tools** — shell-like tools whose command content is
//!    tested against the install-signature battery in [`crate::patterns`].
//!
//! Anything else passes through without parameter inspection.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::patterns;

/// Tool names that denote a skill install regardless of arguments.
const DIRECT_INSTALL_TOOLS: &[&str] = &["installSkill", "install_skill", "skills_install"];

/// Tool names that run arbitrary commands or write arbitrary files.
const EXEC_TOOLS: &[&str] = &[
    "exec",
    "system.run",
    "bash",
    "execute_command",
    "shell",
    "run_command",
    "Write",
];

/// Candidate parameter keys for the skill source of a direct-install tool.
const SOURCE_KEYS: &[&str] = &["url", "source"];

/// Candidate parameter keys for the command string of an execution tool.
const COMMAND_KEYS: &[&str] = &[
    "command",
    "cmd",
    "args",
    "input",
    "script",
    "content",
    "CommandLine",
];

/// Maximum action-key length for execution commands, in characters.
const KEY_MAX_CHARS: usize = 200;

/// Maximum preview length, in characters.
const PREVIEW_MAX_CHARS: usize = 100;

/// A tool invocation as received from the host dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Identifier of the invoked tool.
    pub tool_name: String,
    /// Tool-specific arguments.
    #[serde(default)]
    pub params: HashMap<String, Value>,
}

impl ToolInvocation {
    /// Create an invocation with no parameters.
    #[must_use]
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Outcome of classifying a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision")]
pub enum InterceptDecision {
    /// Not subject to interception — the invocation proceeds unmodified.
    Pass,
    /// Subject to interception.
    Intercept {
        /// Canonical identity of the underlying action. Stable and complete
        /// so repeated attempts deduplicate onto one request.
        action_key: String,
        /// Truncated human-readable summary, purely cosmetic.
        preview: String,
    },
}

impl InterceptDecision {
    /// Check whether the invocation was intercepted.
    #[must_use]
    pub fn is_intercepted(&self) -> bool {
        matches!(self, Self::Intercept { .. })
    }

    /// The action key, if intercepted.
    #[must_use]
    pub fn action_key(&self) -> Option<&str> {
        match self {
            Self::Intercept { action_key, .. } => Some(action_key),
            Self::Pass => None,
        }
    }

    /// The display preview, if intercepted.
    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        match self {
            Self::Intercept { preview, .. } => Some(preview),
            Self::Pass => None,
        }
    }
}

impl fmt::Display for InterceptDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Intercept { action_key, .. } => write!(f, "intercept: {action_key}"),
        }
    }
}

/// Check whether a tool name alone signals a skill install.
#[must_use]
pub fn is_direct_install_tool(tool_name: &str) -> bool {
    DIRECT_INSTALL_TOOLS.contains(&tool_name)
}

/// Check whether a tool runs arbitrary commands or file writes.
#[must_use]
pub fn is_execution_tool(tool_name: &str) -> bool {
    EXEC_TOOLS.contains(&tool_name)
}

/// Classify a tool invocation.
///
/// Direct-install tools are always intercepted; execution tools only when
/// their command content matches an install signature. The action key is
/// the skill source for direct tools (falling back to
/// `direct:<tool_name>` when none is discoverable) and
/// `exec:<trimmed command>` for execution tools.
#[must_use]
pub fn classify(invocation: &ToolInvocation) -> InterceptDecision {
    if is_direct_install_tool(&invocation.tool_name) {
        let action_key = first_string_param(&invocation.params, SOURCE_KEYS).map_or_else(
            || format!("direct:{}", invocation.tool_name),
            ToString::to_string,
        );
        return InterceptDecision::Intercept {
            preview: action_key.clone(),
            action_key,
        };
    }

    if is_execution_tool(&invocation.tool_name) {
        let Some(command) = extract_command(&invocation.params) else {
            return InterceptDecision::Pass;
        };
        if patterns::match_install_signature(&command).is_none() {
            return InterceptDecision::Pass;
        }
        return InterceptDecision::Intercept {
            action_key: format!("exec:{}", clip_chars(command.trim(), KEY_MAX_CHARS)),
            preview: clip_chars(&command, PREVIEW_MAX_CHARS).to_string(),
        };
    }

    InterceptDecision::Pass
}

/// Extract the command string from execution-tool parameters.
///
/// Tries the candidate keys in order, taking the first string value that is
/// non-empty after trimming (the raw, untrimmed string is returned). Falls
/// back to joining an `args` array with single spaces.
#[must_use]
pub fn extract_command(params: &HashMap<String, Value>) -> Option<String> {
    if let Some(command) = first_string_param(params, COMMAND_KEYS) {
        return Some(command.to_string());
    }

    // Some runners pass the command as a word list.
    if let Some(Value::Array(items)) = params.get("args") {
        let joined = items
            .iter()
            .map(|item| match item {
                Value::String(word) => word.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        if !joined.trim().is_empty() {
            return Some(joined);
        }
    }

    None
}

/// Look up the first candidate key holding a non-empty string value.
///
/// Values that are present but not strings (numbers, objects, arrays) never
/// count; neither do strings that are empty after trimming.
fn first_string_param<'p>(params: &'p HashMap<String, Value>, keys: &[&str]) -> Option<&'p str> {
    keys.iter().find_map(|key| {
        params
            .get(*key)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
    })
}

/// Clip a string to at most `max_chars` characters.
fn clip_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
