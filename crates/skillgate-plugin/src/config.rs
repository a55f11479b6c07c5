//! Gate configuration — the privileged-actor allowlist.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the install gate.
///
/// # Allowlist semantics
///
/// An empty `admin_users` list means everyone may approve (the permissive
/// default for single-operator deployments). With a non-empty list, only
/// listed identities may approve or deny, and an absent sender identity is
/// never privileged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Identities allowed to approve and deny install requests.
    pub admin_users: Vec<String>,
}

impl GateConfig {
    /// Check whether a sender identity is privileged.
    #[must_use]
    pub fn is_admin(&self, sender_id: Option<&str>) -> bool {
        if self.admin_users.is_empty() {
            return true;
        }
        sender_id.is_some_and(|id| self.admin_users.iter().any(|admin| admin == id))
    }

    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid TOML for
    /// this structure.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its contents are not valid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        if config.admin_users.is_empty() {
            tracing::info!("no admin allowlist configured, anyone may approve installs");
        } else {
            tracing::info!(admins = config.admin_users.len(), "admin allowlist loaded");
        }
        Ok(config)
    }
}

/// Errors from loading gate configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`GateConfig`].
    #[error("invalid gate config: {0}")]
    Parse(#[from] toml::de::Error),
}
