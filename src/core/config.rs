//! Configuration file management.
//!
//! Handles reading and validating the optional `.opsync.toml` file. Values
//! here are defaults only; command-line flags and environment variables win.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Contents of `.opsync.toml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// 1Password CLI defaults
    #[serde(default)]
    pub op: OpConfig,
    /// kubectl defaults
    #[serde(default)]
    pub kubectl: KubectlConfig,
}

/// `[op]` section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpConfig {
    /// Default account (sign-in address, email, or account ID)
    pub account: Option<String>,
    /// Default vault (name or ID)
    pub vault: Option<String>,
    /// Path or name of the `op` binary
    pub program: Option<String>,
}

/// `[kubectl]` section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KubectlConfig {
    /// Path or name of the `kubectl` binary
    pub program: Option<String>,
    /// kubeconfig context to read from
    pub context: Option<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `./.opsync.toml` is tried, then
    /// the user config directory; if neither exists the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing explicit path, or a read,
    /// parse, or validation failure.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            return Self::load_from(path);
        }

        match Self::discover() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// First existing config file in the lookup order.
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(constants::CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }

        dirs::config_dir()
            .map(|dir| dir.join(constants::USER_CONFIG_FILE))
            .filter(|path| path.exists())
    }

    /// `op` binary to run.
    pub fn op_program(&self) -> &str {
        self.op.program.as_deref().unwrap_or(constants::OP_PROGRAM)
    }

    /// `kubectl` binary to run.
    pub fn kubectl_program(&self) -> &str {
        self.kubectl
            .program
            .as_deref()
            .unwrap_or(constants::KUBECTL_PROGRAM)
    }

    /// Reject blank values, which would otherwise become empty CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        let fields: [(&'static str, &Option<String>); 5] = [
            ("op.account", &self.op.account),
            ("op.vault", &self.op.vault),
            ("op.program", &self.op.program),
            ("kubectl.program", &self.kubectl.program),
            ("kubectl.context", &self.kubectl.context),
        ];

        for (field, value) in fields {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "cannot be empty".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
