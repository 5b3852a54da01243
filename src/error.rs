//! Error types for opsync.
//!
//! Each concern has its own enum; all of them fold into [`Error`] so the
//! binary can map failures to exit codes and remediation hints in one place.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::constants;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures launching or running an external program.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("{program} not found on PATH")]
    NotInstalled { program: String },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}: {}", .code.map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string()), .stderr.trim())]
    Exited {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl RunnerError {
    /// Captured diagnostic output, when the program ran and failed.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Exited { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// Vault client failures.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("more than one item matches: {0}")]
    MoreThanOneItemMatches(String),

    #[error("{operation} failed: {source}")]
    Command {
        operation: &'static str,
        #[source]
        source: RunnerError,
    },

    #[error("{operation}: could not decode response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode item payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("no {0} selected")]
    MissingScope(&'static str),
}

/// Create-or-update decision failures.
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("item '{0}' already exists in the vault")]
    AlreadyExists(String),

    #[error("{count} items match '{item}'")]
    Ambiguous { item: String, count: usize },

    #[error("failed to filter items: {0}")]
    Resolve(#[source] VaultError),

    #[error("no fields to upload for '{0}'")]
    NoFields(String),
}

/// Template rendering failures.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{} already exists", .0.display())]
    TargetExists(PathBuf),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Data source failures.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read secret {namespace}/{name}: {source}")]
    Cluster {
        namespace: String,
        name: String,
        #[source]
        source: RunnerError,
    },

    #[error("failed to decode secret {namespace}/{name}: {source}")]
    Decode {
        namespace: String,
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("value of '{0}' is not valid base64")]
    InvalidBase64(String),

    #[error("value of '{0}' is not valid UTF-8")]
    NotUtf8(String),

    #[error("no secrets found in {0}")]
    Empty(String),
}

/// Configuration file failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Input validation failures.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("item name cannot be empty")]
    EmptyItemName,

    #[error("field name cannot be empty")]
    EmptyFieldName,

    #[error("invalid field name '{name}': {reason}")]
    InvalidFieldName { name: String, reason: String },

    #[error("invalid {kind} '{name}': {reason}")]
    InvalidDnsName {
        kind: &'static str,
        name: String,
        reason: String,
    },
}

impl Error {
    /// Process exit code for this failure.
    ///
    /// Conflict, ambiguity and not-found each get their own code so scripts can
    /// branch on them.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Reconcile(ReconcileError::AlreadyExists(_)) => constants::EXIT_CONFLICT,
            Self::Reconcile(ReconcileError::Ambiguous { .. })
            | Self::Vault(VaultError::MoreThanOneItemMatches(_)) => constants::EXIT_AMBIGUOUS,
            Self::Vault(VaultError::ItemNotFound(_)) => constants::EXIT_NOT_FOUND,
            _ => constants::EXIT_FAILURE,
        }
    }

    /// One-line remediation shown under the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Reconcile(ReconcileError::AlreadyExists(_)) => {
                Some("re-run with --overwrite to update the existing item")
            }
            Self::Reconcile(ReconcileError::Ambiguous { .. })
            | Self::Vault(VaultError::MoreThanOneItemMatches(_)) => {
                Some("rename the duplicates in 1Password or pass the item ID with --item")
            }
            Self::Vault(VaultError::ItemNotFound(_)) => {
                Some("drop --require-existing to create the item")
            }
            Self::Vault(VaultError::MissingScope(_)) => {
                Some("pass --account/--vault or set them in .opsync.toml")
            }
            Self::Render(RenderError::TargetExists(_)) => {
                Some("re-run with --force to replace the template")
            }
            Self::Source(SourceError::Cluster {
                source: RunnerError::NotInstalled { .. },
                ..
            }) => Some("install kubectl or set [kubectl] program in .opsync.toml"),
            _ => match self.runner_error() {
                Some(RunnerError::NotInstalled { .. }) => Some(
                    "install the 1Password CLI (https://developer.1password.com/docs/cli) or set [op] program in .opsync.toml",
                ),
                _ => None,
            },
        }
    }

    /// The process failure underneath, however deeply wrapped.
    pub fn runner_error(&self) -> Option<&RunnerError> {
        match self {
            Self::Vault(VaultError::Command { source, .. })
            | Self::Reconcile(ReconcileError::Resolve(VaultError::Command { source, .. }))
            | Self::Source(SourceError::Cluster { source, .. }) => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
