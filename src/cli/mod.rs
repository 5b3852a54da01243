//! Command-line interface.

pub mod accounts;
pub mod completions;
pub mod items;
pub mod output;
pub mod prompt;
pub mod push;
pub mod session;
pub mod vaults;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::constants;
use crate::error::Result;
use session::Session;

/// opsync - mirror plaintext secrets into 1Password and keep only references.
#[derive(Parser)]
#[command(
    name = "opsync",
    about = "Mirror plaintext secrets into 1Password and emit op:// templates",
    version,
    after_help = "Restore plaintext later with `op inject`."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (default: ./.opsync.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Upload secrets to 1Password and write a reference template
    Push {
        #[command(subcommand)]
        source: PushSource,
    },

    /// List signed-in 1Password accounts
    Accounts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List vaults of an account
    Vaults {
        /// Account (sign-in address, email, or ID)
        #[arg(long, env = "OP_ACCOUNT")]
        account: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List items of a vault
    Items {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where the plaintext comes from.
#[derive(Subcommand)]
pub enum PushSource {
    /// Read KEY=value pairs from an env file
    Env {
        /// Path to the env file
        path: PathBuf,
        /// 1Password item name
        #[arg(long)]
        item: String,
        #[command(flatten)]
        options: PushOptions,
    },

    /// Read a Kubernetes Secret with kubectl
    Secret {
        /// Secret name
        name: String,
        /// Secret namespace
        #[arg(short, long, default_value = constants::DEFAULT_NAMESPACE)]
        namespace: String,
        /// 1Password item name (defaults to the secret name)
        #[arg(long)]
        item: Option<String>,
        #[command(flatten)]
        options: PushOptions,
    },
}

/// Account and vault selection.
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Account (sign-in address, email, or ID)
    #[arg(long, env = "OP_ACCOUNT")]
    pub account: Option<String>,
    /// Vault (name or ID)
    #[arg(long, env = "OP_VAULT")]
    pub vault: Option<String>,
}

/// Flags shared by every push source.
#[derive(Args, Debug, Clone, Default)]
pub struct PushOptions {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Template path to write
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Template format
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Update the item if it already exists
    #[arg(long)]
    pub overwrite: bool,

    /// Replace an existing template file
    #[arg(short, long)]
    pub force: bool,

    /// Only update an existing item; never create one
    #[arg(long, conflicts_with = "overwrite")]
    pub require_existing: bool,

    /// metadata.name of the rendered manifest
    #[arg(long, value_name = "NAME")]
    pub manifest_name: Option<String>,

    /// metadata.namespace of the rendered manifest
    #[arg(long, value_name = "NAMESPACE")]
    pub manifest_namespace: Option<String>,
}

/// Template formats.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// KEY={{op://...}} lines
    Env,
    /// Kubernetes Secret manifest
    Manifest,
}

/// Supported shells for completions.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    let session = || Session::load(cli.config.as_deref());

    match cli.command {
        Push { source } => match source {
            PushSource::Env {
                path,
                item,
                options,
            } => push::env(&session()?, path, item, options),
            PushSource::Secret {
                name,
                namespace,
                item,
                options,
            } => push::secret(&session()?, name, namespace, item, options),
        },
        Accounts { json } => accounts::execute(&session()?, json),
        Vaults { account, json } => vaults::execute(&session()?, account, json),
        Items { scope, json } => items::execute(&session()?, scope, json),
        Completions { shell } => completions::execute(shell),
    }
}
