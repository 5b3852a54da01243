//! Per-invocation state shared by commands.
//!
//! A [`Session`] bundles the loaded config, the vault client, and the prompter,
//! and resolves which account and vault a command runs against:
//! flag (or `OP_ACCOUNT`/`OP_VAULT`) > config file > sole candidate > prompt.

use std::path::Path;

use tracing::debug;

use crate::cli::prompt::{self, Prompter};
use crate::cli::ScopeArgs;
use crate::core::config::Config;
use crate::core::runner::{CommandRunner, ProcessRunner};
use crate::core::vault::{VaultClient, VaultScope};
use crate::error::{Result, VaultError};

pub struct Session {
    config: Config,
    client: VaultClient<ProcessRunner>,
    prompter: Box<dyn Prompter>,
}

impl Session {
    /// Load config and wire up the `op` client and terminal prompter.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        let client = VaultClient::new(ProcessRunner).with_program(config.op_program());
        Ok(Self {
            config,
            client,
            prompter: prompt::for_terminal(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &VaultClient<ProcessRunner> {
        &self.client
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter.as_ref()
    }

    /// Scope carrying an account only.
    pub fn account_scope(&self, account: Option<String>) -> Result<VaultScope> {
        let account = choose_account(
            &self.client,
            self.prompter(),
            account.or_else(|| self.config.op.account.clone()),
        )?;
        Ok(VaultScope::new(Some(account), None))
    }

    /// Scope carrying both account and vault.
    pub fn vault_scope(&self, args: ScopeArgs) -> Result<VaultScope> {
        let scope = self.account_scope(args.account)?;
        let vault = choose_vault(
            &self.client,
            self.prompter(),
            &scope,
            args.vault.or_else(|| self.config.op.vault.clone()),
        )?;
        Ok(scope.with_vault(vault))
    }
}

/// The given account, or one picked from the signed-in accounts.
pub fn choose_account<R: CommandRunner>(
    client: &VaultClient<R>,
    prompter: &dyn Prompter,
    given: Option<String>,
) -> Result<String> {
    if let Some(account) = given {
        return Ok(account);
    }

    let accounts = client.list_accounts()?;
    let labels: Vec<String> = accounts
        .iter()
        .map(|a| match a.email.as_str() {
            "" => a.url.clone(),
            email => format!("{} ({})", a.url, email),
        })
        .collect();

    let index = pick(prompter, "Select a 1Password account", &labels, "account")?;
    debug!(account = %accounts[index].url, "selected account");
    Ok(accounts[index].url.clone())
}

/// The given vault, or one picked from the account's vaults.
pub fn choose_vault<R: CommandRunner>(
    client: &VaultClient<R>,
    prompter: &dyn Prompter,
    scope: &VaultScope,
    given: Option<String>,
) -> Result<String> {
    if let Some(vault) = given {
        return Ok(vault);
    }

    let vaults = client.list_vaults(scope)?;
    let labels: Vec<String> = vaults.iter().map(|v| v.name.clone()).collect();

    let index = pick(prompter, "Select a vault", &labels, "vault")?;
    debug!(vault = %vaults[index].name, id = %vaults[index].id, "selected vault");
    Ok(vaults[index].id.clone())
}

fn pick(prompter: &dyn Prompter, prompt: &str, labels: &[String], what: &'static str) -> Result<usize> {
    match labels.len() {
        0 => Err(VaultError::MissingScope(what).into()),
        1 => Ok(0),
        _ => prompter
            .select(prompt, labels)?
            .filter(|&i| i < labels.len())
            .ok_or_else(|| VaultError::MissingScope(what).into()),
    }
}
