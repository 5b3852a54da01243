//! Vault scoping and argument assembly.
//!
//! Every `op` invocation is described by an [`Operation`] plus the
//! [`VaultScope`] it runs in. [`build_args`] turns the pair into an argument
//! vector: positional words first, then caller extras, then one scope flag per
//! level the operation needs, then the fixed output format.

use crate::error::{Result, VaultError};

/// Account and vault an operation is addressed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultScope {
    account: Option<String>,
    vault: Option<String>,
}

impl VaultScope {
    pub fn new(account: Option<String>, vault: Option<String>) -> Self {
        Self { account, vault }
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn vault(&self) -> Option<&str> {
        self.vault.as_deref()
    }

    /// Copy of this scope pointing at `vault`.
    pub fn with_vault(&self, vault: impl Into<String>) -> Self {
        Self {
            account: self.account.clone(),
            vault: Some(vault.into()),
        }
    }

    /// The account, or `MissingScope` when unset.
    pub fn require_account(&self) -> Result<&str> {
        self.account()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| VaultError::MissingScope("account").into())
    }

    /// The vault, or `MissingScope` when unset.
    pub fn require_vault(&self) -> Result<&str> {
        self.vault()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| VaultError::MissingScope("vault").into())
    }
}

/// How much scope an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Unscoped,
    Account,
    Vault,
}

/// A vault CLI operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    ListAccounts,
    ListVaults,
    ListItems,
    GetItem(&'a str),
    CreateItem,
    EditItem(&'a str),
}

impl Operation<'_> {
    /// Name used in error context.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListAccounts => "list accounts",
            Self::ListVaults => "list vaults",
            Self::ListItems => "list items",
            Self::GetItem(_) => "get item",
            Self::CreateItem => "create item",
            Self::EditItem(_) => "edit item",
        }
    }

    pub fn level(&self) -> Level {
        match self {
            Self::ListAccounts => Level::Unscoped,
            Self::ListVaults => Level::Account,
            Self::ListItems | Self::GetItem(_) | Self::CreateItem | Self::EditItem(_) => {
                Level::Vault
            }
        }
    }

    fn positional(&self) -> Vec<&str> {
        match *self {
            Self::ListAccounts => vec!["account", "list"],
            Self::ListVaults => vec!["vault", "list"],
            Self::ListItems => vec!["item", "list"],
            Self::GetItem(item) => vec!["item", "get", item],
            Self::CreateItem => vec!["item", "create"],
            Self::EditItem(item) => vec!["item", "edit", item],
        }
    }
}

/// Assemble the argument vector for `operation` within `scope`.
///
/// # Errors
///
/// Returns `VaultError::MissingScope` if the operation's level needs an
/// account or vault that the scope does not carry.
pub fn build_args(scope: &VaultScope, operation: Operation<'_>, extra: &[&str]) -> Result<Vec<String>> {
    let mut args: Vec<String> = operation
        .positional()
        .into_iter()
        .chain(extra.iter().copied())
        .map(str::to_string)
        .collect();

    let level = operation.level();
    if level >= Level::Account {
        args.push("--account".to_string());
        args.push(scope.require_account()?.to_string());
    }
    if level >= Level::Vault {
        args.push("--vault".to_string());
        args.push(scope.require_vault()?.to_string());
    }

    args.push("--format".to_string());
    args.push("json".to_string());
    Ok(args)
}
