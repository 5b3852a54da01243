//! 1Password CLI client.
//!
//! [`VaultClient`] turns typed operations into `op` invocations through an
//! injected [`CommandRunner`] and decodes the JSON responses. It holds no
//! scope of its own: every call takes the [`VaultScope`] it runs in.

mod payload;
mod scope;

pub use payload::{FieldPayload, ItemPayload};
pub use scope::{build_args, Level, Operation, VaultScope};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::constants::{self, STDERR_ITEM_NOT_FOUND, STDERR_MORE_THAN_ONE_MATCH};
use crate::core::domain::{Account, ItemMatch, VaultInfo};
use crate::core::runner::CommandRunner;
use crate::error::{Result, RunnerError, VaultError};

/// Typed access to the `op` command surface.
#[derive(Debug, Clone)]
pub struct VaultClient<R> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> VaultClient<R> {
    /// Client invoking the default `op` program.
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            program: constants::OP_PROGRAM.to_string(),
        }
    }

    /// Use a different `op` binary (path or name).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Accounts signed in on this machine.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Command` or `VaultError::Decode` on failure.
    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        let operation = Operation::ListAccounts;
        let out = self.exec(&VaultScope::default(), operation, None)?;
        decode(operation, &out)
    }

    /// Vaults of the scope's account.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::MissingScope` without an account, or a command or
    /// decode failure.
    pub fn list_vaults(&self, scope: &VaultScope) -> Result<Vec<VaultInfo>> {
        let operation = Operation::ListVaults;
        let out = self.exec(scope, operation, None)?;
        decode(operation, &out)
    }

    /// Every item in the scope's vault, without fields.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::MissingScope` without an account and vault, or a
    /// command or decode failure.
    pub fn list_items(&self, scope: &VaultScope) -> Result<Vec<ItemMatch>> {
        let operation = Operation::ListItems;
        let out = self.exec(scope, operation, None)?;
        decode(operation, &out)
    }

    /// A single item by name or ID.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::ItemNotFound` or `VaultError::MoreThanOneItemMatches`
    /// when `op` reports those conditions, otherwise a command or decode failure.
    pub fn get_item(&self, scope: &VaultScope, item: &str) -> Result<ItemMatch> {
        let operation = Operation::GetItem(item);
        let out = self.exec(scope, operation, None)?;
        decode(operation, &out)
    }

    /// Create an item from a template.
    ///
    /// # Errors
    ///
    /// Returns a command, encode, or decode failure.
    pub fn create_item(&self, scope: &VaultScope, payload: &ItemPayload<'_>) -> Result<ItemMatch> {
        let operation = Operation::CreateItem;
        let body = payload.to_json()?;
        let out = self.exec(scope, operation, Some(body.as_slice()))?;
        decode(operation, &out)
    }

    /// Edit an existing item, addressed by ID, from a template.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::ItemNotFound` if the item vanished, otherwise a
    /// command, encode, or decode failure.
    pub fn edit_item(
        &self,
        scope: &VaultScope,
        item_id: &str,
        payload: &ItemPayload<'_>,
    ) -> Result<ItemMatch> {
        let operation = Operation::EditItem(item_id);
        let body = payload.to_json()?;
        let out = self.exec(scope, operation, Some(body.as_slice()))?;
        decode(operation, &out)
    }

    fn exec(
        &self,
        scope: &VaultScope,
        operation: Operation<'_>,
        stdin: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let args = build_args(scope, operation, &[])?;
        debug!(operation = operation.name(), program = %self.program, "invoking vault CLI");

        self.runner
            .run(&self.program, &args, stdin)
            .map_err(|err| classify(operation, err).into())
    }
}

/// Translate a runner failure into a vault error.
///
/// Item lookups report "not found" and "ambiguous" only as text on stderr;
/// those are mapped to sentinels callers can branch on.
fn classify(operation: Operation<'_>, err: RunnerError) -> VaultError {
    let item = match operation {
        Operation::GetItem(item) | Operation::EditItem(item) => Some(item),
        _ => None,
    };

    if let (Some(item), Some(stderr)) = (item, err.stderr()) {
        if stderr.contains(STDERR_ITEM_NOT_FOUND) {
            return VaultError::ItemNotFound(item.to_string());
        }
        if stderr.contains(STDERR_MORE_THAN_ONE_MATCH) {
            return VaultError::MoreThanOneItemMatches(item.to_string());
        }
    }

    VaultError::Command {
        operation: operation.name(),
        source: err,
    }
}

fn decode<T: DeserializeOwned>(operation: Operation<'_>, out: &[u8]) -> Result<T> {
    serde_json::from_slice(out).map_err(|source| {
        VaultError::Decode {
            operation: operation.name(),
            source,
        }
        .into()
    })
}
