//! Item lookup by name.
//!
//! `op item list` output is re-filtered locally: only items whose title or ID
//! is exactly the requested name count as matches.

use tracing::debug;

use crate::core::domain::ItemMatch;
use crate::core::runner::CommandRunner;
use crate::core::vault::{VaultClient, VaultScope};
use crate::error::{Error, ReconcileError, Result};

/// Finds existing items in one vault.
#[derive(Debug)]
pub struct ItemResolver<'a, R> {
    client: &'a VaultClient<R>,
    scope: &'a VaultScope,
}

impl<'a, R: CommandRunner> ItemResolver<'a, R> {
    pub fn new(client: &'a VaultClient<R>, scope: &'a VaultScope) -> Self {
        Self { client, scope }
    }

    /// All items whose title or ID equals `name`.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::Resolve` wrapping the vault failure.
    pub fn find(&self, name: &str) -> Result<Vec<ItemMatch>> {
        let items = self.client.list_items(self.scope).map_err(|err| match err {
            Error::Vault(source) => Error::from(ReconcileError::Resolve(source)),
            other => other,
        })?;

        let total = items.len();
        let matches: Vec<ItemMatch> = items.into_iter().filter(|i| i.matches(name)).collect();
        debug!(item = name, listed = total, matched = matches.len(), "filtered items");
        Ok(matches)
    }

    /// The single item named `name`, if any.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::Ambiguous` if more than one item matches, or
    /// the failure from [`find`](Self::find).
    pub fn resolve(&self, name: &str) -> Result<Option<ItemMatch>> {
        let mut matches = self.find(name)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            count => Err(ReconcileError::Ambiguous {
                item: name.to_string(),
                count,
            }
            .into()),
        }
    }
}
