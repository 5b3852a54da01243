//! Create-or-update reconciliation.
//!
//! Decides, against the current vault contents, whether a secret set becomes a
//! new item or replaces the fields of an existing one, performs exactly one
//! remote write, and returns the resulting [`SecretReference`].
//!
//! ```text
//! resolve(name) ── 0 matches ──▶ create
//!               ── 1 match ────▶ overwrite? ── yes ─▶ edit
//!                                            └─ no ──▶ AlreadyExists
//!               ── 2+ matches ─▶ Ambiguous
//! ```

use tracing::{debug, info};

use crate::core::domain::{ItemMatch, SecretReference, SecretSet};
use crate::core::resolver::ItemResolver;
use crate::core::runner::CommandRunner;
use crate::core::validation::validate_item_name;
use crate::core::vault::{ItemPayload, VaultClient, VaultScope};
use crate::error::{ReconcileError, Result};

/// Reconciles secret sets against one vault.
#[derive(Debug)]
pub struct Reconciler<'a, R> {
    client: &'a VaultClient<R>,
    scope: &'a VaultScope,
}

impl<'a, R: CommandRunner> Reconciler<'a, R> {
    pub fn new(client: &'a VaultClient<R>, scope: &'a VaultScope) -> Self {
        Self { client, scope }
    }

    /// Create or update the item `item_name` with `fields`.
    ///
    /// The plaintext set is consumed and zeroed when this returns.
    ///
    /// # Errors
    ///
    /// - `ReconcileError::AlreadyExists` if one item matches and `overwrite` is false
    /// - `ReconcileError::Ambiguous` if more than one item matches
    /// - `ReconcileError::NoFields` if `fields` is empty
    /// - any vault failure from the lookup or the write
    pub fn reconcile(
        &self,
        item_name: &str,
        fields: SecretSet,
        overwrite: bool,
    ) -> Result<SecretReference> {
        check_request(item_name, &fields)?;

        let existing = ItemResolver::new(self.client, self.scope).resolve(item_name)?;
        match existing {
            None => self.create(item_name, &fields),
            Some(_) if !overwrite => Err(ReconcileError::AlreadyExists(item_name.to_string()).into()),
            Some(item) => self.update(&item, &fields),
        }
    }

    /// Update an item that must already exist, looked up with `op item get`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::ItemNotFound` instead of creating a missing item,
    /// `VaultError::MoreThanOneItemMatches` for ambiguous names, or any other
    /// vault failure.
    pub fn update_existing(&self, item_name: &str, fields: SecretSet) -> Result<SecretReference> {
        check_request(item_name, &fields)?;

        let item = self.client.get_item(self.scope, item_name)?;
        self.update(&item, &fields)
    }

    /// Create a new item holding `fields`.
    ///
    /// # Errors
    ///
    /// Returns any vault failure from the create call.
    pub fn create(&self, item_name: &str, fields: &SecretSet) -> Result<SecretReference> {
        info!(item = item_name, fields = fields.len(), "creating item");

        let payload = ItemPayload::for_create(item_name, fields);
        debug!(labels = ?payload.labels().collect::<Vec<_>>(), "create payload");

        let created = self.client.create_item(self.scope, &payload)?;
        self.reference(&created)
    }

    /// Replace the fields of `existing` with `fields`.
    ///
    /// Merging against the stored fields is left to the vault; fields absent
    /// from `fields` are not removed here.
    ///
    /// # Errors
    ///
    /// Returns any vault failure from the edit call.
    pub fn update(&self, existing: &ItemMatch, fields: &SecretSet) -> Result<SecretReference> {
        info!(item = %existing.title, id = %existing.id, fields = fields.len(), "updating item");

        let payload = ItemPayload::for_edit(&existing.title, fields);
        debug!(labels = ?payload.labels().collect::<Vec<_>>(), "edit payload");

        let updated = self.client.edit_item(self.scope, &existing.id, &payload)?;
        self.reference(&updated)
    }

    fn reference(&self, item: &ItemMatch) -> Result<SecretReference> {
        let account = self.scope.require_account()?;
        Ok(SecretReference::from_item(account, item))
    }
}

fn check_request(item_name: &str, fields: &SecretSet) -> Result<()> {
    validate_item_name(item_name)?;
    if fields.is_empty() {
        return Err(ReconcileError::NoFields(item_name.to_string()).into());
    }
    Ok(())
}
