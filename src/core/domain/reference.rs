//! Secret references.
//!
//! A [`SecretReference`] describes an uploaded item by vault-issued IDs and
//! field labels only. Templates embed [`FieldReference`] tokens which the
//! 1Password CLI (`op inject`) resolves back to plaintext at restore time.

use std::fmt;

use serde::Serialize;

use crate::core::constants::REFERENCE_SCHEME;
use crate::core::domain::ItemMatch;

/// Plaintext-free description of a created or updated item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretReference {
    account: String,
    vault_name: String,
    vault_id: String,
    item_name: String,
    item_id: String,
    field_labels: Vec<String>,
}

impl SecretReference {
    /// Build a reference from explicit parts. Label order is kept as given.
    pub fn new(
        account: impl Into<String>,
        vault_name: impl Into<String>,
        vault_id: impl Into<String>,
        item_name: impl Into<String>,
        item_id: impl Into<String>,
        field_labels: Vec<String>,
    ) -> Self {
        Self {
            account: account.into(),
            vault_name: vault_name.into(),
            vault_id: vault_id.into(),
            item_name: item_name.into(),
            item_id: item_id.into(),
            field_labels,
        }
    }

    /// Build a reference from a create/edit response.
    ///
    /// Purpose-bearing fields are dropped and labels are sorted ascending.
    pub fn from_item(account: &str, item: &ItemMatch) -> Self {
        Self::new(
            account,
            &item.vault.name,
            &item.vault.id,
            &item.title,
            &item.id,
            item.secret_labels(),
        )
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn vault_name(&self) -> &str {
        &self.vault_name
    }

    pub fn vault_id(&self) -> &str {
        &self.vault_id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn field_labels(&self) -> &[String] {
        &self.field_labels
    }

    /// Field references in label order.
    pub fn fields(&self) -> impl Iterator<Item = FieldReference<'_>> + '_ {
        self.field_labels.iter().map(move |label| FieldReference {
            label,
            token: reference_token(&self.vault_id, &self.item_id, label),
        })
    }
}

/// A single field label paired with its template token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReference<'a> {
    pub label: &'a str,
    pub token: String,
}

impl fmt::Display for FieldReference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.label, self.token)
    }
}

/// Template token for one field: `{{op://<vaultID>/<itemID>/<label>}}`.
pub fn reference_token(vault_id: &str, item_id: &str, label: &str) -> String {
    format!(
        "{{{{{}{}/{}/{}}}}}",
        REFERENCE_SCHEME, vault_id, item_id, label
    )
}
