//! Records returned by the 1Password CLI.
//!
//! Only the attributes opsync needs are deserialized; field values are
//! deliberately absent so plaintext read back from the vault is discarded
//! during decoding.

use serde::{Deserialize, Serialize};

/// A signed-in 1Password account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub url: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_uuid: String,
    #[serde(default)]
    pub account_uuid: String,
}

/// A vault, as listed or as embedded in an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Field descriptor of an existing item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    /// Set on structural fields (USERNAME, PASSWORD, NOTES).
    #[serde(default)]
    pub purpose: String,
}

impl Field {
    /// Whether this is a structural field rather than a user secret.
    pub fn has_purpose(&self) -> bool {
        !self.purpose.is_empty()
    }
}

/// The vault's view of an existing item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMatch {
    pub id: String,
    pub title: String,
    pub vault: VaultInfo,
    #[serde(default)]
    pub category: String,
    /// Empty for `item list` responses, which omit fields.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl ItemMatch {
    /// Exact title or ID equality.
    pub fn matches(&self, name: &str) -> bool {
        self.title == name || self.id == name
    }

    /// Labels of fields without a purpose, ascending.
    pub fn secret_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .fields
            .iter()
            .filter(|f| !f.has_purpose())
            .map(|f| f.label.clone())
            .collect();
        labels.sort();
        labels
    }
}
