//! Item templates sent to `op item create` / `op item edit` on stdin.

use serde::Serialize;
use zeroize::Zeroizing;

use crate::core::constants::{FIELD_TYPE_CONCEALED, ITEM_CATEGORY};
use crate::core::domain::SecretSet;
use crate::error::{Result, VaultError};

/// JSON item template.
#[derive(Debug, Serialize)]
pub struct ItemPayload<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'static str>,
    fields: Vec<FieldPayload<'a>>,
}

/// One concealed field of an item template.
#[derive(Serialize)]
pub struct FieldPayload<'a> {
    id: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    field_type: Option<&'static str>,
    label: &'a str,
    value: &'a str,
}

impl std::fmt::Debug for FieldPayload<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldPayload")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<'a> ItemPayload<'a> {
    /// Template for a new item: fixed category, every field concealed.
    pub fn for_create(title: &'a str, fields: &'a SecretSet) -> Self {
        Self {
            title,
            category: Some(ITEM_CATEGORY),
            fields: field_list(fields, Some(FIELD_TYPE_CONCEALED)),
        }
    }

    /// Template for an existing item. Field types are already known remotely.
    pub fn for_edit(title: &'a str, fields: &'a SecretSet) -> Self {
        Self {
            title,
            category: None,
            fields: field_list(fields, None),
        }
    }

    /// Field labels in submission order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.label)
    }

    /// Encode for the runner's input channel. The buffer is zeroed on drop.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Encode` if serialization fails.
    pub fn to_json(&self) -> Result<Zeroizing<Vec<u8>>> {
        serde_json::to_vec(self)
            .map(Zeroizing::new)
            .map_err(|e| VaultError::Encode(e).into())
    }
}

// SecretSet iterates in ascending key order, so the template does too.
fn field_list<'a>(fields: &'a SecretSet, field_type: Option<&'static str>) -> Vec<FieldPayload<'a>> {
    fields
        .iter()
        .map(|(name, value)| FieldPayload {
            id: name,
            field_type,
            label: name,
            value,
        })
        .collect()
}
