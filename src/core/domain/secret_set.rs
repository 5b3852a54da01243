//! Plaintext secret set.
//!
//! The only type in the crate that holds plaintext. Values are zeroed when the
//! set is dropped and never appear in `Debug` output.

use std::collections::BTreeMap;
use std::fmt;

use zeroize::Zeroize;

use crate::core::validation::validate_field_name;
use crate::error::Result;

/// Field name to plaintext value, iterated in ascending field-name order.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct SecretSet {
    entries: BTreeMap<String, String>,
}

impl SecretSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from key/value pairs. Later duplicates replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any field name is invalid.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (key, value) in pairs {
            set.insert(key, value)?;
        }
        Ok(set)
    }

    /// Insert a field, replacing (and zeroing) any previous value.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the field name is invalid.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        validate_field_name(&key)?;
        if let Some(mut old) = self.entries.insert(key, value.into()) {
            old.zeroize();
        }
        Ok(())
    }

    /// Plaintext value of a field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Field names in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Fields in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for SecretSet {
    fn drop(&mut self) {
        for value in self.entries.values_mut() {
            value.zeroize();
        }
    }
}

impl fmt::Debug for SecretSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.keys().map(|k| (k, "<redacted>")))
            .finish()
    }
}
