//! Domain types.

pub(crate) mod env;
mod item;
mod reference;
mod secret_set;

pub use item::{Account, Field, ItemMatch, VaultInfo};
pub use reference::{reference_token, FieldReference, SecretReference};
pub use secret_set::SecretSet;
