//! Items command.

use crate::cli::output;
use crate::cli::session::Session;
use crate::cli::ScopeArgs;
use crate::error::Result;

/// List items of the selected vault.
///
/// Listings carry titles and IDs only; field values are never fetched.
pub fn execute(session: &Session, scope: ScopeArgs, json: bool) -> Result<()> {
    let scope = session.vault_scope(scope)?;
    let items = session.client().list_items(&scope)?;

    if json {
        output::raw(&serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        output::dimmed("no items");
        return Ok(());
    }

    output::section(&format!("{} items in {}", items.len(), scope.require_vault()?));
    for item in &items {
        output::kv(&item.id, &item.title);
    }

    Ok(())
}
