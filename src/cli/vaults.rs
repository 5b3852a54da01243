//! Vaults command.

use crate::cli::output;
use crate::cli::session::Session;
use crate::error::Result;

/// List vaults of the selected account.
pub fn execute(session: &Session, account: Option<String>, json: bool) -> Result<()> {
    let scope = session.account_scope(account)?;
    let vaults = session.client().list_vaults(&scope)?;

    if json {
        output::raw(&serde_json::to_string_pretty(&vaults)?);
        return Ok(());
    }

    if vaults.is_empty() {
        output::dimmed("no vaults");
        return Ok(());
    }

    output::section(&format!("{} vaults in {}", vaults.len(), scope.require_account()?));
    for vault in &vaults {
        output::kv(&vault.id, &vault.name);
    }

    Ok(())
}
