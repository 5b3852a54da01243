//! Accounts command.

use crate::cli::output;
use crate::cli::session::Session;
use crate::error::Result;

/// List accounts signed in to the 1Password CLI.
pub fn execute(session: &Session, json: bool) -> Result<()> {
    let accounts = session.client().list_accounts()?;

    if json {
        output::raw(&serde_json::to_string_pretty(&accounts)?);
    } else if accounts.is_empty() {
        output::dimmed("no accounts signed in");
        output::hint(&format!("run: {}", output::cmd("op signin")));
    } else {
        output::header(&format!("{} accounts:", accounts.len()));
        for account in &accounts {
            if account.email.is_empty() {
                output::list_item(&account.url);
            } else {
                output::list_item(&format!("{} ({})", account.url, account.email));
            }
        }
    }

    Ok(())
}
