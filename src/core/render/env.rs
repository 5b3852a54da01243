//! Env-style templates.

use std::fmt::Write;
use std::path::Path;

use crate::core::domain::SecretReference;

/// Render `KEY={{op://...}}` lines under a header naming the source item.
///
/// `template` and `restore_to` only appear in the restore command shown in
/// the header.
pub fn render(reference: &SecretReference, template: &Path, restore_to: &Path) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "# Generated by opsync. Values are 1Password references.");
    let _ = writeln!(out, "# account: {}", reference.account());
    let _ = writeln!(
        out,
        "# vault:   {} ({})",
        reference.vault_name(),
        reference.vault_id()
    );
    let _ = writeln!(
        out,
        "# item:    {} ({})",
        reference.item_name(),
        reference.item_id()
    );
    let _ = writeln!(out, "#");
    let _ = writeln!(out, "# Restore with:");
    let _ = writeln!(
        out,
        "#   op inject --account {} -i {} -o {}",
        reference.account(),
        template.display(),
        restore_to.display()
    );

    for field in reference.fields() {
        let _ = writeln!(out, "{}", field);
    }

    out
}
