//! `credvault import` — import credentials from an export file.
//!
//! Credentials that already exist in the vault are left untouched;
//! only records with a new `(domain, username)` pair are added.

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{prompt_export_passphrase, unlock_vault, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::ExportDocument;

/// Execute the `import` command.
pub fn execute(cli: &Cli, file_path: &str) -> Result<()> {
    let source = Path::new(file_path);

    if !source.exists() {
        return Err(VaultError::CommandFailed(format!(
            "import file not found: {}",
            source.display()
        )));
    }

    let json = fs::read_to_string(source)
        .map_err(|e| VaultError::CommandFailed(format!("failed to read file: {e}")))?;

    // Peek at the document to see whether a passphrase is needed.
    let passphrase = if ExportDocument::from_json(&json)?.is_sealed() {
        Some(prompt_export_passphrase(false)?)
    } else {
        None
    };

    let (mut vault, password) = unlock_vault(cli)?;

    let added = vault.import(&json, &password, passphrase.as_deref().map(String::as_str))?;

    if added == 0 {
        output::info("No new credentials — everything in the file already exists.");
    } else {
        output::success(&format!("Imported {added} new credential(s)"));
    }

    Ok(())
}
