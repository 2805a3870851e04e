//! `credvault export` — export credentials to a file or stdout.
//!
//! By default the export document holds plaintext credentials; pass
//! `--seal` to encrypt the record array under a separate passphrase.

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{prompt_export_passphrase, unlock_vault, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `export` command.
pub fn execute(cli: &Cli, output_path: Option<&str>, seal: bool) -> Result<()> {
    let (mut vault, password) = unlock_vault(cli)?;

    let passphrase = if seal {
        Some(prompt_export_passphrase(true)?)
    } else {
        None
    };

    let document = vault.export(&password, passphrase.as_deref().map(String::as_str))?;
    let content = document.to_json()?;

    if !seal {
        output::warning("Export is NOT passphrase-protected — the file holds plaintext credentials.");
    }

    match output_path {
        Some(dest) => {
            let dest_path = Path::new(dest);

            // Safety: refuse to overwrite the vault file itself.
            if dest_path == cli.vault {
                return Err(VaultError::CommandFailed(
                    "refusing to export over the vault file".into(),
                ));
            }

            fs::write(dest_path, &content).map_err(|e| {
                VaultError::CommandFailed(format!("failed to write export file: {e}"))
            })?;

            output::success(&format!("Exported credentials to {dest}"));
        }
        None => {
            // Write to stdout (no success message, just raw output).
            println!("{content}");
        }
    }

    Ok(())
}
