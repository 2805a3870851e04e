//! `credvault get` — retrieve a single credential's password.

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `get` command.
pub fn execute(cli: &Cli, domain: &str, username: &str, copy: bool) -> Result<()> {
    let (mut vault, _password) = unlock_vault(cli)?;

    let set = vault.list()?;
    let record = set.find(domain, username).ok_or(VaultError::NotFound)?;

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| VaultError::CommandFailed(format!("clipboard unavailable: {e}")))?;
        clipboard
            .set_text(record.password.clone())
            .map_err(|e| VaultError::CommandFailed(format!("clipboard write failed: {e}")))?;
        output::success("Password copied to clipboard.");
    } else {
        println!("{}", record.password);
    }

    Ok(())
}
