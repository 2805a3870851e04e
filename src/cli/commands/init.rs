//! `credvault init` — set up a new vault with a master password.

use crate::cli::output;
use crate::cli::{open_vault, prompt_new_password, Cli};
use crate::errors::Result;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut vault = open_vault(cli)?;

    if vault.is_initialized()? {
        output::tip("Use `credvault add` to store credentials in the existing vault.");
        return Err(crate::errors::VaultError::AlreadyInitialized);
    }

    // Prompt for a new master password (with confirmation).
    let password = prompt_new_password()?;

    vault.initialize(&password)?;

    output::success(&format!(
        "Vault created at {}",
        cli.vault.display()
    ));
    output::tip("Run `credvault add <DOMAIN> <USERNAME>` to add a credential.");
    output::tip("Run `credvault list` to see all credentials.");

    Ok(())
}
