//! `credvault rotate-key` — change the vault's master password.
//!
//! The whole hierarchy rotates: new salt, new master key, new
//! verification digest, and a new data encryption key.  The credential
//! set is re-encrypted and the replacement is committed as one atomic
//! write, so an interrupted rotation leaves the old password working.

use crate::cli::output;
use crate::cli::{open_vault, prompt_new_password, prompt_password, Cli};
use crate::errors::Result;

/// Execute the `rotate-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut vault = open_vault(cli)?;

    // 1. Unlock with the current password.
    output::info("Enter your current master password.");
    let old_password = prompt_password()?;
    vault.unlock(&old_password)?;

    let count = vault.list()?.len();

    // 2. Prompt for the new password.
    output::info("Choose your new master password.");
    let new_password = prompt_new_password()?;

    // 3. Rotate.
    vault.change_master_password(&old_password, &new_password)?;

    output::success(&format!(
        "Master password changed ({count} credential(s) re-encrypted)"
    ));

    Ok(())
}
