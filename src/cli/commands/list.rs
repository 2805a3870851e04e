//! `credvault list` — display all credentials in a table.

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (mut vault, _password) = unlock_vault(cli)?;

    let set = vault.list()?;

    output::info(&format!("{} credential(s)", set.len()));
    output::print_credentials_table(set.records());

    Ok(())
}
