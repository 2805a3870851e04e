//! `credvault add` — add or update a credential.

use std::io::{self, IsTerminal, Read};

use chrono::Utc;

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::CredentialRecord;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    domain: &str,
    username: &str,
    password: Option<&str>,
    url: &str,
    notes: &str,
) -> Result<()> {
    // Determine the credential password from one of three sources.
    let credential_password = if let Some(p) = password {
        // Source 1: Inline value on the command line.
        output::warning("Password provided on command line — it may appear in shell history.");
        p.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 3: Interactive secure prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Password for {username} at {domain}"))
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?
    };

    let (mut vault, _password) = unlock_vault(cli)?;

    let existed = vault.list()?.contains(domain, username);

    vault.upsert(CredentialRecord {
        domain: domain.to_string(),
        url: url.to_string(),
        username: username.to_string(),
        password: credential_password,
        notes: notes.to_string(),
        date_added: Utc::now(),
    })?;

    if existed {
        output::success(&format!("Credential for {username} at {domain} updated"));
    } else {
        output::success(&format!("Credential for {username} at {domain} added"));
    }

    Ok(())
}
