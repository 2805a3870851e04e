//! `credvault find` — look up credentials usable on a domain.
//!
//! Matching is subdomain-aware in both directions: a credential saved
//! for "example.com" is offered for "login.example.com", and one saved
//! for "accounts.google.com" is found when asking about "google.com".

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::Result;

/// Execute the `find` command.
pub fn execute(cli: &Cli, domain: &str) -> Result<()> {
    let (mut vault, _password) = unlock_vault(cli)?;

    let matches = vault.credentials_for_domain(domain)?;

    if matches.is_empty() {
        output::info(&format!("No credentials match '{domain}'."));
        return Ok(());
    }

    output::info(&format!("{} credential(s) match '{domain}'", matches.len()));
    output::print_credentials_table(&matches);

    Ok(())
}
