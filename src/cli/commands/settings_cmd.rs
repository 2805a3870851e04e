//! `credvault settings` — show or change vault settings.
//!
//! Settings live next to the encrypted material but are not encrypted,
//! so neither action requires the master password.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute `settings show`.
pub fn execute_show(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;
    let settings = vault.settings()?;

    println!("auto-fill:        {}", settings.auto_fill);
    println!("auto-save:        {}", settings.auto_save);
    println!("allow-http:       {}", settings.allow_http);
    println!("session-timeout:  {} minute(s)", settings.session_timeout_minutes);

    Ok(())
}

/// Execute `settings set`.
pub fn execute_set(
    cli: &Cli,
    auto_fill: Option<bool>,
    auto_save: Option<bool>,
    allow_http: Option<bool>,
    session_timeout: Option<u32>,
) -> Result<()> {
    let mut vault = open_vault(cli)?;
    let mut settings = vault.settings()?;

    if let Some(v) = auto_fill {
        settings.auto_fill = v;
    }
    if let Some(v) = auto_save {
        settings.auto_save = v;
    }
    if let Some(v) = allow_http {
        settings.allow_http = v;
    }
    if let Some(v) = session_timeout {
        settings.session_timeout_minutes = v;
    }

    vault.save_settings(&settings)?;
    output::success("Settings updated.");

    Ok(())
}
