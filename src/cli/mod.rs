//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};
use crate::storage::FileStore;
use crate::vault::VaultStore;

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// CredVault CLI: encrypted credential manager.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Encrypted credential manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the vault file
    #[arg(
        long,
        default_value = ".credvault/vault.json",
        env = "CREDVAULT_VAULT",
        global = true
    )]
    pub vault: PathBuf,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new vault with a master password
    Init,

    /// Add or update a credential
    Add {
        /// Site domain (e.g. example.com)
        domain: String,
        /// Account username or email
        username: String,
        /// Password (omit for interactive prompt)
        password: Option<String>,
        /// Full URL of the login page
        #[arg(long, default_value = "")]
        url: String,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Retrieve a credential's password
    Get {
        /// Site domain
        domain: String,
        /// Account username or email
        username: String,
        /// Copy the password to the clipboard instead of printing it
        #[arg(short, long)]
        copy: bool,
    },

    /// List all credentials
    List,

    /// Find credentials for a domain (includes subdomain matches)
    Find {
        /// Domain to look up
        domain: String,
    },

    /// Delete a credential
    Delete {
        /// Site domain
        domain: String,
        /// Account username or email
        username: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Change the vault's master password
    RotateKey,

    /// Export credentials to a file or stdout
    Export {
        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Seal the export under a separate passphrase
        #[arg(short, long)]
        seal: bool,
    },

    /// Import credentials from an export file
    Import {
        /// Path to the file to import
        file: String,
    },

    /// Show or change vault settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Generate a random password
    Generate {
        /// Password length
        #[arg(short, long, default_value = "16")]
        length: usize,
        /// Exclude uppercase letters
        #[arg(long)]
        no_uppercase: bool,
        /// Exclude lowercase letters
        #[arg(long)]
        no_lowercase: bool,
        /// Exclude digits
        #[arg(long)]
        no_digits: bool,
        /// Exclude symbols
        #[arg(long)]
        no_symbols: bool,
        /// Copy the password to the clipboard instead of printing it
        #[arg(short, long)]
        copy: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Settings subcommands.
#[derive(clap::Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,

    /// Change one or more settings
    Set {
        /// Offer credentials for automatic form fill
        #[arg(long)]
        auto_fill: Option<bool>,
        /// Offer to save credentials from submitted forms
        #[arg(long)]
        auto_save: Option<bool>,
        /// Allow fill/save on plain-HTTP pages
        #[arg(long)]
        allow_http: Option<bool>,
        /// Minutes of inactivity before the session locks
        #[arg(long)]
        session_timeout: Option<u32>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the vault master password, trying in order:
/// 1. `CREDVAULT_PASSWORD` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used by `init`
/// and `rotate-key`).  Also respects `CREDVAULT_PASSWORD` for scripted
/// usage, and enforces a minimum length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(VaultError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation("Confirm master password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Prompt for an export passphrase, honoring `CREDVAULT_EXPORT_PASSPHRASE`.
pub fn prompt_export_passphrase(confirm: bool) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_EXPORT_PASSPHRASE") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let mut prompt = dialoguer::Password::new().with_prompt("Export passphrase");
    if confirm {
        prompt = prompt.with_confirmation("Confirm export passphrase", "Passphrases do not match");
    }
    let pw = prompt
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Open the vault file named by the CLI arguments.
pub fn open_vault(cli: &Cli) -> Result<VaultStore<FileStore>> {
    let store = FileStore::open(&cli.vault)?;
    Ok(VaultStore::new(store))
}

/// Open the vault and unlock it with a prompted master password.
///
/// Returns the unlocked vault together with the password, since some
/// commands (export, import, rotate-key) need to re-verify it.
pub fn unlock_vault(cli: &Cli) -> Result<(VaultStore<FileStore>, Zeroizing<String>)> {
    let mut vault = open_vault(cli)?;
    let password = prompt_password()?;
    vault.unlock(&password)?;
    Ok((vault, password))
}
