//! `credvault generate` — generate a random password.

use crate::cli::output;
use crate::crypto::{generate_password, PasswordSpec};
use crate::errors::{Result, VaultError};

/// Execute the `generate` command.
pub fn execute(
    length: usize,
    no_uppercase: bool,
    no_lowercase: bool,
    no_digits: bool,
    no_symbols: bool,
    copy: bool,
) -> Result<()> {
    let spec = PasswordSpec {
        length,
        uppercase: !no_uppercase,
        lowercase: !no_lowercase,
        digits: !no_digits,
        symbols: !no_symbols,
    };

    let password = generate_password(&spec)?;

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| VaultError::CommandFailed(format!("clipboard unavailable: {e}")))?;
        clipboard
            .set_text(password)
            .map_err(|e| VaultError::CommandFailed(format!("clipboard write failed: {e}")))?;
        output::success("Password copied to clipboard.");
    } else {
        println!("{password}");
    }

    Ok(())
}
