//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.  Credential passwords are
//! never printed by the table helpers.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::CredentialRecord;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of credentials (Domain, Username, URL, Added).
///
/// Passwords and notes stay out of the table on purpose — use
/// `credvault get` to retrieve a single password.
pub fn print_credentials_table(records: &[CredentialRecord]) {
    if records.is_empty() {
        info("No credentials in this vault yet.");
        tip("Run `credvault add <DOMAIN> <USERNAME>` to add your first credential.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Domain", "Username", "URL", "Added"]);

    for r in records {
        table.add_row(vec![
            r.domain.clone(),
            r.username.clone(),
            r.url.clone(),
            r.date_added.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}
