use clap::Parser;
use credvault::cli::{Cli, Commands, SettingsAction};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => credvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref domain,
            ref username,
            ref password,
            ref url,
            ref notes,
        } => credvault::cli::commands::add::execute(
            &cli,
            domain,
            username,
            password.as_deref(),
            url,
            notes,
        ),
        Commands::Get {
            ref domain,
            ref username,
            copy,
        } => credvault::cli::commands::get::execute(&cli, domain, username, copy),
        Commands::List => credvault::cli::commands::list::execute(&cli),
        Commands::Find { ref domain } => credvault::cli::commands::find::execute(&cli, domain),
        Commands::Delete {
            ref domain,
            ref username,
            force,
        } => credvault::cli::commands::delete::execute(&cli, domain, username, force),
        Commands::RotateKey => credvault::cli::commands::rotate::execute(&cli),
        Commands::Export { ref output, seal } => {
            credvault::cli::commands::export::execute(&cli, output.as_deref(), seal)
        }
        Commands::Import { ref file } => credvault::cli::commands::import_cmd::execute(&cli, file),
        Commands::Settings { ref action } => match action {
            SettingsAction::Show => credvault::cli::commands::settings_cmd::execute_show(&cli),
            SettingsAction::Set {
                auto_fill,
                auto_save,
                allow_http,
                session_timeout,
            } => credvault::cli::commands::settings_cmd::execute_set(
                &cli,
                *auto_fill,
                *auto_save,
                *allow_http,
                *session_timeout,
            ),
        },
        Commands::Generate {
            length,
            no_uppercase,
            no_lowercase,
            no_digits,
            no_symbols,
            copy,
        } => credvault::cli::commands::generate::execute(
            length,
            no_uppercase,
            no_lowercase,
            no_digits,
            no_symbols,
            copy,
        ),
        Commands::Completions { ref shell } => {
            credvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
