//! gridfill CLI
//!
//! Finds local Steam users, checks which of their titles lack portrait
//! library artwork and downloads replacements from SteamGridDB.

mod cli_types;
mod commands;
mod error;
mod logging;
mod spinner;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(2);
    }

    if let Err(e) = dispatch(cli.command, cli.quiet) {
        // Run failures were already reported by the run command.
        if !matches!(e, CliError::RunFailed(_)) {
            log::error!("{}", e);
        }
        std::process::exit(1);
    }
}

fn dispatch(command: Commands, quiet: bool) -> Result<(), CliError> {
    match command {
        Commands::Run {
            root,
            search,
            max_attempts,
            report,
        } => commands::run::run_artwork(root, search, max_attempts, report, quiet),
        Commands::Users { root } => commands::users::run_users(root),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::Save { root, search } => {
                commands::config::run_config_save(root, search)
            }
        },
    }
}
