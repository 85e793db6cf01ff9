//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gridfill_core::ArtStyle;

#[derive(Parser)]
#[command(name = "gridfill")]
#[command(about = "Fill in missing portrait library artwork for local Steam users", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Installation root override shared by every command that reads it.
#[derive(Args, Clone, Default)]
pub(crate) struct RootArgs {
    /// Steam installation root (defaults to the settings file, then auto-detection)
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}

/// Search filters shared by `run` and `config save`.
#[derive(Args, Clone, Default)]
pub(crate) struct SearchArgs {
    /// SteamGridDB API token (overrides STEAMGRIDDB_API_KEY and the settings file)
    #[arg(short, long)]
    pub token: Option<String>,

    /// Art styles to accept (alternate, blurred, white_logo, material, no_logo)
    #[arg(short, long, value_delimiter = ',')]
    pub styles: Option<Vec<ArtStyle>>,

    /// Ask for animated artwork instead of static images
    #[arg(long)]
    pub animated: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Download artwork for every title that has none
    Run {
        #[command(flatten)]
        root: RootArgs,

        #[command(flatten)]
        search: SearchArgs,

        /// Give up on a title's official-art check after this many attempts
        /// (default: retry until the CDN answers)
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Write a per-title report to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// List the users found in the installation
    Users {
        #[command(flatten)]
        root: RootArgs,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and where each value comes from
    Show,

    /// Print the settings file path
    Path,

    /// Store the given values in the settings file
    Save {
        #[command(flatten)]
        root: RootArgs,

        #[command(flatten)]
        search: SearchArgs,
    },
}
