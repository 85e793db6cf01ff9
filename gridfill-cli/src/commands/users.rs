use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gridfill_core::ActivityLog;
use gridfill_lib::scan_identities;

use crate::cli_types::RootArgs;
use crate::commands::require_root;
use crate::error::CliError;

/// List the identities found under the installation root.
pub(crate) fn run_users(args: RootArgs) -> Result<(), CliError> {
    let settings = gridfill_lib::load_settings();
    let root = require_root(args.root, &settings)?;

    log::info!(
        "Users in: {}",
        root.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    let mut count = 0usize;
    for identity in scan_identities(&root, &ActivityLog::default())? {
        let identity = identity?;
        count += 1;
        log::info!(
            "  {} {}",
            identity.display_name.if_supports_color(Stdout, |t| t.bold()),
            format!("(id {}, profile {})", identity.id32, identity.id64())
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    if count == 0 {
        log::warn!(
            "{} No users with local settings found",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    Ok(())
}
