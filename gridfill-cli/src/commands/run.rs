use std::path::PathBuf;
use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gridfill_core::{ActivityLog, ArtKind};
use gridfill_lib::{Settings, resolve_token};
use gridfill_scraper::{
    Endpoints, Pipeline, ReqwestTransport, RetryPolicy, RunController, RunParams, RunReport,
    RunState, SearchQuery,
};

use crate::cli_types::{RootArgs, SearchArgs};
use crate::commands::require_root;
use crate::error::CliError;
use crate::{logging, spinner};

/// How often the run is polled for completion and new activity.
const POLL_TICK: Duration = Duration::from_millis(100);

/// Filters from flags, falling back to the settings file.
pub(crate) fn search_query(args: &SearchArgs, token: String, settings: &Settings) -> SearchQuery {
    let styles = args
        .styles
        .clone()
        .unwrap_or_else(|| settings.steamgriddb.styles.clone());
    let kind = if args.animated {
        ArtKind::Animated
    } else {
        settings.steamgriddb.kind
    };
    SearchQuery {
        token,
        styles,
        kind,
    }
}

/// Run the artwork pipeline to completion.
pub(crate) fn run_artwork(
    root: RootArgs,
    search: SearchArgs,
    max_attempts: Option<u32>,
    report_path: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let settings = gridfill_lib::load_settings();
    let root = require_root(root.root, &settings)?;

    let (token, source) = resolve_token(search.token.clone(), &settings);
    let Some(token) = token else {
        return Err(CliError::config(format!(
            "No SteamGridDB token; pass --token, set {} or run 'gridfill config save --token <token>'",
            gridfill_lib::TOKEN_ENV
        )));
    };
    log::debug!("Using token from {}", source);

    let params = RunParams {
        root: root.clone(),
        query: search_query(&search, token, &settings),
        retry: RetryPolicy {
            max_attempts,
            ..RetryPolicy::default()
        },
        endpoints: Endpoints::default(),
    };

    log::info!(
        "Filling artwork in: {}",
        root.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "{}",
        format!(
            "Styles: {}, type: {}",
            params
                .query
                .styles
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(","),
            params.query.kind
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("");

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

    let outcome = rt.block_on(async {
        let transport = ReqwestTransport::new()?;
        let mut controller = RunController::new(Pipeline::new(transport, ActivityLog::default()));
        controller.start(params);

        let pb = spinner::activity_spinner(quiet, "Starting...");
        let _attached = logging::attach_spinner(&pb);
        let mut seen = 0u64;
        let mut ticker = tokio::time::interval(POLL_TICK);
        let state = loop {
            ticker.tick().await;
            let (lines, next) = controller.log().lines_since(seen);
            seen = next;
            if let Some(last) = lines.last() {
                pb.set_message(last.clone());
            }
            match controller.poll() {
                RunState::Running => continue,
                state => break state,
            }
        };
        pb.finish_and_clear();
        Ok::<_, CliError>(state)
    })?;

    match outcome {
        RunState::Completed(report) => {
            print_summary(&report);
            if let Some(path) = report_path {
                report.write_to_file(&path)?;
                log::info!(
                    "Report written to {}",
                    path.display().if_supports_color(Stdout, |t| t.cyan()),
                );
            }
            Ok(())
        }
        RunState::Failed(message) => {
            log::error!(
                "{} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                message,
            );
            Err(CliError::RunFailed(message))
        }
        RunState::Idle | RunState::Running => Ok(()),
    }
}

fn print_summary(report: &RunReport) {
    let summary = report.summary();
    log::info!("");
    log::info!(
        "{} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary,
    );
    if summary.written > 0 {
        log::info!(
            "  {} {} images written",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            summary.written,
        );
    }
    let missing = summary.search_failed + summary.no_candidates;
    if missing > 0 {
        log::warn!(
            "  {} {} titles still without artwork",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            missing,
        );
    }
    if summary.skipped_users > 0 {
        log::warn!(
            "  {} {} users skipped (no local settings)",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            summary.skipped_users,
        );
    }
}
