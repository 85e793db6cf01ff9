//! `env_logger` setup for the `--quiet`, `--verbose` and `--logfile` flags.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use indicatif::ProgressBar;
use log::LevelFilter;

use crate::error::CliError;

/// Spinner currently drawn on stderr, if any.
static ACTIVE_SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Keeps log records from tearing the attached spinner until dropped.
pub(crate) struct SpinnerGuard;

/// Print log records above `pb` while it is ticking.
pub(crate) fn attach_spinner(pb: &ProgressBar) -> SpinnerGuard {
    if let Ok(mut slot) = ACTIVE_SPINNER.lock() {
        *slot = Some(pb.clone());
    }
    SpinnerGuard
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        if let Ok(mut slot) = ACTIVE_SPINNER.lock() {
            *slot = None;
        }
    }
}

/// Stderr writer that suspends the active spinner for each record.
struct Terminal;

impl Write for Terminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let spinner = ACTIVE_SPINNER.lock().ok().and_then(|slot| slot.clone());
        match spinner {
            Some(pb) => pb.suspend(|| io::stderr().write_all(buf))?,
            None => io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Writes everything to the terminal and an ANSI-stripped copy to a file.
struct Tee {
    term: Terminal,
    file: strip_ansi_escapes::Writer<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.term.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.term.flush()?;
        self.file.flush()
    }
}

pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` still overrides the flag levels.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(quiet, verbose))
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper_util", LevelFilter::Warn)
        .parse_default_env();

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    match logfile {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(Tee {
                term: Terminal,
                file: strip_ansi_escapes::Writer::new(file),
            })));
        }
        None => {
            builder.target(env_logger::Target::Pipe(Box::new(Terminal)));
        }
    }

    builder
        .try_init()
        .map_err(|e| CliError::runtime(format!("Failed to install logger: {}", e)))
}
