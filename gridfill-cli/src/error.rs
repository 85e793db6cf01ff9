use thiserror::Error;

use gridfill_lib::ScanError;
use gridfill_scraper::ScrapeError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Installation could not be read
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Transport setup or remote failure outside a run
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// The artwork run stopped on a fatal error
    #[error("Run failed: {0}")]
    RunFailed(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
