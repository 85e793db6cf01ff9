use gridfill_lib::ScanError;

/// Errors that can occur during an artwork run.
///
/// Configuration problems and remote failures are fatal to the run. Per-title
/// search failures are not errors; they are logged and recorded in the report.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{context} returned HTTP {status}")]
    Status { context: String, status: u16 },

    #[error("Profile {0} does not exist")]
    ProfileNotFound(String),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Gave up on {url} after {attempts} attempts (last status {status})")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        status: u16,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl ScrapeError {
    /// Bad installation root, malformed identity or missing settings.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Scan(_))
    }

    /// Failure reported by (or while talking to) a remote service.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Status { .. }
                | Self::ProfileNotFound(_)
                | Self::Remote(_)
                | Self::RetriesExhausted { .. }
                | Self::Json(_)
        )
    }
}

/// Render an error and every error in its source chain, one per line.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        out.push_str("\n  caused by: ");
        out.push_str(&e.to_string());
        source = e.source();
    }
    out
}
