use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the local installation.
///
/// Every variant is a configuration problem: the run cannot proceed against
/// this installation root until it is fixed.
#[derive(Debug, Error)]
pub enum ScanError {
    /// I/O error while reading the installation
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The installation root has no `userdata` directory
    #[error("No active users or invalid installation directory: {} is missing", .0.display())]
    MissingUserdata(PathBuf),

    /// A `userdata` subdirectory whose name is not a 32-bit account id
    #[error("Malformed user directory name: '{0}'")]
    MalformedIdentity(String),

    /// A per-user settings file that could not be parsed
    #[error("Invalid settings file {}: {message}", .path.display())]
    InvalidSettings { path: PathBuf, message: String },

    /// Settings file or install-path resolution problem
    #[error("Config error: {0}")]
    Config(String),
}

impl ScanError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
