//! Locating the client installation on this machine.

use std::path::{Path, PathBuf};

/// Files whose presence marks a directory as a client installation.
const MARKER_FILES: &[&str] = &["Steam.exe", "steam.sh"];

/// Returns true if `dir` looks like a client installation root.
///
/// Accepts either the client executable/launcher or an existing `userdata`
/// directory (some Linux packagings ship the launcher elsewhere).
pub fn is_valid_install(dir: &Path) -> bool {
    dir.is_dir()
        && (MARKER_FILES.iter().any(|f| dir.join(f).is_file()) || dir.join("userdata").is_dir())
}

/// Candidate installation roots for the current OS, in priority order.
pub fn candidate_install_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if cfg!(windows) {
        for var in ["ProgramFiles(x86)", "ProgramFiles"] {
            if let Some(dir) = std::env::var_os(var) {
                candidates.push(PathBuf::from(dir).join("Steam"));
            }
        }
    } else if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".local").join("share").join("Steam"));
        candidates.push(home.join(".steam").join("steam"));
        candidates.push(
            home.join("Library")
                .join("Application Support")
                .join("Steam"),
        );
    }

    candidates
}

/// First valid default installation root, if any.
pub fn default_install_path() -> Option<PathBuf> {
    let found = candidate_install_paths()
        .into_iter()
        .find(|p| is_valid_install(p));
    match &found {
        Some(p) => log::debug!("Detected installation at {}", p.display()),
        None => log::debug!("No default installation found"),
    }
    found
}
