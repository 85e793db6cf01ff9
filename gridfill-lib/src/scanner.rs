//! Local installation scanner.
//!
//! Walks `<root>/userdata/<id>` and yields one [`Identity`] per user whose
//! `config/localconfig.vdf` is present.

use std::path::{Path, PathBuf};

use gridfill_core::{ActivityLog, Identity};

use crate::error::ScanError;
use crate::vdf;

/// Per-user settings file, relative to the user's userdata directory.
pub const SETTINGS_FILE: &str = "config/localconfig.vdf";

/// Lazy, single-use sequence of identities under an installation root.
///
/// Directory names are listed (and sorted) up front; settings files are only
/// read as the iterator advances.
#[derive(Debug)]
pub struct IdentityScan {
    root: PathBuf,
    dirs: std::vec::IntoIter<PathBuf>,
    skipped: Vec<PathBuf>,
    log: ActivityLog,
}

/// Start scanning the installation at `root`.
///
/// Fails if `<root>/userdata` does not exist.
pub fn scan_identities(root: &Path, log: &ActivityLog) -> Result<IdentityScan, ScanError> {
    let userdata = root.join("userdata");
    if !userdata.is_dir() {
        return Err(ScanError::MissingUserdata(userdata));
    }

    let entries = std::fs::read_dir(&userdata)?.collect::<Result<Vec<_>, _>>()?;
    let mut dirs: Vec<PathBuf> = entries
        .into_iter()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    Ok(IdentityScan {
        root: root.to_path_buf(),
        dirs: dirs.into_iter(),
        skipped: Vec::new(),
        log: log.clone(),
    })
}

impl IdentityScan {
    /// Settings files that were missing for users passed over so far.
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    fn read_identity(&mut self, dir: &Path) -> Result<Option<Identity>, ScanError> {
        // Users without settings are skipped before their id is looked at.
        let settings = dir.join(SETTINGS_FILE);
        if !settings.is_file() {
            self.log
                .warn(format!("Missing config: {}", settings.display()));
            self.skipped.push(settings);
            return Ok(None);
        }

        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let id32: u32 = dir_name
            .parse()
            .map_err(|_| ScanError::MalformedIdentity(dir_name.clone()))?;

        let text = std::fs::read_to_string(&settings)?;
        let doc = vdf::parse_vdf(&text).map_err(|message| ScanError::InvalidSettings {
            path: settings.clone(),
            message,
        })?;

        let display_name = match vdf::persona_name(&doc) {
            Some(name) => name.to_string(),
            None => {
                self.log.warn(format!(
                    "No persona name in {}, using account id",
                    settings.display()
                ));
                id32.to_string()
            }
        };

        Ok(Some(Identity::new(&self.root, display_name, id32)))
    }
}

impl Iterator for IdentityScan {
    type Item = Result<Identity, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(dir) = self.dirs.next() {
            match self.read_identity(&dir) {
                Ok(Some(identity)) => return Some(Ok(identity)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
