pub(crate) mod config;
pub(crate) mod run;
pub(crate) mod users;

use std::path::PathBuf;

use gridfill_lib::{SettingSource, Settings, resolve_install_root};

use crate::error::CliError;

/// Installation root from flag, settings file or detection, or a hint on
/// how to set one.
pub(crate) fn require_root(flag: Option<PathBuf>, settings: &Settings) -> Result<PathBuf, CliError> {
    match resolve_install_root(flag, settings) {
        (Some(root), source) => {
            if source == SettingSource::Detected {
                log::debug!("Using detected installation {}", root.display());
            }
            Ok(root)
        }
        (None, _) => Err(CliError::config(
            "No Steam installation found; pass --root or run 'gridfill config save --root <path>'",
        )),
    }
}
