//! Local-side plumbing: installation discovery, per-user settings and the
//! tool's own settings file.

pub mod error;
pub mod install;
pub mod scanner;
pub mod settings;
pub mod vdf;

pub use error::ScanError;
pub use install::{default_install_path, is_valid_install};
pub use scanner::{IdentityScan, SETTINGS_FILE, scan_identities};
pub use settings::{
    SettingSource, Settings, TOKEN_ENV, load_settings, load_settings_from, resolve_install_root,
    resolve_token, save_settings_to, settings_path,
};
