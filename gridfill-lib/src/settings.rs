//! Persisted run parameters (`~/.config/gridfill/settings.toml`).
//!
//! The file carries the installation root, the artwork search token and the
//! style/type filters. Command-line flags and the environment override it.

use std::io;
use std::path::{Path, PathBuf};

use gridfill_core::{ArtKind, ArtStyle};
use serde::{Deserialize, Serialize};

use crate::error::ScanError;
use crate::install;

/// Environment variable consulted for the artwork search token.
pub const TOKEN_ENV: &str = "STEAMGRIDDB_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub steam: SteamSettings,
    #[serde(default)]
    pub steamgriddb: GridDbSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SteamSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDbSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "ArtStyle::defaults")]
    pub styles: Vec<ArtStyle>,
    #[serde(default)]
    pub kind: ArtKind,
}

impl Default for GridDbSettings {
    fn default() -> Self {
        Self {
            token: None,
            styles: ArtStyle::defaults(),
            kind: ArtKind::default(),
        }
    }
}

/// Where a resolved setting came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    /// Passed on the command line.
    Flag,
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the settings file.
    SettingsFile,
    /// Found by probing default install locations.
    Detected,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::SettingsFile => write!(f, "settings file"),
            Self::Detected => write!(f, "auto-detected"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gridfill").join("settings.toml")
}

/// Load settings from `path`. A missing file yields defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, ScanError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).map_err(|e| {
            ScanError::config(format!("Failed to parse {}: {}", path.display(), e))
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}

/// Load settings from the canonical path, falling back to defaults.
pub fn load_settings() -> Settings {
    let path = settings_path();
    load_settings_from(&path).unwrap_or_else(|e| {
        log::warn!("{}; using defaults", e);
        Settings::default()
    })
}

/// Write settings to `path` atomically, creating parent directories.
pub fn save_settings_to(path: &Path, settings: &Settings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(settings).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Resolve the search token: flag > environment > settings file.
pub fn resolve_token(flag: Option<String>, settings: &Settings) -> (Option<String>, SettingSource) {
    resolve_token_with(flag, std::env::var(TOKEN_ENV).ok(), settings)
}

fn resolve_token_with(
    flag: Option<String>,
    env: Option<String>,
    settings: &Settings,
) -> (Option<String>, SettingSource) {
    let non_empty = |s: &String| !s.trim().is_empty();
    if let Some(token) = flag.filter(non_empty) {
        return (Some(token), SettingSource::Flag);
    }
    if let Some(token) = env.filter(non_empty) {
        return (Some(token), SettingSource::EnvVar(TOKEN_ENV));
    }
    if let Some(token) = settings.steamgriddb.token.clone().filter(non_empty) {
        return (Some(token), SettingSource::SettingsFile);
    }
    (None, SettingSource::Missing)
}

/// Resolve the installation root: flag > settings file > detected default.
pub fn resolve_install_root(
    flag: Option<PathBuf>,
    settings: &Settings,
) -> (Option<PathBuf>, SettingSource) {
    if let Some(root) = flag {
        return (Some(root), SettingSource::Flag);
    }
    if let Some(root) = settings.steam.root.clone() {
        return (Some(root), SettingSource::SettingsFile);
    }
    match install::default_install_path() {
        Some(root) => (Some(root), SettingSource::Detected),
        None => (None, SettingSource::Missing),
    }
}
