//! Core types shared by the gridfill crates: users, titles, art filters and
//! the run activity log.

use std::fmt;
use std::path::{Path, PathBuf};

pub mod activity;
pub mod art;
pub mod batch;

pub use activity::{ActivityLog, RunLog};
pub use art::{ArtKind, ArtParseError, ArtStyle};
pub use batch::{BATCH_SIZE, chunk_titles};

/// Offset that turns a 32-bit account id into the 64-bit community id.
pub const ID64_OFFSET: u64 = 0x0110_0001_0000_0000;

/// A local user profile found under `<root>/userdata/<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Per-user data directory (`<root>/userdata/<id32>`)
    pub userdata_root: PathBuf,

    /// Persona name read from the user's local settings
    pub display_name: String,

    /// Account id as it appears in the userdata directory name
    pub id32: u32,
}

impl Identity {
    pub fn new(install_root: &Path, display_name: impl Into<String>, id32: u32) -> Self {
        Self {
            userdata_root: install_root.join("userdata").join(id32.to_string()),
            display_name: display_name.into(),
            id32,
        }
    }

    /// 64-bit id used by the public community profile.
    pub fn id64(&self) -> u64 {
        u64::from(self.id32) + ID64_OFFSET
    }

    /// Directory the client reads custom library artwork from.
    pub fn grid_dir(&self) -> PathBuf {
        self.userdata_root.join("config").join("grid")
    }

    /// Portrait library art path for a title (`<grid>/<appid>p.png`).
    pub fn custom_art_path(&self, title: &Title) -> PathBuf {
        self.grid_dir().join(format!("{}p.png", title.app_id))
    }
}

/// An owned game or application.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title {
    pub app_id: u32,
    pub name: String,
}

impl Title {
    pub fn new(app_id: u32, name: impl Into<String>) -> Self {
        Self {
            app_id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.app_id, self.name)
    }
}

/// Join titles for a single log line (`620:Portal 2,400:Portal`).
pub fn join_titles(titles: &[Title]) -> String {
    titles
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
