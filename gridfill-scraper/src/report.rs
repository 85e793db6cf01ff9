use std::fmt;
use std::path::{Path, PathBuf};

use gridfill_core::Title;

/// Outcome of one title (or one skipped user) during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    OfficialArt {
        user: String,
        title: Title,
    },
    CustomArt {
        user: String,
        title: Title,
    },
    Written {
        user: String,
        title: Title,
        path: PathBuf,
    },
    SearchFailed {
        user: String,
        title: Title,
        status: i64,
        errors: Vec<String>,
    },
    NoCandidates {
        user: String,
        title: Title,
    },
    /// User directory without a local settings file
    SkippedUser {
        path: PathBuf,
    },
}

/// Per-title outcomes of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    entries: Vec<ReportEntry>,
    users: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub users: usize,
    pub skipped_users: usize,
    pub official: usize,
    pub custom: usize,
    pub written: usize,
    pub search_failed: usize,
    pub no_candidates: usize,
}

impl RunSummary {
    /// Titles looked at across all users.
    pub fn titles(&self) -> usize {
        self.official + self.custom + self.written + self.search_failed + self.no_candidates
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} users, {} titles: {} written, {} official, {} custom, {} without artwork",
            self.users,
            self.titles(),
            self.written,
            self.official,
            self.custom,
            self.search_failed + self.no_candidates
        )?;
        if self.skipped_users > 0 {
            write!(f, " ({} users skipped)", self.skipped_users)?;
        }
        Ok(())
    }
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// Count a user whose titles were processed.
    pub fn add_user(&mut self) {
        self.users += 1;
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Paths written during the run, in write order.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().filter_map(|e| match e {
            ReportEntry::Written { path, .. } => Some(path.as_path()),
            _ => None,
        })
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            users: self.users,
            ..RunSummary::default()
        };
        for entry in &self.entries {
            match entry {
                ReportEntry::OfficialArt { .. } => summary.official += 1,
                ReportEntry::CustomArt { .. } => summary.custom += 1,
                ReportEntry::Written { .. } => summary.written += 1,
                ReportEntry::SearchFailed { .. } => summary.search_failed += 1,
                ReportEntry::NoCandidates { .. } => summary.no_candidates += 1,
                ReportEntry::SkippedUser { .. } => summary.skipped_users += 1,
            }
        }
        summary
    }

    /// Write the report to a file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Artwork Report ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(file, "Users: {} ({} skipped)", summary.users, summary.skipped_users)?;
        writeln!(file, "Written: {}", summary.written)?;
        writeln!(file, "Official art: {}", summary.official)?;
        writeln!(file, "Custom art: {}", summary.custom)?;
        writeln!(file, "Search failed: {}", summary.search_failed)?;
        writeln!(file, "No covers: {}", summary.no_candidates)?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                ReportEntry::Written { user, title, path } => {
                    writeln!(file, "[WRITTEN] {} / {} -> {}", user, title, path.display())?;
                }
                ReportEntry::OfficialArt { user, title } => {
                    writeln!(file, "[OFFICIAL] {} / {}", user, title)?;
                }
                ReportEntry::CustomArt { user, title } => {
                    writeln!(file, "[CUSTOM] {} / {}", user, title)?;
                }
                ReportEntry::SearchFailed {
                    user,
                    title,
                    status,
                    errors,
                } => {
                    writeln!(file, "[FAILED] {} / {} (status {})", user, title, status)?;
                    for e in errors {
                        writeln!(file, "     Error: {}", e)?;
                    }
                }
                ReportEntry::NoCandidates { user, title } => {
                    writeln!(file, "[NO COVERS] {} / {}", user, title)?;
                }
                ReportEntry::SkippedUser { path } => {
                    writeln!(file, "[SKIPPED] missing {}", path.display())?;
                }
            }
        }

        Ok(())
    }
}
