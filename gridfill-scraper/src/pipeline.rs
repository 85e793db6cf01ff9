//! Artwork run orchestration.
//!
//! A run walks every identity of an installation in order: read the public
//! catalog, check each title for artwork, search the missing ones in batches
//! and write the chosen images. All I/O is sequential. The first fatal error
//! stops the run; files already written stay in place, so a rerun only
//! searches what is still missing.

use std::path::PathBuf;
use std::sync::Arc;

use gridfill_core::{ActivityLog, Identity, Title, chunk_titles, join_titles};
use gridfill_lib::scan_identities;

use crate::catalog::fetch_catalog;
use crate::error::ScrapeError;
use crate::media::{download_image, write_custom_art};
use crate::presence::{ArtPresence, RetryPolicy, check_presence};
use crate::report::{ReportEntry, RunReport};
use crate::search::{FailureKind, GridSelections, SearchQuery, search_batch};
use crate::transport::{Endpoints, HttpTransport};

/// Everything a run needs besides the transport.
#[derive(Debug, Clone)]
pub struct RunParams {
    /// Installation root containing `userdata/`
    pub root: PathBuf,
    pub query: SearchQuery,
    pub retry: RetryPolicy,
    pub endpoints: Endpoints,
}

/// Drives runs against one transport, reporting progress to an activity log.
#[derive(Debug)]
pub struct Pipeline<T> {
    transport: Arc<T>,
    log: ActivityLog,
}

impl<T: HttpTransport> Pipeline<T> {
    pub fn new(transport: T, log: ActivityLog) -> Self {
        Self::with_shared(Arc::new(transport), log)
    }

    pub fn with_shared(transport: Arc<T>, log: ActivityLog) -> Self {
        Self { transport, log }
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute one complete run.
    pub async fn run(&self, params: &RunParams) -> Result<RunReport, ScrapeError> {
        if params.query.token.trim().is_empty() {
            return Err(ScrapeError::Config(
                "No artwork search token configured".to_string(),
            ));
        }

        self.log.info("Started");
        let mut report = RunReport::new();

        let mut identities = scan_identities(&params.root, &self.log)?;
        for identity in identities.by_ref() {
            let identity = identity?;
            self.process_identity(params, &identity, &mut report)
                .await?;
            report.add_user();
        }
        for path in identities.skipped() {
            report.add(ReportEntry::SkippedUser { path: path.clone() });
        }

        self.log.info("Done");
        Ok(report)
    }

    async fn process_identity(
        &self,
        params: &RunParams,
        identity: &Identity,
        report: &mut RunReport,
    ) -> Result<(), ScrapeError> {
        let transport = self.transport.as_ref();
        let user = identity.display_name.clone();
        self.log.info(format!("User: {}", user));

        let mut candidates: Vec<Title> = Vec::new();
        for title in fetch_catalog(transport, &params.endpoints, identity).await? {
            let presence = check_presence(
                transport,
                &params.endpoints,
                identity,
                &title,
                &params.retry,
                &self.log,
            )
            .await?;

            match presence {
                ArtPresence::Official => {
                    self.log.info(format!("Game: {} has Steam art", title));
                    report.add(ReportEntry::OfficialArt {
                        user: user.clone(),
                        title,
                    });
                }
                ArtPresence::Custom => {
                    self.log.info(format!("Game: {} has custom art", title));
                    report.add(ReportEntry::CustomArt {
                        user: user.clone(),
                        title,
                    });
                }
                ArtPresence::Missing => {
                    self.log.info(format!("Game: {} has no art", title));
                    candidates.push(title);
                }
            }
        }

        for batch in chunk_titles(&candidates) {
            self.log
                .info(format!("Downloading games: {}", join_titles(batch)));
            let results = search_batch(transport, &params.endpoints, &params.query, batch).await?;

            let mut selections = GridSelections::new(results, batch, &self.log);
            for (image, position) in selections.by_ref() {
                let title = &batch[position];
                let bytes = download_image(transport, &image.url).await?;
                let path = write_custom_art(identity, title, &bytes).await?;
                self.log.info(format!("Written game {}", title));
                report.add(ReportEntry::Written {
                    user: user.clone(),
                    title: title.clone(),
                    path,
                });
            }

            for failure in selections.into_failures() {
                report.add(match failure.kind {
                    FailureKind::NotSuccess { status, errors } => ReportEntry::SearchFailed {
                        user: user.clone(),
                        title: failure.title,
                        status,
                        errors,
                    },
                    FailureKind::NoImages => ReportEntry::NoCandidates {
                        user: user.clone(),
                        title: failure.title,
                    },
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
