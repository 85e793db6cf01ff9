//! Artwork search client: one grids request per batch of titles.

use gridfill_core::{ActivityLog, ArtKind, ArtStyle, Title};

use crate::error::ScrapeError;
use crate::transport::{Endpoints, HttpTransport};
use crate::types::{GridsData, GridsResponse, ImageCandidate, TitleGrids};

/// Portrait library art resolution requested from the search service.
pub const DIMENSIONS: &str = "600x900";

/// Filters and credentials applied to every search of a run.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub token: String,
    pub styles: Vec<ArtStyle>,
    pub kind: ArtKind,
}

impl SearchQuery {
    /// Grids URL for a batch: ids comma-joined in the path, filters as query
    /// parameters.
    pub fn grids_url(&self, endpoints: &Endpoints, batch: &[Title]) -> String {
        let ids = batch
            .iter()
            .map(|t| t.app_id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let styles = self
            .styles
            .iter()
            .map(|s| s.api_name())
            .collect::<Vec<_>>()
            .join(",");

        let mut url = format!("{}/grids/steam/{}?", endpoints.griddb, ids);
        if !styles.is_empty() {
            url.push_str(&format!("styles={}&", styles));
        }
        url.push_str(&format!(
            "dimensions={}&types={}",
            DIMENSIONS,
            self.kind.api_name()
        ));
        url
    }

    fn auth_header(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token))
    }
}

/// Outcome of the search for one title of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub position: usize,
    pub success: bool,
    pub status: i64,
    pub images: Vec<ImageCandidate>,
    pub errors: Vec<String>,
}

/// Why a title got no image from a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The service reported a failure for this title.
    NotSuccess { status: i64, errors: Vec<String> },
    /// The search succeeded but returned no images.
    NoImages,
}

/// A title of a batch that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialFailure {
    pub title: Title,
    pub kind: FailureKind,
}

/// Issue the grids search for one batch.
///
/// Returns one [`SearchResult`] per batch entry, in batch order.
pub async fn search_batch<T: HttpTransport>(
    transport: &T,
    endpoints: &Endpoints,
    query: &SearchQuery,
    batch: &[Title],
) -> Result<Vec<SearchResult>, ScrapeError> {
    let url = query.grids_url(endpoints, batch);
    let resp = transport.get(&url, &[query.auth_header()]).await?;
    if !resp.is_success() {
        return Err(ScrapeError::Status {
            context: "Artwork search".to_string(),
            status: resp.status,
        });
    }

    let envelope: GridsResponse = serde_json::from_slice(&resp.body)?;
    if !envelope.success {
        return Err(ScrapeError::Remote(format!(
            "Artwork search was not a success: {}",
            envelope.errors.join("; ")
        )));
    }

    // An empty array cannot be told apart from an empty flat image list.
    let data = match envelope.data {
        GridsData::PerTitle(entries) if entries.is_empty() && batch.len() == 1 => {
            GridsData::Single(Vec::new())
        }
        data => data,
    };

    match data {
        GridsData::PerTitle(entries) => {
            if entries.len() != batch.len() {
                return Err(ScrapeError::Remote(format!(
                    "Artwork search returned {} results for {} titles",
                    entries.len(),
                    batch.len()
                )));
            }
            Ok(entries
                .into_iter()
                .enumerate()
                .map(|(position, entry)| SearchResult::from_entry(position, entry))
                .collect())
        }
        GridsData::Single(images) if batch.len() == 1 => Ok(vec![SearchResult {
            position: 0,
            success: true,
            status: 200,
            images,
            errors: Vec::new(),
        }]),
        GridsData::Single(_) => Err(ScrapeError::Remote(format!(
            "Artwork search returned a single result for {} titles",
            batch.len()
        ))),
    }
}

impl SearchResult {
    fn from_entry(position: usize, entry: TitleGrids) -> Self {
        Self {
            position,
            success: entry.success,
            status: entry.status,
            images: entry.data,
            errors: entry.errors,
        }
    }
}

/// Iterator over the image chosen for each successful title of a batch.
///
/// Yields the first image of every successful result together with its
/// position in the batch. Failed and empty results are logged and kept in
/// [`GridSelections::failures`].
pub struct GridSelections<'a> {
    results: std::vec::IntoIter<SearchResult>,
    batch: &'a [Title],
    log: &'a ActivityLog,
    failures: Vec<PartialFailure>,
}

impl<'a> GridSelections<'a> {
    pub fn new(results: Vec<SearchResult>, batch: &'a [Title], log: &'a ActivityLog) -> Self {
        Self {
            results: results.into_iter(),
            batch,
            log,
            failures: Vec::new(),
        }
    }

    /// Titles skipped so far.
    pub fn failures(&self) -> &[PartialFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<PartialFailure> {
        self.failures
    }
}

impl Iterator for GridSelections<'_> {
    type Item = (ImageCandidate, usize);

    fn next(&mut self) -> Option<Self::Item> {
        for result in self.results.by_ref() {
            let Some(title) = self.batch.get(result.position) else {
                continue;
            };

            if !result.success {
                let mut line = format!("Game {} was not a success: {}", title, result.status);
                if !result.errors.is_empty() {
                    line.push_str(&format!(" ({})", result.errors.join("; ")));
                }
                self.log.warn(line);
                self.failures.push(PartialFailure {
                    title: title.clone(),
                    kind: FailureKind::NotSuccess {
                        status: result.status,
                        errors: result.errors,
                    },
                });
                continue;
            }

            match result.images.into_iter().next() {
                Some(image) => return Some((image, result.position)),
                None => {
                    self.log.warn(format!("There are no covers for {}", title));
                    self.failures.push(PartialFailure {
                        title: title.clone(),
                        kind: FailureKind::NoImages,
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
