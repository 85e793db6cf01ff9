pub mod catalog;
pub mod controller;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod presence;
pub mod report;
pub mod search;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use catalog::{fetch_catalog, parse_catalog};
pub use controller::{RunController, RunState};
pub use error::{ScrapeError, error_chain};
pub use media::{download_image, write_custom_art};
pub use pipeline::{Pipeline, RunParams};
pub use presence::{ArtPresence, RETRY_DELAY, RetryPolicy, check_presence};
pub use report::{ReportEntry, RunReport, RunSummary};
pub use search::{GridSelections, PartialFailure, SearchQuery, SearchResult, search_batch};
pub use transport::{Endpoints, HttpResponse, HttpTransport, ReqwestTransport};
