//! Artwork presence checks: official CDN art first, then local custom art.

use gridfill_core::{ActivityLog, Identity, Title};
use tokio::time::Duration;

use crate::error::ScrapeError;
use crate::transport::{Endpoints, HttpTransport, is_success};

/// Delay between attempts of the official-art check.
pub const RETRY_DELAY: Duration = Duration::from_millis(1500);

/// Retry behavior of the official-art check.
///
/// Unexpected statuses are retried after a fixed delay until the CDN answers
/// 2xx or 404. With `max_attempts` unset the loop never gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: RETRY_DELAY,
            max_attempts: None,
        }
    }
}

/// Where a title's artwork comes from, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtPresence {
    Official,
    Custom,
    Missing,
}

impl ArtPresence {
    pub fn is_missing(self) -> bool {
        self == ArtPresence::Missing
    }
}

/// Ask the CDN whether the title has official library art.
pub async fn has_official_art<T: HttpTransport>(
    transport: &T,
    endpoints: &Endpoints,
    title: &Title,
    policy: &RetryPolicy,
    log: &ActivityLog,
) -> Result<bool, ScrapeError> {
    let url = endpoints.library_art(title.app_id);
    let mut attempts = 0u32;

    loop {
        let status = transport.get_status(&url).await?;
        attempts += 1;

        if is_success(status) {
            return Ok(true);
        }
        if status == 404 {
            return Ok(false);
        }

        if let Some(max) = policy.max_attempts {
            if attempts >= max {
                return Err(ScrapeError::RetriesExhausted {
                    url,
                    attempts,
                    status,
                });
            }
        }

        log.warn(format!(
            "Received unknown status code {} for {}, retrying",
            status, title
        ));
        tokio::time::sleep(policy.delay).await;
    }
}

/// Whether artwork from an earlier run is already on disk.
///
/// Only existence is checked; the file content is not validated.
pub fn has_custom_art(identity: &Identity, title: &Title) -> bool {
    identity.custom_art_path(title).exists()
}

/// Run both checks; the local one only when the CDN has nothing.
pub async fn check_presence<T: HttpTransport>(
    transport: &T,
    endpoints: &Endpoints,
    identity: &Identity,
    title: &Title,
    policy: &RetryPolicy,
    log: &ActivityLog,
) -> Result<ArtPresence, ScrapeError> {
    if has_official_art(transport, endpoints, title, policy, log).await? {
        return Ok(ArtPresence::Official);
    }
    if has_custom_art(identity, title) {
        return Ok(ArtPresence::Custom);
    }
    Ok(ArtPresence::Missing)
}

#[cfg(test)]
#[path = "tests/presence_tests.rs"]
mod tests;
