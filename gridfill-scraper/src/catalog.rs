//! Remote catalog reader: a user's owned titles from their public profile.
//!
//! The games page embeds the list as a script assignment
//! (`var rgGames = [...];`) immediately followed by `var rgChangingGames = [];`.

use std::sync::LazyLock;

use gridfill_core::{Identity, Title};
use regex::Regex;
use serde::Deserialize;

use crate::error::ScrapeError;
use crate::transport::{Endpoints, HttpTransport};

/// Body text served for private, deleted or never-created profiles.
const PROFILE_NOT_FOUND: &str = "The specified profile could not be found.";

static GAMES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)var rgGames = \[(?<json>.*)\];\r?\n\s*var rgChangingGames = \[\];")
        .expect("static pattern")
});

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    appid: u32,
    #[serde(default)]
    name: String,
}

/// Fetch the identity's public game list.
pub async fn fetch_catalog<T: HttpTransport>(
    transport: &T,
    endpoints: &Endpoints,
    identity: &Identity,
) -> Result<std::vec::IntoIter<Title>, ScrapeError> {
    let url = endpoints.profile_games(identity.id64());
    let resp = transport.get(&url, &[]).await?;
    if !resp.is_success() {
        return Err(ScrapeError::Status {
            context: format!("Game list for profile {}", identity.display_name),
            status: resp.status,
        });
    }

    let titles = parse_catalog(&resp.text(), &identity.display_name)?;
    log::debug!(
        "{} titles listed for {}",
        titles.len(),
        identity.display_name
    );
    Ok(titles.into_iter())
}

/// Extract the embedded title list from a profile games page.
///
/// A page without the embedded list is an error rather than an empty
/// library: it means the page layout changed or the request was redirected.
pub fn parse_catalog(html: &str, profile: &str) -> Result<Vec<Title>, ScrapeError> {
    if html.contains(PROFILE_NOT_FOUND) {
        return Err(ScrapeError::ProfileNotFound(profile.to_string()));
    }

    let json = GAMES_PATTERN
        .captures(html)
        .and_then(|caps| caps.name("json"))
        .ok_or_else(|| {
            ScrapeError::Remote(format!(
                "No game list found on the profile page for {}",
                profile
            ))
        })?
        .as_str();

    let entries: Vec<CatalogEntry> = serde_json::from_str(&format!("[{}]", json))?;
    Ok(entries
        .into_iter()
        .map(|e| Title::new(e.appid, e.name))
        .collect())
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
