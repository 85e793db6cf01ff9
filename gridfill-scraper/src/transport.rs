//! HTTP seam between the pipeline and the network.
//!
//! Everything the pipeline fetches goes through [`HttpTransport`], so runs can
//! be driven against a scripted transport in tests.

use std::future::Future;

use tokio::time::Duration;

use crate::error::ScrapeError;

/// Browser-like user agent; the community site serves an error page to
/// unknown clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/74.0.3729.169 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Status code and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub(crate) fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Minimal GET-only HTTP client used by the pipeline.
pub trait HttpTransport: Send + Sync + 'static {
    /// GET `url` with extra headers and read the whole body.
    fn get(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
    ) -> impl Future<Output = Result<HttpResponse, ScrapeError>> + Send;

    /// GET `url` and report only the status code; the body is not read.
    fn get_status(&self, url: &str) -> impl Future<Output = Result<u16, ScrapeError>> + Send;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
    ) -> Result<HttpResponse, ScrapeError> {
        let mut request = self.http.get(url);
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        let resp = request.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();
        log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }

    async fn get_status(&self, url: &str) -> Result<u16, ScrapeError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status().as_u16();
        log::debug!("GET {} -> {}", url, status);
        Ok(status)
    }
}

/// Base URLs of the services a run talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Public community site hosting profile game lists
    pub community: String,
    /// CDN serving official library artwork
    pub cdn: String,
    /// Artwork search API (v2)
    pub griddb: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            community: "http://steamcommunity.com".to_string(),
            cdn: "http://cdn.akamai.steamstatic.com".to_string(),
            griddb: "https://www.steamgriddb.com/api/v2".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every service at sub-paths of one base URL.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            community: format!("{}/community", base),
            cdn: format!("{}/cdn", base),
            griddb: format!("{}/griddb", base),
        }
    }

    /// Public game list for a 64-bit profile id.
    pub fn profile_games(&self, id64: u64) -> String {
        format!("{}/profiles/{}/games?tab=all", self.community, id64)
    }

    /// Official 600x900 library art for a title.
    pub fn library_art(&self, app_id: u32) -> String {
        format!("{}/steam/apps/{}/library_600x900.jpg", self.cdn, app_id)
    }
}
