//! Scripted transport and page builders shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use tokio::time::Instant;

use crate::error::ScrapeError;
use crate::transport::{HttpResponse, HttpTransport};

pub(crate) const BASE: &str = "http://fake";

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub at: Instant,
}

/// Transport answering from per-URL response queues.
///
/// The last queued response for a URL is repeated once the others are used
/// up. URLs with nothing queued answer 404.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    routes: Mutex<HashMap<String, VecDeque<HttpResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) {
        self.routes
            .lock()
            .unwrap()
            .entry(url.into())
            .or_default()
            .push_back(HttpResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, url: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url == url)
            .collect()
    }

    fn answer(&self, url: &str, headers: &[(&'static str, String)]) -> HttpResponse {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            at: Instant::now(),
        });

        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => HttpResponse::new(404, Vec::new()),
        }
    }
}

impl HttpTransport for FakeTransport {
    async fn get(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
    ) -> Result<HttpResponse, ScrapeError> {
        Ok(self.answer(url, headers))
    }

    async fn get_status(&self, url: &str) -> Result<u16, ScrapeError> {
        Ok(self.answer(url, &[]).status)
    }
}

/// A profile games page embedding `games`.
pub(crate) fn games_page(games: &[(u32, &str)]) -> String {
    let entries: Vec<String> = games
        .iter()
        .map(|(id, name)| serde_json::json!({ "appid": id, "name": name, "logo": "" }).to_string())
        .collect();
    format!(
        "<html><script>\n\t\tvar rgGames = [{}];\n\t\tvar rgChangingGames = [];\n</script></html>",
        entries.join(",")
    )
}

/// One image entry as the search API returns it.
pub(crate) fn image_json(id: u64, url: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "score": 0,
        "style": "alternate",
        "url": url,
        "thumb": format!("{}.thumb", url),
        "author": { "name": "artist", "steam64": "76561197960287930", "avatar": "" }
    })
}

/// Per-title search envelope; `None` marks a failed title.
pub(crate) fn grids_body(results: &[Option<Vec<serde_json::Value>>]) -> String {
    let data: Vec<serde_json::Value> = results
        .iter()
        .map(|r| match r {
            Some(images) => serde_json::json!({ "success": true, "status": 200, "data": images }),
            None => serde_json::json!({ "success": false, "status": 404, "errors": ["Game not found"] }),
        })
        .collect();
    serde_json::json!({ "success": true, "data": data }).to_string()
}

/// Create `<root>/userdata/<id32>/config/localconfig.vdf` naming the user.
pub(crate) fn write_user(root: &std::path::Path, id32: u32, persona: &str) {
    let config = root.join("userdata").join(id32.to_string()).join("config");
    std::fs::create_dir_all(&config).unwrap();
    std::fs::write(
        config.join("localconfig.vdf"),
        format!(
            "\"UserLocalConfigStore\"\n{{\n\t\"friends\"\n\t{{\n\t\t\"PersonaName\"\t\t\"{}\"\n\t}}\n}}\n",
            persona
        ),
    )
    .unwrap();
}

/// Run parameters pointing every service at [`BASE`].
pub(crate) fn run_params(root: &std::path::Path) -> crate::pipeline::RunParams {
    crate::pipeline::RunParams {
        root: root.to_path_buf(),
        query: crate::search::SearchQuery {
            token: "secret".to_string(),
            styles: gridfill_core::ArtStyle::defaults(),
            kind: gridfill_core::ArtKind::Static,
        },
        retry: crate::presence::RetryPolicy::default(),
        endpoints: crate::transport::Endpoints::with_base(BASE),
    }
}
