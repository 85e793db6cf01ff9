use serde::Deserialize;

/// Top-level envelope returned by the grids search endpoint.
#[derive(Debug, Deserialize)]
pub struct GridsResponse {
    pub success: bool,
    #[serde(default)]
    pub data: GridsData,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Payload of a grids search.
///
/// Multi-id requests answer with one entry per requested id. A single-id
/// request may answer with the image list directly.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GridsData {
    PerTitle(Vec<TitleGrids>),
    Single(Vec<ImageCandidate>),
}

impl Default for GridsData {
    fn default() -> Self {
        GridsData::PerTitle(Vec::new())
    }
}

/// Search result for one requested title.
#[derive(Debug, Deserialize)]
pub struct TitleGrids {
    pub success: bool,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub data: Vec<ImageCandidate>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// One artwork image offered by the search service.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ImageCandidate {
    pub id: u64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub style: String,
    pub url: String,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub author: Option<Author>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Author {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steam64: String,
    #[serde(default)]
    pub avatar: String,
}
