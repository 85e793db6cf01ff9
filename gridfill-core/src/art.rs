//! Artwork search filters: visual styles and static/animated kind.

use serde::{Deserialize, Serialize};

/// Visual style filter accepted by the artwork search service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtStyle {
    Alternate,
    Blurred,
    WhiteLogo,
    Material,
    NoLogo,
}

const ALL_STYLES: &[ArtStyle] = &[
    ArtStyle::Alternate,
    ArtStyle::Blurred,
    ArtStyle::WhiteLogo,
    ArtStyle::Material,
    ArtStyle::NoLogo,
];

impl ArtStyle {
    /// Name sent in the `styles` query parameter.
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::Alternate => "alternate",
            Self::Blurred => "blurred",
            Self::WhiteLogo => "white_logo",
            Self::Material => "material",
            Self::NoLogo => "no_logo",
        }
    }

    pub fn all() -> &'static [ArtStyle] {
        ALL_STYLES
    }

    /// Styles enabled when nothing is configured.
    pub fn defaults() -> Vec<ArtStyle> {
        vec![Self::Alternate, Self::Blurred]
    }
}

impl std::fmt::Display for ArtStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Static images or animated ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtKind {
    #[default]
    Static,
    Animated,
}

impl ArtKind {
    /// Name sent in the `types` query parameter.
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Animated => "animated",
        }
    }
}

impl std::fmt::Display for ArtKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Error returned when a string is not a known style or kind.
#[derive(Debug, Clone)]
pub struct ArtParseError(pub String);

impl std::fmt::Display for ArtParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown art filter: '{}'", self.0)
    }
}

impl std::error::Error for ArtParseError {}

impl std::str::FromStr for ArtStyle {
    type Err = ArtParseError;

    /// Case-insensitive; accepts `white-logo` as well as `white_logo`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        ALL_STYLES
            .iter()
            .copied()
            .find(|style| style.api_name() == normalized)
            .ok_or_else(|| ArtParseError(s.to_string()))
    }
}

impl std::str::FromStr for ArtKind {
    type Err = ArtParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "animated" => Ok(Self::Animated),
            _ => Err(ArtParseError(s.to_string())),
        }
    }
}
