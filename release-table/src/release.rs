use serde::Deserialize;
use url::Url;

/// A release as returned by the forge site's releases API. Only the fields this crate uses are
/// deserialized.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    /// The release description. The API returns `null` for releases created without one.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A single downloadable file attached to a release.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    // The API also has a `url` field, but that points at the API endpoint for the asset, not the
    // page a person can download it from.
    #[serde(rename = "browser_download_url")]
    pub url: Url,
}

impl Release {
    /// Returns the release description, treating a missing description as empty.
    #[must_use]
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// Returns the first release whose tag is exactly `version`.
#[must_use]
pub fn find_release<'a>(releases: &'a [Release], version: &str) -> Option<&'a Release> {
    releases.iter().find(|r| r.tag_name == version)
}
