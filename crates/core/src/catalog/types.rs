//! Types for catalog entries, item metadata and download links.

use serde::{Deserialize, Serialize};

/// Placeholder for any field the site did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// One entry from a search results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    /// Display title.
    pub title: String,
    /// Detail page URL, exactly as linked from the search page. Cache key.
    pub url: String,
    /// Background image reference of the thumbnail, if any.
    #[serde(default, rename = "image", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Size as known so far ("N/A" until a detail page has been parsed).
    #[serde(default = "not_available", rename = "size")]
    pub size_hint: String,
    /// Download counter shown by the site, if any.
    #[serde(default = "not_available", rename = "downloads")]
    pub downloads_hint: String,
}

impl CatalogSummary {
    /// Create a summary with placeholder size and download count.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            image_ref: None,
            size_hint: not_available(),
            downloads_hint: not_available(),
        }
    }

    /// Copy of this summary carrying a newer size.
    pub fn with_size(&self, size: impl Into<String>) -> Self {
        Self {
            size_hint: size.into(),
            ..self.clone()
        }
    }
}

/// Structured metadata from an item's detail page.
///
/// Always replaced as a whole, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailMetadata {
    #[serde(default = "not_available")]
    pub size: String,
    #[serde(default = "not_available")]
    pub version: String,
    #[serde(default = "not_available")]
    pub region: String,
    #[serde(default = "not_available")]
    pub cusa: String,
    #[serde(default = "not_available")]
    pub firmware: String,
    #[serde(default = "not_available")]
    pub voice: String,
    #[serde(default = "not_available")]
    pub subtitles: String,
    #[serde(default = "not_available")]
    pub password: String,
}

impl Default for DetailMetadata {
    fn default() -> Self {
        Self {
            size: not_available(),
            version: not_available(),
            region: not_available(),
            cusa: not_available(),
            firmware: not_available(),
            voice: not_available(),
            subtitles: not_available(),
            password: not_available(),
        }
    }
}

impl DetailMetadata {
    /// A record is only worth caching when it identifies the release:
    /// at least one of version or CUSA must be known.
    pub fn is_complete(&self) -> bool {
        self.version != NOT_AVAILABLE || self.cusa != NOT_AVAILABLE
    }
}

/// An outbound download reference.
///
/// Older cache files store bare URL strings; sources that group mirrors
/// store `{url, label, group}` objects. Both shapes deserialize here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DownloadLink {
    Plain(String),
    Grouped {
        url: String,
        #[serde(default)]
        label: String,
        #[serde(default)]
        group: String,
    },
}

impl DownloadLink {
    /// Target URL regardless of shape.
    pub fn url(&self) -> &str {
        match self {
            DownloadLink::Plain(url) => url,
            DownloadLink::Grouped { url, .. } => url,
        }
    }
}

impl From<String> for DownloadLink {
    fn from(url: String) -> Self {
        DownloadLink::Plain(url)
    }
}

impl From<&str> for DownloadLink {
    fn from(url: &str) -> Self {
        DownloadLink::Plain(url.to_string())
    }
}
