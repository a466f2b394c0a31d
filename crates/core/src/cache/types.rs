//! Cache record type and validity rules.

use serde::{Deserialize, Serialize};

use crate::catalog::{DetailMetadata, DownloadLink, NOT_AVAILABLE};

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// One cached detail resolution, as stored in the cache file.
///
/// Missing fields deserialize to values that fail validation, so a partial
/// record on disk reads as a miss rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Detail page URL (the cache key).
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "not_available")]
    pub size: String,
    #[serde(default = "not_available")]
    pub downloads: String,
    #[serde(default)]
    pub links: Vec<DownloadLink>,
    #[serde(default)]
    pub metadata: DetailMetadata,
    /// Seconds since the Unix epoch. Integer or fractional in the file.
    #[serde(default)]
    pub timestamp: f64,
}

impl CacheRecord {
    /// Younger than `ttl` seconds at `now`.
    pub fn is_fresh(&self, now: f64, ttl: u64) -> bool {
        now - self.timestamp < ttl as f64
    }

    /// Identifies a release and carries at least one link.
    pub fn is_complete(&self) -> bool {
        self.metadata.is_complete() && !self.links.is_empty()
    }

    /// Whether the record may be served from the cache.
    pub fn is_valid(&self, now: f64, ttl: u64) -> bool {
        self.is_fresh(now, ttl) && self.is_complete()
    }
}

/// Current time in fractional seconds since the Unix epoch.
pub fn now_epoch_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
