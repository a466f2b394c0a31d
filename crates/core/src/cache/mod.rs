//! Link cache - persisted results of previous detail resolutions.
//!
//! Keyed by the item's detail page URL. A stored record only counts as a hit
//! while it is fresh and complete (see [`CacheRecord::is_valid`]); anything
//! else reads as absent.

mod json_file;
mod memory;
mod types;

pub use json_file::JsonFileCache;
pub use memory::MemoryCache;
pub use types::*;

use crate::catalog::{DetailMetadata, DownloadLink};

/// Errors raised while reading or writing the cache file.
///
/// These never reach callers of [`LinkCache`]: they are logged and the
/// operation degrades to an empty cache or a memory-only write.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize cache: {0}")]
    Serialize(String),

    #[error("cache file is not a JSON object: {0}")]
    Parse(String),
}

/// Trait for link cache storage.
pub trait LinkCache: Send + Sync {
    /// Replace the in-memory mapping with the persisted one.
    ///
    /// Never fails: a missing or corrupt store yields an empty cache.
    /// Returns the number of records loaded.
    fn load(&self) -> usize;

    /// Valid record for `key` as of `now` (epoch seconds).
    fn get_at(&self, key: &str, now: f64) -> Option<CacheRecord>;

    /// Upsert a prebuilt record, then persist.
    fn insert(&self, record: CacheRecord);

    /// Number of stored records, valid or not.
    fn len(&self) -> usize;

    /// Drop every record, then persist.
    fn clear(&self);

    /// Maximum record age in seconds.
    fn ttl(&self) -> u64;

    /// Valid record for `key`, if any.
    fn get(&self, key: &str) -> Option<CacheRecord> {
        self.get_at(key, now_epoch_secs())
    }

    /// Build a record stamped with the current time and upsert it.
    fn save(
        &self,
        key: &str,
        title: &str,
        downloads: &str,
        links: Vec<DownloadLink>,
        metadata: DetailMetadata,
    ) -> CacheRecord {
        let record = CacheRecord {
            url: key.to_string(),
            title: title.to_string(),
            size: metadata.size.clone(),
            downloads: downloads.to_string(),
            links,
            metadata,
            timestamp: now_epoch_secs(),
        };
        self.insert(record.clone());
        record
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
