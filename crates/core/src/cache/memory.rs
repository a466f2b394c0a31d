//! Volatile cache held only in process memory.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{CacheRecord, LinkCache};
use crate::metrics::CACHE_LOOKUPS;

/// In-memory [`LinkCache`]. Also the backing map of [`super::JsonFileCache`].
#[derive(Debug)]
pub struct MemoryCache {
    records: RwLock<HashMap<String, CacheRecord>>,
    ttl: u64,
}

impl MemoryCache {
    pub fn new(ttl: u64) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Swap in a whole mapping, returning its size.
    pub(crate) fn replace_all(&self, records: HashMap<String, CacheRecord>) -> usize {
        let mut guard = self.write();
        *guard = records;
        guard.len()
    }

    /// Copy of every stored record, valid or not.
    pub fn snapshot(&self) -> HashMap<String, CacheRecord> {
        self.read().clone()
    }

    // Poisoning is ignored: every write leaves the map consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl LinkCache for MemoryCache {
    fn load(&self) -> usize {
        self.len()
    }

    fn get_at(&self, key: &str, now: f64) -> Option<CacheRecord> {
        let hit = self
            .read()
            .get(key)
            .filter(|record| record.is_valid(now, self.ttl))
            .cloned();

        let result = if hit.is_some() { "hit" } else { "miss" };
        CACHE_LOOKUPS.with_label_values(&[result]).inc();
        hit
    }

    fn insert(&self, record: CacheRecord) {
        self.write().insert(record.url.clone(), record);
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn clear(&self) {
        self.write().clear();
    }

    fn ttl(&self) -> u64 {
        self.ttl
    }
}
