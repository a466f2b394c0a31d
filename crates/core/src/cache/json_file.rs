//! Cache persisted as a single JSON object on disk.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, error, info, warn};

use super::{CacheError, CacheRecord, LinkCache, MemoryCache};
use crate::metrics::CACHE_WRITES;

/// File-backed [`LinkCache`].
///
/// Every write rewrites the whole file, so the cost of a save grows with the
/// size of the cache. A failed write is logged and the record stays in
/// memory for the rest of the process.
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
    records: MemoryCache,
    /// Serializes snapshot, write and rename of the file.
    write_lock: Mutex<()>,
}

impl JsonFileCache {
    /// Create an empty cache bound to `path`. Call [`LinkCache::load`] to
    /// read existing records.
    pub fn new(path: impl Into<PathBuf>, ttl: u64) -> Self {
        Self {
            path: path.into(),
            records: MemoryCache::new(ttl),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<HashMap<String, CacheRecord>, CacheError> {
        let content = fs::read_to_string(&self.path)?;
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| CacheError::Parse(e.to_string()))?;

        let serde_json::Value::Object(entries) = value else {
            return Err(CacheError::Parse(format!(
                "expected an object at the top level of {}",
                self.path.display()
            )));
        };

        let mut records = HashMap::with_capacity(entries.len());
        for (key, entry) in entries {
            match serde_json::from_value::<CacheRecord>(entry) {
                Ok(mut record) => {
                    if record.url.is_empty() {
                        record.url = key.clone();
                    }
                    records.insert(key, record);
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Skipping malformed cache entry");
                }
            }
        }
        Ok(records)
    }

    /// Write every record to a sibling temp file, then rename it over the
    /// target.
    fn persist(&self) -> Result<(), CacheError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let sorted: BTreeMap<String, CacheRecord> = self.records.snapshot().into_iter().collect();

        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        sorted
            .serialize(&mut serializer)
            .map_err(|e| CacheError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = temp_path(&self.path);
        fs::write(&tmp, &buf)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn persist_logged(&self) {
        match self.persist() {
            Ok(()) => {
                CACHE_WRITES.with_label_values(&["ok"]).inc();
                debug!(path = %self.path.display(), records = self.records.len(), "Cache written");
            }
            Err(e) => {
                CACHE_WRITES.with_label_values(&["error"]).inc();
                error!(path = %self.path.display(), error = %e, "Failed to write cache file");
            }
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "cache.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

impl LinkCache for JsonFileCache {
    fn load(&self) -> usize {
        let records = match self.read_file() {
            Ok(records) => records,
            Err(CacheError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No cache file yet, starting empty");
                HashMap::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cache file unreadable, starting empty");
                HashMap::new()
            }
        };

        let count = self.records.replace_all(records);
        info!(path = %self.path.display(), records = count, "Cache loaded");
        count
    }

    fn get_at(&self, key: &str, now: f64) -> Option<CacheRecord> {
        self.records.get_at(key, now)
    }

    fn insert(&self, record: CacheRecord) {
        self.records.insert(record);
        self.persist_logged();
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn clear(&self) {
        self.records.clear();
        self.persist_logged();
    }

    fn ttl(&self) -> u64 {
        self.records.ttl()
    }
}
