//! Import extraction cache
//!
//! Maps file path and content hash to previously extracted imports so that
//! repeated runs skip reparsing unchanged files. Entries live for the
//! process duration unless a caller scopes a private instance.

use crate::models::record::ImportRecord;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Read-only cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache entry holding a content hash and its extraction result
#[derive(Debug, Clone)]
struct CacheEntry {
    hash: u128,
    records: Vec<ImportRecord>,
}

/// Single-threaded import cache keyed by absolute file path
#[derive(Debug, Default)]
pub struct ImportCache {
    entries: HashMap<PathBuf, CacheEntry>,
    hits: usize,
    misses: usize,
}

impl ImportCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the records for a path at a specific content hash
    ///
    /// A present entry with a different hash is a miss; the stale entry
    /// stays until the next `put` overwrites it.
    pub fn get(&mut self, path: &Path, hash: u128) -> Option<Vec<ImportRecord>> {
        match self.entries.get(path) {
            Some(entry) if entry.hash == hash => {
                self.hits += 1;
                Some(entry.records.clone())
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store the extraction result for a path
    pub fn put(&mut self, path: impl Into<PathBuf>, hash: u128, records: Vec<ImportRecord>) {
        self.entries.insert(path.into(), CacheEntry { hash, records });
    }

    /// Drop a single path's entry
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    /// Drop all entries and reset the counters
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current statistics snapshot
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// Thread-safe cache wrapper shared between batch workers
#[derive(Debug, Default)]
pub struct SharedImportCache {
    inner: RwLock<ImportCache>,
}

impl SharedImportCache {
    /// Create a new thread-safe cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the records for a path at a specific content hash
    pub fn get(&self, path: &Path, hash: u128) -> Option<Vec<ImportRecord>> {
        self.inner.write().get(path, hash)
    }

    /// Store the extraction result for a path
    pub fn put(&self, path: impl Into<PathBuf>, hash: u128, records: Vec<ImportRecord>) {
        self.inner.write().put(path, hash, records);
    }

    /// Drop a single path's entry
    pub fn invalidate(&self, path: &Path) {
        self.inner.write().invalidate(path);
    }

    /// Drop all entries and reset the counters
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Current statistics snapshot
    pub fn stats(&self) -> CacheStats {
        self.inner.read().stats()
    }
}

/// Process-wide cache instance shared by default analyzer runs
pub fn global_cache() -> &'static SharedImportCache {
    static GLOBAL: OnceLock<SharedImportCache> = OnceLock::new();
    GLOBAL.get_or_init(SharedImportCache::new)
}
