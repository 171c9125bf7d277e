//! Content-addressed cache for completed analyses.
//!
//! Keyed by SHA-256 of the extracted text plus the prompt version, so a
//! template change never serves an analysis produced under the old prompt.
//! Entries are immutable once written — the value is a pure function of the
//! key inputs — and the store is bounded: past capacity the least recently
//! used entry is evicted.
//!
//! Only real model analyses are cached. Fallback messages are not, so a
//! recovered provider is consulted again on the next identical document.

use lru::LruCache;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::Mutex;

/// Bounded, thread-safe analysis store shared across request tasks.
pub struct AnalysisCache {
    capacity: usize,
    entries: Mutex<LruCache<String, String>>,
}

impl AnalysisCache {
    /// Create a cache holding at most `capacity` analyses. `0` disables the
    /// cache entirely: every lookup misses and inserts are dropped.
    pub fn new(capacity: usize) -> Self {
        let bound = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            capacity,
            entries: Mutex::new(LruCache::new(bound)),
        }
    }

    /// Derive the cache key for a document/prompt pair.
    pub fn key(text: &str, prompt_version: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(prompt_version.as_bytes());
        hasher.update([0u8]);
        hasher.update(text.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if self.capacity == 0 {
            return None;
        }
        self.lock().get(key).cloned()
    }

    /// Store an analysis. A key already present is left untouched.
    pub fn insert(&self, key: String, analysis: String) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        if !entries.contains(&key) {
            entries.push(key, analysis);
        }
    }

    pub fn len(&self) -> usize {
        if self.capacity == 0 {
            return 0;
        }
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, String>> {
        // A poisoned lock only means another request panicked mid-access;
        // the map itself is still usable.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
