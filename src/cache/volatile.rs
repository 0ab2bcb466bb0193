//! Bounded in-memory cache layer.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use super::{CacheEntry, CacheStore};
use crate::Result;

/// In-memory layer holding at most `capacity` entries.
///
/// When full, inserting a new key evicts the entry with the oldest
/// `created_at`. Reads do not refresh an entry's position: this is
/// least-recently-inserted eviction, not LRU.
pub struct VolatileStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
    capacity: usize,
}

impl VolatileStore {
    /// Create an empty store. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(HashMap::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Evict all entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl CacheStore for VolatileStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self, key: &str) -> Option<CacheEntry> {
        self.entries.lock().get(key).cloned()
    }

    fn store(&self, entry: CacheEntry) -> Result<()> {
        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity && !entries.contains_key(&entry.key) {
            let oldest = entries
                .values()
                .min_by_key(|e| e.created_at)
                .map(|e| e.key.clone());
            if let Some(oldest) = oldest {
                debug!(key = %oldest, "evicting oldest in-memory cache entry");
                entries.remove(&oldest);
            }
        }
        entries.insert(entry.key.clone(), entry);
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}
