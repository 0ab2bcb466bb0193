//! Memory-over-disk response cache.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use super::{CacheConfig, CacheEntry, CacheStore, DurableStore, VolatileStore};
use crate::telemetry;

/// Two-tier response cache: a bounded [`VolatileStore`] in front of an
/// unbounded [`DurableStore`].
///
/// The disk layer is the source of truth; memory only ever holds entries
/// that were also written to disk (or promoted from it). Each entry expires
/// independently `ttl` after its creation and is purged when a lookup finds
/// it stale.
pub struct LayeredCache {
    memory: VolatileStore,
    disk: DurableStore,
    ttl: Duration,
}

impl LayeredCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            memory: VolatileStore::new(config.max_memory_items),
            disk: DurableStore::new(config.dir.clone()),
            ttl: config.ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The in-memory layer.
    pub fn memory(&self) -> &VolatileStore {
        &self.memory
    }

    /// The on-disk layer.
    pub fn disk(&self) -> &DurableStore {
        &self.disk
    }

    /// Look up cached content for `key`.
    ///
    /// Memory first; a stale memory entry is dropped and the disk layer is
    /// consulted. A fresh disk entry is promoted into memory (which may
    /// evict the oldest memory entry); a stale one is deleted.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = Utc::now();

        if let Some(entry) = self.memory.load(key) {
            if entry.is_fresh(self.ttl, now) {
                record_hit(&self.memory, key);
                return Some(entry.content);
            }
            self.memory.remove(key);
            metrics::counter!(telemetry::CACHE_EXPIRED_TOTAL).increment(1);
        }

        match self.disk.load(key) {
            Some(entry) if entry.is_fresh(self.ttl, now) => {
                record_hit(&self.disk, key);
                let content = entry.content.clone();
                // memory writes cannot fail
                let _ = self.memory.store(entry);
                Some(content)
            }
            Some(_) => {
                debug!(key, layer = self.disk.name(), "cache entry expired");
                self.disk.remove(key);
                metrics::counter!(telemetry::CACHE_EXPIRED_TOTAL).increment(1);
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                None
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    /// Store `content` under `key` in both layers.
    ///
    /// Disk failures are logged and swallowed; the memory write always
    /// succeeds.
    pub fn set(&self, key: &str, content: &str) {
        let entry = CacheEntry::new(key, content);
        if let Err(e) = self.disk.store(entry.clone()) {
            warn!(key, layer = self.disk.name(), error = %e, "failed to persist cache entry");
        }
        let _ = self.memory.store(entry);
    }

    /// Drop every in-memory entry. Disk records are left untouched.
    pub fn clear_memory(&self) {
        self.memory.clear();
    }
}

fn record_hit(layer: &dyn CacheStore, key: &str) {
    debug!(key, layer = layer.name(), "cache hit");
    metrics::counter!(telemetry::CACHE_HITS_TOTAL, "layer" => layer.name().to_owned())
        .increment(1);
}
