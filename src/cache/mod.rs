//! Response cache.
//!
//! Completions are cached under a content-addressed key (see
//! [`completion_key`]) in a [`LayeredCache`]: a bounded in-memory
//! [`VolatileStore`] in front of a persistent [`DurableStore`] with one JSON
//! record per key. Every entry carries its own creation time and expires
//! `ttl` after it (default 48 hours).
//!
//! Persistent-layer I/O failures never reach the caller: reads degrade to a
//! miss and writes are logged and dropped.

mod durable;
mod entry;
mod key;
mod layered;
mod store;
mod volatile;

pub use durable::DurableStore;
pub use entry::CacheEntry;
pub use key::{KEY_LEN, KeyBuilder, completion_key};
pub use layered::LayeredCache;
pub use store::CacheStore;
pub use volatile::VolatileStore;

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default entry lifetime: 48 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(48 * 3600);

/// Default in-memory capacity.
pub const DEFAULT_MAX_MEMORY_ITEMS: usize = 100;

/// Configuration for the response cache.
///
/// ```rust
/// # use eventsmith::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .dir("/tmp/eventsmith-cache")
///     .max_memory_items(50)
///     .ttl(Duration::from_secs(3600));
/// assert_eq!(config.max_memory_items, 50);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Directory holding persistent records.
    pub dir: PathBuf,
    /// Time-to-live for every entry. Default: 48 hours.
    pub ttl: Duration,
    /// Maximum number of in-memory entries. Default: 100.
    pub max_memory_items: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            ttl: DEFAULT_TTL,
            max_memory_items: DEFAULT_MAX_MEMORY_ITEMS,
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory for persistent records.
    pub fn dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the in-memory capacity.
    pub fn max_memory_items(mut self, n: usize) -> Self {
        self.max_memory_items = n;
        self
    }
}

/// Default cache directory: `~/.cache/eventsmith/responses`.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("eventsmith")
        .join("responses")
}
