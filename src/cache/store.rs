//! Storage backend trait shared by the cache layers.

use super::CacheEntry;
use crate::Result;

/// A keyed store of [`CacheEntry`] records.
///
/// Stores know nothing about TTLs; freshness is decided by
/// [`LayeredCache`](super::LayeredCache), which removes stale entries.
pub trait CacheStore: Send + Sync {
    /// Store name for logging/debugging.
    fn name(&self) -> &str;

    /// Fetch the entry for `key`, if present.
    fn load(&self, key: &str) -> Option<CacheEntry>;

    /// Insert or replace the entry under `entry.key`.
    fn store(&self, entry: CacheEntry) -> Result<()>;

    /// Drop the entry for `key`. Missing keys are not an error.
    fn remove(&self, key: &str);
}
