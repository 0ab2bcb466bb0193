//! A single cached completion.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Raw completion text stored under a content-addressed key.
///
/// Entries are never mutated after creation; a refresh replaces the whole
/// entry with a new `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(key: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_created_at(key, content, Utc::now())
    }

    /// Create an entry with an explicit creation time.
    pub fn with_created_at(
        key: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key: key.into(),
            content: content.into(),
            created_at,
        }
    }

    /// Whether the entry is still valid at `now` for the given TTL.
    ///
    /// Valid while `now - created_at < ttl`. Entries stamped in the future
    /// (clock skew between writers) count as fresh.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(self.created_at) < ttl
    }
}
