//! On-disk cache layer: one JSON record per key.
//!
//! There is no index file; the presence of `<dir>/<key>.json` is the index.
//! Records are written to a uniquely named temporary file and renamed into
//! place, so concurrent writers never leave a torn record behind. Two
//! writers racing on the same key resolve as last-write-wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use super::{CacheEntry, CacheStore};
use crate::{EventsmithError, Result};

const RECORD_EXTENSION: &str = "json";

/// Persistent, unbounded cache layer rooted at a directory.
pub struct DurableStore {
    dir: PathBuf,
    write_seq: AtomicU64,
}

impl DurableStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_seq: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `key`, or `None` if the key is not filename-safe.
    pub fn record_path(&self, key: &str) -> Option<PathBuf> {
        is_filename_safe(key).then(|| self.dir.join(format!("{key}.{RECORD_EXTENSION}")))
    }

    /// Number of records currently on disk.
    pub fn len(&self) -> usize {
        std::fs::read_dir(&self.dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| {
                        e.path().extension().and_then(|x| x.to_str()) == Some(RECORD_EXTENSION)
                    })
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn tmp_path(&self, key: &str) -> PathBuf {
        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!("{key}.{}.{seq}.tmp", std::process::id()))
    }
}

impl CacheStore for DurableStore {
    fn name(&self) -> &str {
        "disk"
    }

    fn load(&self, key: &str) -> Option<CacheEntry> {
        let path = self.record_path(key)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read cache record");
                return None;
            }
        };
        match serde_json::from_str::<CacheEntry>(&content) {
            Ok(entry) if entry.key == key => Some(entry),
            Ok(entry) => {
                warn!(path = %path.display(), stored_key = %entry.key, "cache record key mismatch");
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt cache record");
                None
            }
        }
    }

    fn store(&self, entry: CacheEntry) -> Result<()> {
        let path = self.record_path(&entry.key).ok_or_else(|| {
            EventsmithError::InvalidInput(format!("cache key '{}' is not filename-safe", entry.key))
        })?;

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            EventsmithError::Storage(format!(
                "failed to create cache dir {}: {e}",
                self.dir.display()
            ))
        })?;

        let tmp_path = self.tmp_path(&entry.key);
        let json = serde_json::to_vec(&entry)?;
        std::fs::write(&tmp_path, &json)
            .and_then(|()| std::fs::rename(&tmp_path, &path))
            .map_err(|e| {
                let _ = std::fs::remove_file(&tmp_path);
                EventsmithError::Storage(format!(
                    "failed to write cache record {}: {e}",
                    path.display()
                ))
            })
    }

    fn remove(&self, key: &str) {
        let Some(path) = self.record_path(key) else {
            return;
        };
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "failed to remove cache record"),
        }
    }
}

fn is_filename_safe(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = DurableStore::new(dir.path().join("responses"));

        assert!(store.load("abc123").is_none());
        store.store(CacheEntry::new("abc123", "hello")).unwrap();

        let entry = store.load("abc123").unwrap();
        assert_eq!(entry.content, "hello");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_deletes_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = DurableStore::new(dir.path());
        store.store(CacheEntry::new("k1", "v")).unwrap();
        store.remove("k1");
        assert!(store.load("k1").is_none());
        // removing again is fine
        store.remove("k1");
    }

    #[test]
    fn corrupt_record_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let store = DurableStore::new(dir.path());
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        assert!(store.load("bad").is_none());
    }

    #[test]
    fn unsafe_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = DurableStore::new(dir.path());
        assert!(store.record_path("../escape").is_none());
        assert!(store.store(CacheEntry::new("../escape", "x")).is_err());
        assert!(store.load("../escape").is_none());
    }

    #[test]
    fn no_tmp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = DurableStore::new(dir.path());
        for i in 0..5 {
            store.store(CacheEntry::new(format!("k{i}"), "v")).unwrap();
        }
        let leftovers = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .count();
        assert_eq!(leftovers, 0);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn unusable_dir_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();
        let store = DurableStore::new(&file);

        let err = store.store(CacheEntry::new("k1", "v")).unwrap_err();
        assert!(matches!(err, EventsmithError::Storage(_)));
    }

    #[test]
    fn failed_write_cleans_up_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DurableStore::new(dir.path());
        // A non-empty directory where the record should go blocks the rename.
        let blocker = dir.path().join("k1.json");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), "x").unwrap();

        let err = store.store(CacheEntry::new("k1", "v")).unwrap_err();
        assert!(matches!(err, EventsmithError::Storage(_)));

        let tmp_files = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .count();
        assert_eq!(tmp_files, 0);
    }
}
