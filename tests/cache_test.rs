//! Tests for [`LayeredCache`]: memory bound, persistence and expiry.

mod common;

use std::time::Duration;

use chrono::{TimeDelta, Utc};

use common::{ScriptedProvider, fast_retry};
use eventsmith::cache::{CacheEntry, CacheStore, VolatileStore, completion_key};
use eventsmith::{
    CacheConfig, CompletionOptions, CostMode, Eventsmith, LayeredCache, TitleRequest,
};

fn small_cache(dir: &std::path::Path, capacity: usize) -> LayeredCache {
    LayeredCache::new(&CacheConfig::new().dir(dir).max_memory_items(capacity))
}

#[test]
fn miss_on_empty_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = small_cache(dir.path(), 4);
    assert!(cache.get("missing").is_none());
    assert!(cache.disk().is_empty());
}

#[test]
fn memory_evicts_oldest_insert() {
    let store = VolatileStore::new(3);
    let base = Utc::now();
    for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
        let at = base + TimeDelta::seconds(i as i64);
        store
            .store(CacheEntry::with_created_at(*key, "v", at))
            .unwrap();
    }

    assert_eq!(store.len(), 3);
    assert!(!store.contains("a"));
    assert!(store.contains("d"));
}

#[test]
fn reads_do_not_protect_from_eviction() {
    let store = VolatileStore::new(2);
    let base = Utc::now();
    store
        .store(CacheEntry::with_created_at("a", "v", base))
        .unwrap();
    store
        .store(CacheEntry::with_created_at("b", "v", base + TimeDelta::seconds(1)))
        .unwrap();
    assert!(store.load("a").is_some());

    store
        .store(CacheEntry::with_created_at("c", "v", base + TimeDelta::seconds(2)))
        .unwrap();
    assert!(!store.contains("a"));
}

#[test]
fn evicted_entries_are_still_served_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let cache = small_cache(dir.path(), 2);
    for key in ["k1", "k2", "k3"] {
        cache.set(key, &format!("content-{key}"));
        std::thread::sleep(Duration::from_millis(2));
    }

    assert_eq!(cache.memory().len(), 2);
    assert!(!cache.memory().contains("k1"));
    assert_eq!(cache.disk().len(), 3);
    assert_eq!(cache.get("k1").as_deref(), Some("content-k1"));
    assert!(cache.memory().contains("k1"));
}

#[test]
fn records_survive_a_new_instance() {
    let dir = tempfile::tempdir().unwrap();
    let key = completion_key(
        "system",
        "user",
        &CompletionOptions::new("gpt-3.5-turbo", 50, 0.7),
    );
    small_cache(dir.path(), 4).set(&key, "persisted");

    let reopened = small_cache(dir.path(), 4);
    assert!(reopened.memory().is_empty());
    assert_eq!(reopened.get(&key).as_deref(), Some("persisted"));
}

#[test]
fn entries_expire_after_ttl() {
    let dir = tempfile::tempdir().unwrap();
    let cache = LayeredCache::new(
        &CacheConfig::new()
            .dir(dir.path())
            .ttl(Duration::from_secs(3600)),
    );
    let two_hours_ago = Utc::now() - TimeDelta::hours(2);
    cache
        .disk()
        .store(CacheEntry::with_created_at("old", "stale", two_hours_ago))
        .unwrap();
    cache.set("new", "fresh");

    assert!(cache.get("old").is_none());
    assert!(cache.disk().load("old").is_none());
    assert_eq!(cache.get("new").as_deref(), Some("fresh"));
}

#[test]
fn each_entry_expires_independently() {
    let dir = tempfile::tempdir().unwrap();
    let cache = small_cache(dir.path(), 4);
    let now = Utc::now();
    cache
        .disk()
        .store(CacheEntry::with_created_at("a", "47h", now - TimeDelta::hours(47)))
        .unwrap();
    cache
        .disk()
        .store(CacheEntry::with_created_at("b", "49h", now - TimeDelta::hours(49)))
        .unwrap();

    assert_eq!(cache.get("a").as_deref(), Some("47h"));
    assert!(cache.get("b").is_none());
}

#[tokio::test]
async fn engine_restart_reuses_disk_cache() {
    let dir = tempfile::tempdir().unwrap();
    let request = TitleRequest::new("Business", "Workshop", "Formal").count(2);

    let first_provider =
        ScriptedProvider::replying([r#"["Strategic Leadership Lab", "Executive Growth Clinic"]"#]);
    let first = Eventsmith::builder()
        .provider(first_provider.clone())
        .cache_config(CacheConfig::new().dir(dir.path()))
        .retry(fast_retry())
        .build()
        .unwrap();
    let original = first.generate_titles(&request).await.unwrap();
    drop(first);

    let second_provider = ScriptedProvider::replying(Vec::<&str>::new());
    let second = Eventsmith::builder()
        .provider(second_provider.clone())
        .cache_config(CacheConfig::new().dir(dir.path()))
        .retry(fast_retry())
        .build()
        .unwrap();
    let replayed = second.generate_titles(&request).await.unwrap();

    assert_eq!(first_provider.calls(), 1);
    assert_eq!(second_provider.calls(), 0);
    assert_eq!(original.titles, replayed.titles);
    assert!(replayed.diagnostics.cache_hit);
}

#[tokio::test]
async fn empty_completion_is_not_cached() {
    let provider = ScriptedProvider::replying(["   ", "Back with text"]);
    let (engine, dir) = common::engine_with(provider.clone());

    let first = engine
        .call("system", "user", 40, 0.5, CostMode::Economy)
        .await
        .unwrap();
    assert!(first.text.is_empty());
    assert!(!first.from_cache);
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());

    let second = engine
        .call("system", "user", 40, 0.5, CostMode::Economy)
        .await
        .unwrap();
    assert_eq!(second.text, "Back with text");
    assert!(!second.from_cache);
    assert_eq!(provider.calls(), 2);
}
