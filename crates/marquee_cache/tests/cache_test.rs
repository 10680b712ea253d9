//! Tests for the TtlCache implementation.

use marquee_cache::{CacheConfig, TtlCache};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_cache_insert_and_get() {
    let cache: TtlCache<String> = TtlCache::new(CacheConfig::default());

    cache.insert("headlines:a", "20% Off Dinner".to_string());

    assert_eq!(cache.get("headlines:a").as_deref(), Some("20% Off Dinner"));
    assert!(cache.get("headlines:b").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_cache_expiration_evicts_on_read() {
    let config = CacheConfig::default().with_default_ttl(Duration::from_secs(1));
    let cache: TtlCache<u32> = TtlCache::new(config);

    cache.insert("k", 1);
    assert_eq!(cache.get("k"), Some(1));

    tokio::time::advance(Duration::from_secs(2)).await;

    assert!(cache.get("k").is_none());
    assert_eq!(cache.len(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cache_entry_live_until_ttl_elapses() {
    let cache: TtlCache<u32> = TtlCache::default();

    cache.insert("k", 7);
    tokio::time::advance(Duration::from_secs(299)).await;
    assert_eq!(cache.get("k"), Some(7));

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(cache.get("k").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_cache_per_entry_ttl() {
    let cache: TtlCache<u32> = TtlCache::default();

    cache.insert_with_ttl("short", 1, Duration::from_secs(1));
    cache.insert_with_ttl("long", 2, Duration::from_secs(60));

    tokio::time::advance(Duration::from_secs(5)).await;

    assert!(cache.get("short").is_none());
    assert_eq!(cache.get("long"), Some(2));
}

#[test]
fn test_cache_clear() {
    let cache: TtlCache<u32> = TtlCache::default();

    cache.insert("a", 1);
    cache.insert("b", 2);
    assert_eq!(cache.len(), 2);

    cache.clear();

    assert!(cache.is_empty());
    assert!(cache.get("a").is_none());
}

#[test]
fn test_cache_remove() {
    let cache: TtlCache<u32> = TtlCache::default();

    cache.insert("a", 1);

    assert!(cache.remove("a"));
    assert!(!cache.remove("a"));
    assert!(cache.is_empty());
}

#[test]
fn test_cache_update_existing_key() {
    let cache: TtlCache<u32> = TtlCache::default();

    cache.insert("a", 1);
    cache.insert("a", 2);

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("a"), Some(2));
}

#[test]
fn test_cache_clones_share_entries() {
    let cache: TtlCache<u32> = TtlCache::default();
    let other = cache.clone();

    other.insert("a", 1);

    assert_eq!(cache.get("a"), Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_cache_cleanup_expired_entries() {
    let config = CacheConfig::default().with_default_ttl(Duration::from_secs(1));
    let cache: TtlCache<u32> = TtlCache::new(config);

    cache.insert("a", 1);
    cache.insert("b", 2);
    cache.insert_with_ttl("c", 3, Duration::from_secs(60));

    tokio::time::advance(Duration::from_secs(2)).await;

    assert_eq!(cache.cleanup_expired(), 2);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("c"), Some(3));
}

#[tokio::test(start_paused = true)]
async fn test_cache_lru_eviction() {
    let cache: TtlCache<u32> = TtlCache::new(CacheConfig::default().with_max_size(2));

    cache.insert("a", 1);
    tokio::time::advance(Duration::from_millis(10)).await;
    cache.insert("b", 2);
    tokio::time::advance(Duration::from_millis(10)).await;

    // Touch "a" so "b" becomes least recently used.
    assert_eq!(cache.get("a"), Some(1));
    tokio::time::advance(Duration::from_millis(10)).await;

    cache.insert("c", 3);

    assert_eq!(cache.len(), 2);
    assert!(cache.get("b").is_none());
    assert_eq!(cache.get("a"), Some(1));
    assert_eq!(cache.get("c"), Some(3));
}

#[tokio::test(start_paused = true)]
async fn test_cache_full_prefers_dropping_expired() {
    let config = CacheConfig::default().with_max_size(2);
    let cache: TtlCache<u32> = TtlCache::new(config);

    cache.insert_with_ttl("expiring", 1, Duration::from_secs(1));
    cache.insert("fresh", 2);
    tokio::time::advance(Duration::from_secs(2)).await;

    cache.insert("new", 3);

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("fresh"), Some(2));
    assert_eq!(cache.get("new"), Some(3));
}
