//! Time-to-live result cache.

use derive_getters::Getters;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Default validity window for cached results.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Configuration for [`TtlCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct CacheConfig {
    /// TTL applied by [`TtlCache::insert`]
    default_ttl: Duration,
    /// Maximum number of entries; 0 disables the bound
    max_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_CACHE_TTL,
            max_size: 256,
        }
    }
}

/// A memoized value with its freshness bookkeeping.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry<T> {
    /// Cached value
    data: T,
    /// When the value was stored
    timestamp: Instant,
    /// Validity window
    ttl: Duration,
    /// Last read, used for LRU eviction
    last_access: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration, now: Instant) -> Self {
        Self {
            data,
            timestamp: now,
            ttl,
            last_access: now,
        }
    }

    /// Whether the entry is past its TTL at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.timestamp) > self.ttl
    }
}

/// Short-lived key/value cache with per-entry TTL and LRU eviction.
///
/// Reads of expired entries count as misses and evict the entry.
///
/// # Examples
///
/// ```
/// use marquee_cache::{CacheConfig, TtlCache};
///
/// let cache = TtlCache::new(CacheConfig::default());
/// cache.insert("headlines:{}", vec!["20% Off Dinner".to_string()]);
/// assert_eq!(cache.get("headlines:{}").map(|v| v.len()), Some(1));
/// assert!(cache.get("keywords:{}").is_none());
/// ```
#[derive(Debug)]
pub struct TtlCache<T> {
    entries: Arc<Mutex<HashMap<String, CacheEntry<T>>>>,
    config: CacheConfig,
}

impl<T: Clone> TtlCache<T> {
    /// Creates an empty cache.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a clone of the live value for `key`.
    pub fn get(&self, key: &str) -> Option<T> {
        let now = Instant::now();
        let mut entries = self.lock();
        let expired = entries.get(key)?.is_expired_at(now);
        if expired {
            debug!(key, "Cache entry expired");
            entries.remove(key);
            return None;
        }
        let entry = entries.get_mut(key)?;
        entry.last_access = now;
        Some(entry.data.clone())
    }

    /// Stores `value` under `key` with the default TTL.
    pub fn insert(&self, key: impl Into<String>, value: T) {
        self.insert_with_ttl(key, value, self.config.default_ttl);
    }

    /// Stores `value` under `key` with an explicit TTL.
    ///
    /// Inserting a new key into a full cache first drops expired entries,
    /// then the least recently used one.
    pub fn insert_with_ttl(&self, key: impl Into<String>, value: T, ttl: Duration) {
        let key = key.into();
        let now = Instant::now();
        let mut entries = self.lock();

        let max_size = self.config.max_size;
        if max_size > 0 && !entries.contains_key(&key) && entries.len() >= max_size {
            entries.retain(|_, entry| !entry.is_expired_at(now));
            if entries.len() >= max_size
                && let Some(lru_key) = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_access)
                    .map(|(k, _)| k.clone())
            {
                debug!(key = %lru_key, "Evicting least recently used cache entry");
                entries.remove(&lru_key);
            }
        }

        entries.insert(key, CacheEntry::new(value, ttl, now));
    }

    /// Removes one entry, returning whether it existed.
    pub fn remove(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Drops expired entries and returns how many were removed.
    #[instrument(skip(self))]
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "Removed expired cache entries");
        }
        removed
    }

    /// Number of stored entries, expired ones included until they are read or cleaned.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl<T> Clone for TtlCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            config: self.config,
        }
    }
}
