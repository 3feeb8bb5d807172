//! In-memory cache implementation using DashMap

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use dashmap::DashMap;

use super::CacheProvider;
use super::CacheStats;
use super::CachedValue;

/// An in-memory cache backed by a concurrent hash map.
///
/// This is the default cache implementation. It's fast and thread-safe,
/// but data is lost when the process exits.
///
/// # Example
///
/// ```
/// use catalog_lib::cache::InMemoryCache;
///
/// let cache = InMemoryCache::new();
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCache {
    store: DashMap<String, CachedValue>,
}

impl InMemoryCache {
    /// Creates a new empty in-memory cache.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl CacheProvider for InMemoryCache {
    async fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<CachedValue> {
        {
            let entry = self.store.get(key)?;
            if !entry.value().is_expired_at(now) {
                return Some(entry.value().clone());
            }
        }

        // Re-check under the write lock so a fresh value stored in between survives.
        self.store.remove_if(key, |_, value| value.is_expired_at(now));
        None
    }

    async fn set(&self, key: &str, value: CachedValue) {
        self.store.insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) {
        self.store.remove(key);
    }

    async fn clear(&self) {
        self.store.clear();
    }

    async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.store.retain(|_, value| {
            if value.is_expired_at(now) {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    async fn stats(&self) -> CacheStats {
        let mut keys: Vec<String> = self.store.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        CacheStats {
            count: keys.len(),
            keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).single().unwrap()
    }

    fn value(created: i64, ttl_secs: u64) -> CachedValue {
        CachedValue::with_ttl_from(b"payload".to_vec(), at(created), Duration::from_secs(ttl_secs))
    }

    #[tokio::test]
    async fn test_get_returns_payload_until_ttl() {
        let cache = InMemoryCache::new();
        cache.set("k", value(0, 120)).await;

        assert_eq!(cache.get_at("k", at(60)).await.unwrap().data, b"payload");
        assert!(cache.get_at("k", at(120)).await.is_some());
        assert!(cache.get_at("k", at(121)).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_read_evicts_lazily() {
        let cache = InMemoryCache::new();
        cache.set("k", value(0, 10)).await;
        assert_eq!(cache.len(), 1);

        assert!(cache.get_at("k", at(11)).await.is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache = InMemoryCache::new();
        cache.set("k", value(0, 10)).await;
        cache.set("k", value(100, 10)).await;

        assert!(cache.get_at("k", at(105)).await.is_some());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired() {
        let cache = InMemoryCache::new();
        cache.set("short", value(0, 10)).await;
        cache.set("long", value(0, 1000)).await;

        assert_eq!(cache.sweep(at(500)).await, 1);
        assert_eq!(cache.stats().await.keys, vec!["long".to_string()]);
        assert_eq!(cache.sweep(at(500)).await, 0);
    }

    #[tokio::test]
    async fn test_clear_is_immediate() {
        let cache = InMemoryCache::new();
        cache.set("a", value(0, 1000)).await;
        cache.set("b", value(0, 1000)).await;
        cache.clear().await;

        assert!(cache.get_at("a", at(1)).await.is_none());
        assert_eq!(cache.stats().await, CacheStats::default());
    }

    #[tokio::test]
    async fn test_stats_does_not_sweep() {
        let cache = InMemoryCache::new();
        cache.set("b", value(0, 1)).await;
        cache.set("a", value(0, 1)).await;

        // Both entries are long expired in wall-clock terms.
        let stats = cache.stats().await;
        assert_eq!(stats.count, 2);
        assert_eq!(stats.keys, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_remove() {
        let cache = InMemoryCache::new();
        cache.set("a", value(0, 1000)).await;
        cache.remove("a").await;
        assert!(cache.get_at("a", at(1)).await.is_none());
    }
}
