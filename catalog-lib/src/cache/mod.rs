//! Generic caching layer
//!
//! Provides a `CacheProvider` trait and an in-memory implementation for
//! caching raw response payloads with TTL support, plus the background
//! `Sweeper` that keeps expired entries from piling up.

mod config;
mod memory;
mod sweeper;

pub use config::*;
pub use memory::*;
pub use sweeper::*;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

/// A cached value with metadata about when it was cached and when it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedValue {
    /// The cached payload. Opaque to the cache.
    pub data: Vec<u8>,
    /// When this value was cached.
    pub created_at: DateTime<Utc>,
    /// Last instant at which this value is still valid.
    pub expires_at: DateTime<Utc>,
}

impl CachedValue {
    /// Creates a new cached value.
    pub fn new(data: Vec<u8>, created_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            data,
            created_at,
            expires_at,
        }
    }

    /// Creates a new cached value with a TTL from now.
    pub fn with_ttl(data: Vec<u8>, ttl: std::time::Duration) -> Self {
        Self::with_ttl_from(data, Utc::now(), ttl)
    }

    /// Creates a new cached value with a TTL counted from `created_at`.
    pub fn with_ttl_from(data: Vec<u8>, created_at: DateTime<Utc>, ttl: std::time::Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        let expires_at = created_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            data,
            created_at,
            expires_at,
        }
    }

    /// Returns `true` if this value has expired at `now`.
    ///
    /// A value is still valid at exactly `created_at + ttl`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Returns `true` if this cached value has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Read-only snapshot of what a cache currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of stored entries, including expired ones not yet swept.
    pub count: usize,
    /// Stored keys, sorted.
    pub keys: Vec<String>,
}

/// Trait for cache providers.
///
/// Implementations store and retrieve cached values by string keys.
/// The provider is responsible for:
/// - Never returning expired values from `get()` / `get_at()`
/// - Storing values with their expiration metadata
/// - Removing expired entries when asked to `sweep()`
///
/// All operations are atomic with respect to each other. There is no
/// combined read-then-write: two callers that miss at the same time may
/// both store, and the last write wins.
///
/// # Example
///
/// ```ignore
/// use catalog_lib::cache::{CacheProvider, InMemoryCache, CachedValue};
/// use std::time::Duration;
///
/// let cache = InMemoryCache::new();
///
/// let value = CachedValue::with_ttl(b"hello".to_vec(), Duration::from_secs(60));
/// cache.set("my-key", value).await;
///
/// if let Some(cached) = cache.get("my-key").await {
///     println!("Got: {:?}", cached.data);
/// }
/// ```
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Retrieves a cached value by key, as of `now`.
    ///
    /// Returns `None` if the key doesn't exist or the value has expired.
    async fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<CachedValue>;

    /// Retrieves a cached value by key.
    ///
    /// Returns `None` if the key doesn't exist or the value has expired.
    async fn get(&self, key: &str) -> Option<CachedValue> {
        self.get_at(key, Utc::now()).await
    }

    /// Stores a value in the cache, replacing any previous value.
    async fn set(&self, key: &str, value: CachedValue);

    /// Removes a value from the cache.
    async fn remove(&self, key: &str);

    /// Clears all values from the cache.
    async fn clear(&self);

    /// Removes all entries that have expired as of `now`.
    ///
    /// Returns the number of entries removed.
    async fn sweep(&self, now: DateTime<Utc>) -> usize;

    /// Returns the current entry count and keys without touching expiry.
    async fn stats(&self) -> CacheStats;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).single().unwrap()
    }

    #[test]
    fn test_valid_up_to_and_including_ttl() {
        let value = CachedValue::with_ttl_from(vec![1], at(0), Duration::from_secs(300));
        assert!(!value.is_expired_at(at(0)));
        assert!(!value.is_expired_at(at(300)));
        assert!(value.is_expired_at(at(301)));
    }

    #[test]
    fn test_zero_ttl_expires_right_after_store() {
        let value = CachedValue::with_ttl_from(vec![1], at(0), Duration::ZERO);
        assert!(!value.is_expired_at(at(0)));
        assert!(value.is_expired_at(at(1)));
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let value = CachedValue::with_ttl_from(vec![1], at(0), Duration::MAX);
        assert!(!value.is_expired_at(at(1_000_000_000)));
    }
}
