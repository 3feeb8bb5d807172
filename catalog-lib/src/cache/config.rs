//! Cache configuration

use std::time::Duration;

use crate::api::RequestKind;

/// Configuration for cache TTL (time-to-live) settings.
///
/// Each request kind has a fixed TTL. The sweep interval controls how
/// often the background [`Sweeper`](super::Sweeper) drops expired entries.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use catalog_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default()
///     .with_details_ttl(Duration::from_secs(3600))
///     .with_search_ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for search result pages.
    ///
    /// Default: 5 minutes
    pub search_ttl: Duration,

    /// TTL for item details.
    ///
    /// Default: 30 minutes
    pub details_ttl: Duration,

    /// TTL for autocomplete suggestions.
    ///
    /// Default: 2 minutes
    pub suggest_ttl: Duration,

    /// How often expired entries are swept.
    ///
    /// Default: 60 seconds
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            search_ttl: Duration::from_secs(5 * 60),
            details_ttl: Duration::from_secs(30 * 60),
            suggest_ttl: Duration::from_secs(2 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the TTL that applies to the given request kind.
    pub fn ttl_for(&self, kind: RequestKind) -> Duration {
        match kind {
            RequestKind::Search => self.search_ttl,
            RequestKind::Details => self.details_ttl,
            RequestKind::Suggest => self.suggest_ttl,
        }
    }

    /// Sets the search TTL.
    pub fn with_search_ttl(mut self, ttl: Duration) -> Self {
        self.search_ttl = ttl;
        self
    }

    /// Sets the details TTL.
    pub fn with_details_ttl(mut self, ttl: Duration) -> Self {
        self.details_ttl = ttl;
        self
    }

    /// Sets the suggest TTL.
    pub fn with_suggest_ttl(mut self, ttl: Duration) -> Self {
        self.suggest_ttl = ttl;
        self
    }

    /// Sets the sweep interval.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Creates a config with no caching (zero TTLs).
    pub fn no_cache() -> Self {
        Self {
            search_ttl: Duration::ZERO,
            details_ttl: Duration::ZERO,
            suggest_ttl: Duration::ZERO,
            ..Self::default()
        }
    }
}
