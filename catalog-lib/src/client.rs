//! Main CatalogClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::api::CacheKey;
use crate::api::Envelope;
use crate::api::RequestKind;
use crate::cache::CacheConfig;
use crate::cache::CacheProvider;
use crate::cache::CacheStats;
use crate::cache::CachedValue;
use crate::cache::InMemoryCache;
use crate::cache::Sweeper;
use crate::error::ApiError;
use crate::rate_limit::RateLimiter;
use crate::transport::HttpTransport;
use crate::transport::QueryParams;
use crate::transport::Transport;

/// Default endpoint of the remote catalog.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// The main client for looking things up in the remote catalog.
///
/// Every lookup goes through the same steps: build a cache key, return a
/// cached payload if one is still valid, otherwise wait for the rate
/// limiter, call the remote and store the answer when it qualifies for
/// caching. Callers get the same value either way.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Clones share the cache and the rate limiter.
///
/// # Example
///
/// ```ignore
/// use catalog_lib::CatalogClient;
///
/// let client = CatalogClient::builder()
///     .api_key("my-key")
///     .build()?;
///
/// let page = client.search("Batman").page(2).year("1989").await?;
/// ```
#[derive(Clone)]
pub struct CatalogClient {
    pub(crate) inner: Arc<CatalogClientInner>,
}

pub(crate) struct CatalogClientInner {
    transport: Arc<dyn Transport>,
    cache: Arc<dyn CacheProvider>,
    cache_config: CacheConfig,
    rate_limiter: RateLimiter,
}

impl CatalogClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> CatalogClientBuilder<Missing> {
        CatalogClientBuilder::new()
    }

    /// Returns the cache this client reads and writes.
    pub fn cache(&self) -> &Arc<dyn CacheProvider> {
        &self.inner.cache
    }

    /// Returns the cache configuration.
    pub fn cache_config(&self) -> &CacheConfig {
        &self.inner.cache_config
    }

    /// Returns the rate limiter shared by all lookups of this client.
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.inner.rate_limiter
    }

    /// Drops every cached payload.
    pub async fn clear_cache(&self) {
        self.inner.cache.clear().await;
        log::debug!("cache cleared");
    }

    /// Returns what the cache currently holds.
    pub async fn cache_stats(&self) -> CacheStats {
        self.inner.cache.stats().await
    }

    /// Starts sweeping this client's cache at the configured interval.
    ///
    /// Must be called from within a tokio runtime. Keep the handle alive
    /// for as long as sweeping should continue.
    pub fn spawn_sweeper(&self) -> Sweeper {
        Sweeper::spawn(self.inner.cache.clone(), self.inner.cache_config.sweep_interval)
    }

    /// Cache-aware lookup shared by all request kinds.
    ///
    /// `decode` turns a raw body into an envelope. A cached body that no
    /// longer decodes is ignored and fetched again.
    pub(crate) async fn lookup<T, D>(
        &self,
        kind: RequestKind,
        params: QueryParams,
        decode: D,
    ) -> Result<Envelope<T>, ApiError>
    where
        D: Fn(&[u8]) -> Result<Envelope<T>, ApiError>,
    {
        let key = CacheKey::new(kind, &params);

        if let Some(cached) = self.inner.cache.get(key.as_str()).await {
            if let Ok(envelope) = decode(&cached.data) {
                log::debug!("cache hit for {}", key);
                return Ok(envelope);
            }
        }
        log::debug!("cache miss for {}", key);

        let transport = &self.inner.transport;
        let body = self
            .inner
            .rate_limiter
            .schedule(|| transport.get(&params))
            .await?;
        let envelope = decode(&body)?;

        if envelope.is_success() || kind.caches_failures() {
            let ttl = self.inner.cache_config.ttl_for(kind);
            self.inner
                .cache
                .set(key.as_str(), CachedValue::with_ttl(body, ttl))
                .await;
        }

        Ok(envelope)
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`CatalogClient`].
///
/// Uses the typestate pattern to ensure the API key is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = CatalogClient::builder()
///     .api_key("my-key")
///     .cache_config(CacheConfig::default().with_search_ttl(Duration::from_secs(60)))
///     .rate_limiter(RateLimiter::new(Duration::from_millis(500)))
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct CatalogClientBuilder<Key> {
    api_key: Key,
    base_url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    transport: Option<Arc<dyn Transport>>,
    cache: Option<Arc<dyn CacheProvider>>,
    cache_config: CacheConfig,
    rate_limiter: Option<RateLimiter>,
}

impl CatalogClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: Missing,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
            transport: None,
            cache: None,
            cache_config: CacheConfig::default(),
            rate_limiter: None,
        }
    }

    /// Sets the API key sent with every request.
    pub fn api_key(self, api_key: impl Into<String>) -> CatalogClientBuilder<Set<String>> {
        CatalogClientBuilder {
            api_key: Set(api_key.into()),
            base_url: self.base_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            transport: self.transport,
            cache: self.cache,
            cache_config: self.cache_config,
            rate_limiter: self.rate_limiter,
        }
    }
}

impl Default for CatalogClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> CatalogClientBuilder<K> {
    /// Sets the endpoint URL.
    ///
    /// Defaults to [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replaces HTTP with a custom transport.
    ///
    /// The base URL, timeouts and HTTP client are ignored when set.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets the cache provider.
    ///
    /// If not set, a fresh [`InMemoryCache`] is used.
    pub fn cache(mut self, cache: Arc<dyn CacheProvider>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the cache TTLs and sweep interval.
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Sets the rate limiter.
    ///
    /// Pass a clone of an existing limiter to share its budget. If not
    /// set, [`RateLimiter::default`] is used.
    pub fn rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }
}

impl CatalogClientBuilder<Set<String>> {
    /// Builds the [`CatalogClient`].
    ///
    /// Fails only if a default HTTP client has to be created and cannot be.
    pub fn build(self) -> Result<CatalogClient, ApiError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let http_client = match self.http_client {
                    Some(client) => client,
                    None => {
                        let mut builder = Client::builder();
                        if let Some(timeout) = self.connect_timeout {
                            builder = builder.connect_timeout(timeout);
                        }
                        builder.build()?
                    }
                };
                let transport = HttpTransport::new(http_client, self.base_url, self.api_key.0)
                    .with_timeout(self.timeout);
                Arc::new(transport) as Arc<dyn Transport>
            }
        };

        Ok(CatalogClient {
            inner: Arc::new(CatalogClientInner {
                transport,
                cache: self
                    .cache
                    .unwrap_or_else(|| Arc::new(InMemoryCache::new()) as Arc<dyn CacheProvider>),
                cache_config: self.cache_config,
                rate_limiter: self.rate_limiter.unwrap_or_default(),
            }),
        })
    }
}
