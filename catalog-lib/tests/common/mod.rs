//! Shared helpers for integration tests: a scripted in-process remote.

#![allow(dead_code)]

use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use catalog_lib::CatalogClient;
use catalog_lib::error::ApiError;
use catalog_lib::rate_limit::RateLimiter;
use catalog_lib::transport::Transport;
use futures::future::BoxFuture;
use tokio::time::Instant;

pub type Params = Vec<(String, String)>;

type Handler = Arc<dyn Fn(Params) -> BoxFuture<'static, Result<Vec<u8>, ApiError>> + Send + Sync>;

/// Transport that answers from a closure and records every call.
#[derive(Clone)]
pub struct FakeTransport {
    handler: Handler,
    calls: Arc<Mutex<Vec<(Instant, Params)>>>,
}

impl FakeTransport {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>, ApiError>> + Send + 'static,
    {
        Self {
            handler: Arc::new(move |params| Box::pin(handler(params))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always answers with the same body.
    pub fn fixed(body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self::new(move |_| {
            let body = body.clone();
            async move { Ok(body) }
        })
    }

    pub fn calls(&self) -> Vec<Params> {
        self.calls.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn dispatch_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, params: &[(&'static str, String)]) -> Result<Vec<u8>, ApiError> {
        let params: Params = params
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), params.clone()));
        (self.handler)(params).await
    }
}

/// Looks up a parameter by name.
pub fn param<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

/// A successful search body with the given ids.
pub fn search_body(ids: &[&str], total: usize) -> Vec<u8> {
    let items: Vec<_> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "imdbID": id,
                "Title": format!("Title {}", id),
                "Year": "2000",
                "Type": "movie",
                "Poster": "N/A",
            })
        })
        .collect();
    serde_json::json!({
        "Search": items,
        "totalResults": total.to_string(),
        "Response": "True",
    })
    .to_string()
    .into_bytes()
}

/// A failure envelope with the given message.
pub fn failure_body(message: &str) -> Vec<u8> {
    serde_json::json!({ "Response": "False", "Error": message })
        .to_string()
        .into_bytes()
}

/// A successful details body.
pub fn details_body(id: &str, title: &str) -> Vec<u8> {
    serde_json::json!({
        "Title": title,
        "Year": "1995",
        "Plot": "A group of professional bank robbers...",
        "imdbID": id,
        "Type": "movie",
        "Ratings": [{ "Source": "Internet Movie Database", "Value": "8.3/10" }],
        "Response": "True",
    })
    .to_string()
    .into_bytes()
}

/// A client over `transport` with no rate-limit delay.
pub fn client(transport: FakeTransport) -> CatalogClient {
    client_with_limiter(transport, RateLimiter::new(Duration::ZERO))
}

pub fn client_with_limiter(transport: FakeTransport, limiter: RateLimiter) -> CatalogClient {
    CatalogClient::builder()
        .api_key("test-key")
        .transport(transport)
        .rate_limiter(limiter)
        .build()
        .unwrap()
}
