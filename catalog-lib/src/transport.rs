//! Wire transport to the remote catalog

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::ApiError;

/// Query parameters of one remote lookup, excluding the API key.
pub type QueryParams = Vec<(&'static str, String)>;

/// Performs a single remote lookup and returns the raw response body.
///
/// The client only ever issues GET requests against one endpoint, varying
/// the query string. Implementations must not cache, throttle or retry;
/// the client does the first two and nobody does the third.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, params: &[(&'static str, String)]) -> Result<Vec<u8>, ApiError>;
}

/// [`Transport`] over HTTP using reqwest.
pub struct HttpTransport {
    http_client: Client,
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport for the given endpoint and API key.
    pub fn new(http_client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the full request URL, API key included.
    pub fn build_url(&self, params: &[(&'static str, String)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("apikey", &self.api_key);
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, params: &[(&'static str, String)]) -> Result<Vec<u8>, ApiError> {
        let url = self.build_url(params)?;

        let mut request = self.http_client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::http(status.as_u16(), body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_appends_key_last() {
        let transport = HttpTransport::new(Client::new(), "https://www.omdbapi.com/", "k3y");
        let url = transport
            .build_url(&[("s", "Batman & Robin".to_string()), ("page", "2".to_string())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.omdbapi.com/?s=Batman+%26+Robin&page=2&apikey=k3y"
        );
    }

    #[test]
    fn test_build_url_rejects_garbage_base() {
        let transport = HttpTransport::new(Client::new(), "not a url", "k");
        let err = transport.build_url(&[]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
