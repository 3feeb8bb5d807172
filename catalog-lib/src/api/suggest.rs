//! Autocomplete suggestions.

use std::future::Future;
use std::future::IntoFuture;
use std::pin::Pin;

use crate::CatalogClient;
use crate::model::Item;

use super::RequestKind;
use super::decode_search;

/// Queries shorter than this (in characters) never leave the client.
pub const MIN_SUGGEST_CHARS: usize = 2;

impl CatalogClient {
    /// Fetches autocomplete suggestions for a partial title.
    ///
    /// Never fails: short queries, remote failures and "nothing found"
    /// all yield an empty list.
    pub fn suggest(&self, query: impl Into<String>) -> SuggestBuilder<'_> {
        SuggestBuilder {
            client: self,
            query: query.into(),
            limit: None,
        }
    }
}

/// Builder for a suggest request.
pub struct SuggestBuilder<'a> {
    client: &'a CatalogClient,
    query: String,
    limit: Option<usize>,
}

impl<'a> SuggestBuilder<'a> {
    /// Returns at most `limit` suggestions.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Execute the request.
    pub async fn execute(self) -> Vec<Item> {
        if self.query.chars().count() < MIN_SUGGEST_CHARS {
            return Vec::new();
        }

        let params = vec![("s", self.query.clone()), ("page", "1".to_string())];
        let result = self
            .client
            .lookup(RequestKind::Suggest, params, |body| decode_search(body, 1))
            .await;

        let mut items = match result {
            Ok(envelope) => envelope.success().map(|page| page.into_items()).unwrap_or_default(),
            Err(e) => {
                log::warn!("suggestions for {:?} failed: {}", self.query, e);
                Vec::new()
            }
        };

        if let Some(limit) = self.limit {
            items.truncate(limit);
        }
        items
    }
}

impl<'a> IntoFuture for SuggestBuilder<'a> {
    type Output = Vec<Item>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}
