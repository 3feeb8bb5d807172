//! Paged title search.

use std::future::Future;
use std::future::IntoFuture;
use std::pin::Pin;

use crate::CatalogClient;
use crate::error::Error;
use crate::model::ItemKind;
use crate::model::SearchFilters;
use crate::model::SearchPage;

use super::RequestKind;
use super::decode_search;

impl CatalogClient {
    /// Searches the catalog by title.
    ///
    /// Defaults to page 1 with no filters.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let page = client.search("Batman").page(2).kind(ItemKind::Movie).await?;
    /// ```
    pub fn search(&self, title: impl Into<String>) -> SearchBuilder<'_> {
        SearchBuilder::new(self, title.into())
    }
}

/// Builder for a search request.
pub struct SearchBuilder<'a> {
    client: &'a CatalogClient,
    title: String,
    page: u32,
    filters: SearchFilters,
}

impl<'a> SearchBuilder<'a> {
    pub(crate) fn new(client: &'a CatalogClient, title: String) -> Self {
        Self {
            client,
            title,
            page: 1,
            filters: SearchFilters::default(),
        }
    }

    /// Sets the 1-based page index. Zero is treated as 1.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Filters by year. A blank year means no year filter.
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.filters = self.filters.with_year(year);
        self
    }

    /// Filters by kind.
    pub fn kind(mut self, kind: impl Into<Option<ItemKind>>) -> Self {
        self.filters = self.filters.with_kind(kind);
        self
    }

    /// Replaces all filters at once.
    pub fn filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Execute the request.
    pub async fn execute(self) -> Result<SearchPage, Error> {
        let mut params = vec![("s", self.title.clone()), ("page", self.page.to_string())];
        self.filters.append_params(&mut params);

        let page = self.page;
        let result = self
            .client
            .lookup(RequestKind::Search, params, |body| decode_search(body, page))
            .await;

        match result {
            Ok(envelope) => envelope.into_result(),
            Err(e) => {
                log::warn!("search for {:?} page {} failed: {}", self.title, page, e);
                Err(Error::Api(e))
            }
        }
    }
}

impl<'a> IntoFuture for SearchBuilder<'a> {
    type Output = Result<SearchPage, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}
