//! Async driver binding an aggregator to a client.

use tokio::sync::Mutex;

use crate::CatalogClient;
use crate::model::Item;
use crate::model::SearchFilters;

use super::AggregationSnapshot;
use super::Aggregator;
use super::FetchState;
use super::PageOutcome;
use super::PageRequest;

/// One search box's worth of infinite-scroll state.
///
/// The aggregator lock is only held to decide and to merge, never across
/// the remote call, so a query change made while a page is loading takes
/// effect immediately and the late page is dropped as stale.
///
/// # Example
///
/// ```ignore
/// let session = SearchSession::new(client);
/// session.submit("Batman", SearchFilters::new()).await;
///
/// // viewport reached the end of the list
/// session.load_more().await;
/// ```
pub struct SearchSession {
    client: CatalogClient,
    aggregator: Mutex<Aggregator>,
}

impl SearchSession {
    /// Creates a session with the remote's default page size.
    pub fn new(client: CatalogClient) -> Self {
        Self::with_aggregator(client, Aggregator::default())
    }

    /// Creates a session around an existing aggregator.
    pub fn with_aggregator(client: CatalogClient, aggregator: Aggregator) -> Self {
        Self {
            client,
            aggregator: Mutex::new(aggregator),
        }
    }

    /// Starts a new search and fetches its first page.
    ///
    /// Returns `None` if the query text is blank.
    pub async fn submit(&self, text: &str, filters: SearchFilters) -> Option<PageOutcome> {
        let request = self.aggregator.lock().await.set_query(text, filters)?;
        Some(self.run(request).await)
    }

    /// Feeds a viewport-proximity event and fetches the next page if due.
    ///
    /// Returns `None` when no fetch was started: a page is already in
    /// flight, the query is exhausted, or there is no query.
    pub async fn load_more(&self) -> Option<PageOutcome> {
        let request = self.aggregator.lock().await.viewport_proximity()?;
        Some(self.run(request).await)
    }

    async fn run(&self, request: PageRequest) -> PageOutcome {
        let result = self
            .client
            .search(request.query.text.clone())
            .page(request.page)
            .filters(request.query.filters.clone())
            .await;

        self.aggregator.lock().await.complete(&request, result)
    }

    /// Captures the current aggregation.
    pub async fn snapshot(&self) -> Option<AggregationSnapshot> {
        self.aggregator.lock().await.snapshot()
    }

    /// Reinstates a captured aggregation without refetching.
    pub async fn restore(&self, snapshot: AggregationSnapshot) {
        self.aggregator.lock().await.restore(snapshot);
    }

    /// Returns a copy of the accumulated items.
    pub async fn items(&self) -> Vec<Item> {
        self.aggregator.lock().await.items().to_vec()
    }

    /// Returns the fetch state.
    pub async fn state(&self) -> FetchState {
        self.aggregator.lock().await.state()
    }

    /// Returns the last total reported by the remote.
    pub async fn total_count(&self) -> usize {
        self.aggregator.lock().await.total_count()
    }

    /// Returns the client this session fetches through.
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }
}
