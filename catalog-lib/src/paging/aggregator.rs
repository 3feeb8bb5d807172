//! Aggregation state machine.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::model::Item;
use crate::model::SearchFilters;
use crate::model::SearchPage;

/// Number of items the remote returns per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Identity of one logical search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    pub text: String,
    pub filters: SearchFilters,
}

impl QueryKey {
    pub fn new(text: impl Into<String>, filters: SearchFilters) -> Self {
        Self {
            text: text.into(),
            filters,
        }
    }
}

/// A page fetch the caller should perform.
///
/// Hand the result back to [`Aggregator::complete`] together with this
/// request; the embedded generation is how results for a superseded query
/// are recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    generation: u64,
    pub query: QueryKey,
    pub page: u32,
}

impl PageRequest {
    /// Returns the aggregation generation this request was issued under.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Where the aggregator is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// No query yet.
    Empty,
    /// Waiting for the next viewport-proximity event.
    Idle,
    /// A request for this page is outstanding.
    Fetching(u32),
    /// No further pages will be requested for this query.
    Exhausted,
}

/// What happened when a page result was handed back.
#[derive(Debug)]
pub enum PageOutcome {
    /// The page was merged.
    Merged {
        /// Items that were not already present.
        added: usize,
        /// Whether the query is now exhausted.
        exhausted: bool,
    },
    /// The fetch failed; the query is now exhausted.
    Failed(Error),
    /// The result belonged to a superseded query or page and was dropped.
    Stale,
}

/// Captured aggregation, restorable without refetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationSnapshot {
    pub query: QueryKey,
    pub items: Vec<Item>,
    pub next_page: u32,
    pub total_count: usize,
    pub exhausted: bool,
}

#[derive(Debug, Clone)]
struct AggregatedQuery {
    key: QueryKey,
    items: Vec<Item>,
    seen: HashSet<String>,
    next_page: u32,
    total_count: usize,
    exhausted: bool,
}

impl AggregatedQuery {
    fn new(key: QueryKey) -> Self {
        Self {
            key,
            items: Vec::new(),
            seen: HashSet::new(),
            next_page: 1,
            total_count: 0,
            exhausted: false,
        }
    }

    /// Appends items whose id is not present yet, keeping first-seen order.
    fn merge(&mut self, items: Vec<Item>) -> usize {
        let before = self.items.len();
        for item in items {
            if self.seen.insert(item.id.clone()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    fn clear_items(&mut self) {
        self.items.clear();
        self.seen.clear();
    }
}

/// Accumulates the pages of one search into a single deduplicated list.
///
/// At most one page request is outstanding at a time. Proximity events
/// that arrive while a page is in flight are ignored, and page N+1 is only
/// requested after page N's result has been handed back.
///
/// # Example
///
/// ```
/// use catalog_lib::model::{Item, SearchFilters, SearchPage};
/// use catalog_lib::paging::{Aggregator, PageOutcome};
///
/// let mut agg = Aggregator::default();
/// let request = agg.set_query("Batman", SearchFilters::new()).unwrap();
/// assert_eq!(request.page, 1);
///
/// let page = SearchPage::new(vec![Item::new("tt1"), Item::new("tt2")], 15, 1);
/// agg.complete(&request, Ok(page));
/// assert_eq!(agg.items().len(), 2);
/// assert_eq!(agg.next_page(), 2);
/// assert!(!agg.is_exhausted());
/// ```
#[derive(Debug, Clone)]
pub struct Aggregator {
    page_size: usize,
    generation: u64,
    state: FetchState,
    query: Option<AggregatedQuery>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Aggregator {
    /// Creates an aggregator for a remote with the given page size.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            generation: 0,
            state: FetchState::Empty,
            query: None,
        }
    }

    /// Starts a new search, discarding all accumulated state.
    ///
    /// A fresh query is never a continuation of the previous one, even if
    /// the text and filters are identical; resubmitting is how a failed
    /// search is retried. Blank query text is ignored and leaves the
    /// current state untouched. Surrounding whitespace is not part of the
    /// query.
    pub fn set_query(&mut self, text: &str, filters: SearchFilters) -> Option<PageRequest> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.generation += 1;
        self.query = Some(AggregatedQuery::new(QueryKey::new(text, filters)));
        self.state = FetchState::Fetching(1);
        self.request(1)
    }

    /// Handles the "viewport is near the end of the list" event.
    ///
    /// Returns the next page request when idle with pages remaining;
    /// otherwise does nothing.
    pub fn viewport_proximity(&mut self) -> Option<PageRequest> {
        if self.state != FetchState::Idle {
            return None;
        }
        let next_page = self.query.as_ref()?.next_page;
        self.state = FetchState::Fetching(next_page);
        self.request(next_page)
    }

    /// Hands back the result of a page request.
    ///
    /// Results for a request issued before the latest query change or
    /// restore are dropped and reported as [`PageOutcome::Stale`].
    pub fn complete(
        &mut self,
        request: &PageRequest,
        result: Result<SearchPage, Error>,
    ) -> PageOutcome {
        if request.generation != self.generation
            || self.state != FetchState::Fetching(request.page)
        {
            log::debug!(
                "discarding stale page {} for {:?}",
                request.page,
                request.query.text
            );
            return PageOutcome::Stale;
        }
        let Some(query) = self.query.as_mut() else {
            return PageOutcome::Stale;
        };

        match result {
            Ok(page) => {
                query.total_count = page.total_count();
                let returned = page.len();
                let added = query.merge(page.into_items());

                let fetched = request.page as usize;
                let next_page = request.page.checked_add(1);
                query.exhausted = returned == 0
                    || next_page.is_none()
                    || fetched.saturating_mul(self.page_size) >= query.total_count;
                query.next_page = next_page.unwrap_or(request.page);

                self.state = if query.exhausted {
                    FetchState::Exhausted
                } else {
                    FetchState::Idle
                };

                PageOutcome::Merged {
                    added,
                    exhausted: query.exhausted,
                }
            }
            Err(e) => {
                if request.page == 1 {
                    query.clear_items();
                    query.total_count = 0;
                }
                query.exhausted = true;
                self.state = FetchState::Exhausted;
                PageOutcome::Failed(e)
            }
        }
    }

    /// Captures the current aggregation.
    ///
    /// Returns `None` before the first query. A snapshot taken while a
    /// page is in flight records the state before that page.
    pub fn snapshot(&self) -> Option<AggregationSnapshot> {
        let query = self.query.as_ref()?;
        Some(AggregationSnapshot {
            query: query.key.clone(),
            items: query.items.clone(),
            next_page: query.next_page,
            total_count: query.total_count,
            exhausted: query.exhausted,
        })
    }

    /// Reinstates a captured aggregation exactly, without refetching.
    ///
    /// Any request still in flight becomes stale.
    pub fn restore(&mut self, snapshot: AggregationSnapshot) {
        self.generation += 1;

        let mut query = AggregatedQuery::new(snapshot.query);
        query.merge(snapshot.items);
        query.next_page = snapshot.next_page.max(1);
        query.total_count = snapshot.total_count;
        query.exhausted = snapshot.exhausted;

        self.state = if query.exhausted {
            FetchState::Exhausted
        } else {
            FetchState::Idle
        };
        self.query = Some(query);
    }

    /// Returns the accumulated items in first-seen order.
    pub fn items(&self) -> &[Item] {
        self.query.as_ref().map(|q| q.items.as_slice()).unwrap_or(&[])
    }

    /// Returns the active query, if any.
    pub fn query(&self) -> Option<&QueryKey> {
        self.query.as_ref().map(|q| &q.key)
    }

    /// Returns the next page index to request.
    pub fn next_page(&self) -> u32 {
        self.query.as_ref().map(|q| q.next_page).unwrap_or(1)
    }

    /// Returns the last total reported by the remote.
    pub fn total_count(&self) -> usize {
        self.query.as_ref().map(|q| q.total_count).unwrap_or(0)
    }

    /// Returns `true` once no further pages will be requested.
    pub fn is_exhausted(&self) -> bool {
        self.state == FetchState::Exhausted
    }

    /// Returns the fetch state.
    pub fn state(&self) -> FetchState {
        self.state
    }

    /// Returns the configured page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn request(&self, page: u32) -> Option<PageRequest> {
        let query = self.query.as_ref()?;
        Some(PageRequest {
            generation: self.generation,
            query: query.key.clone(),
            page,
        })
    }
}
