//! Page type for search results.

use super::Item;

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    items: Vec<Item>,
    /// Total number of matches for the query, across all pages.
    total_count: usize,
    /// 1-based page index this page corresponds to.
    page: u32,
}

impl SearchPage {
    /// Creates a new page.
    pub fn new(items: Vec<Item>, total_count: usize, page: u32) -> Self {
        Self {
            items,
            total_count,
            page,
        }
    }

    /// Returns the items in this page.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consumes the page and returns the items.
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Returns the total match count reported by the remote.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the page index.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
