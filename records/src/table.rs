//! Search, enum filter and paging over an already-fetched list.
//!
//! Everything here is local: narrowing the rows never touches the network.
//! Changing the query or the filter always returns to the first page.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use crate::RecordId;
use crate::error::ApiError;
use crate::resource::{Resource, Row};

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct TableState<R> {
    items: Vec<R>,
    pub loading: bool,
    pub error: Option<ApiError>,
    query: String,
    filter: Option<String>,
    page: usize,
    page_size: usize,
}

impl<R> Default for TableState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            query: String::new(),
            filter: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl<R: Row> TableState<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Mark a fetch as in flight. Existing rows stay visible.
    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace rows with a fresh fetch result.
    pub fn set_items(&mut self, items: Vec<R>) {
        self.items = items;
        self.loading = false;
        self.error = None;
        self.page = self.page.min(self.page_count() - 1);
    }

    /// Record a failed fetch or mutation, keeping current rows.
    pub fn fail(&mut self, error: ApiError) {
        self.loading = false;
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    #[must_use]
    pub fn items(&self) -> &[R] {
        &self.items
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 0;
    }

    #[must_use]
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Set the enum filter; `None` or an empty value shows every category.
    pub fn set_filter(&mut self, filter: Option<&str>) {
        self.filter = filter.filter(|f| !f.is_empty()).map(str::to_owned);
        self.page = 0;
    }

    /// Whether `row` passes the current query and filter.
    #[must_use]
    pub fn matches(&self, row: &R) -> bool {
        if let Some(filter) = &self.filter {
            if row.category() != Some(filter.as_str()) {
                return false;
            }
        }
        let needle = self.query.trim().to_lowercase();
        needle.is_empty() || row.search_text().to_lowercase().contains(&needle)
    }

    /// Every row passing the query and filter, in list order.
    #[must_use]
    pub fn visible(&self) -> Vec<&R> {
        self.items.iter().filter(|r| self.matches(r)).collect()
    }

    /// Visible rows on the current page.
    #[must_use]
    pub fn page_rows(&self) -> Vec<&R> {
        self.visible()
            .into_iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .collect()
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for the visible rows; never zero.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.visible().len().div_ceil(self.page_size).max(1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }
}

impl<R: Resource> TableState<R> {
    #[must_use]
    pub fn find(&self, id: RecordId) -> Option<&R> {
        self.items.iter().find(|r| r.id() == Some(id))
    }

    pub fn find_mut(&mut self, id: RecordId) -> Option<&mut R> {
        self.items.iter_mut().find(|r| r.id() == Some(id))
    }

    /// Apply a completed create or update: replace the row with the same id, or append.
    pub fn upsert(&mut self, item: R) {
        let existing = item
            .id()
            .and_then(|id| self.items.iter().position(|r| r.id() == Some(id)));
        match existing {
            Some(index) => self.items[index] = item,
            None => self.items.push(item),
        }
    }

    /// Apply a completed delete. Returns the removed row.
    pub fn remove(&mut self, id: RecordId) -> Option<R> {
        let index = self.items.iter().position(|r| r.id() == Some(id))?;
        let removed = self.items.remove(index);
        self.page = self.page.min(self.page_count() - 1);
        Some(removed)
    }
}
