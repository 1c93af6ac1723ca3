//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Page size the backend applies when none is requested.
pub const DEFAULT_PAGE_SIZE: u64 = 25;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page; `None` lets the backend decide.
    #[serde(default)]
    pub page_size: Option<u64>,
}

impl PageRequest {
    /// Request the given page with the backend's page size.
    pub fn new(page: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: None,
        }
    }

    /// Request the given page with an explicit page size.
    pub fn sized(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: Some(page_size.max(1)),
        }
    }

    /// Query parameters using the `page_size` spelling.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.to_query_with("page_size")
    }

    /// Query parameters with a custom page-size key (some endpoints use
    /// `per_page`).
    pub fn to_query_with(&self, size_key: &str) -> Vec<(String, String)> {
        let mut query = vec![("page".to_string(), self.page.to_string())];
        if let Some(size) = self.page_size {
            query.push((size_key.to_string(), size.to_string()));
        }
        query
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1)
    }
}

/// One page of an aggregated list as returned by the backend:
/// `{results: [...], count, page_size}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub results: Vec<T>,
    /// Total number of items across all pages.
    pub count: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl<T> Page<T> {
    /// Total number of pages (`0` for an empty list).
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.count.div_ceil(self.page_size)
    }

    /// Whether a page after `page` exists.
    pub fn has_next(&self, page: u64) -> bool {
        page < self.total_pages()
    }

    /// Whether a page before `page` exists.
    pub fn has_previous(&self, page: u64) -> bool {
        page > 1
    }

    /// Position of the `index`-th row of `page` within the whole list (1-based).
    pub fn row_number(&self, page: u64, index: usize) -> u64 {
        page.saturating_sub(1) * self.page_size + index as u64 + 1
    }

    /// Map the items while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            count: self.count,
            page_size: self.page_size,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}
