//! Request parameters and pagination utilities

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

/// Fallback page size when no configuration has been applied
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Name of the response header carrying pagination metadata
pub const PAGINATION_HEADER: &str = "x-pagination";

/// Query parameters for the authors collection
///
/// Deserialized fresh from the query string on every request and treated as
/// immutable once [`clamped`](Self::clamped) has been applied.
///
/// # Example
/// ```text
/// GET /api/authors?orderBy=name desc&fields=id,name&pageNumber=2&pageSize=5&genre=Fantasy
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorsResourceParameters {
    /// Page number (starts at 1)
    pub page_number: Option<usize>,

    /// Number of items per page, clamped to the configured maximum
    pub page_size: Option<usize>,

    /// Comma-separated sort expression, e.g. `"name desc,age"`
    pub order_by: Option<String>,

    /// Comma-separated projection field list, e.g. `"id,name"`
    pub fields: Option<String>,

    /// Exact genre filter
    pub genre: Option<String>,

    /// Free-text search over names and genre
    pub search_query: Option<String>,
}

impl AuthorsResourceParameters {
    /// Effective page number, ensuring a minimum of 1
    pub fn page(&self) -> usize {
        self.page_number.unwrap_or(1).max(1)
    }

    /// Effective page size; falls back to [`DEFAULT_PAGE_SIZE`] when the
    /// request did not carry one and no clamping has been applied yet
    pub fn size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    /// Normalize paging against the configured bounds
    ///
    /// Handlers apply this once, before the parameters are passed on; after
    /// that, `page()` and `size()` read the stored effective values.
    pub fn clamped(mut self, pagination: &PaginationConfig) -> Self {
        self.page_number = Some(self.page());
        self.page_size = Some(
            self.page_size
                .unwrap_or(pagination.default_page_size)
                .clamp(1, pagination.max_page_size),
        );
        self
    }
}

/// One page of results plus the counts needed to describe its position
#[derive(Debug, Clone)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page_size: usize,
    pub current_page: usize,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: usize, current_page: usize, page_size: usize) -> Self {
        Self {
            items,
            total_count,
            page_size,
            current_page,
        }
    }

    /// Total number of pages (ceiling division)
    pub fn total_pages(&self) -> usize {
        let size = self.page_size.max(1);
        if self.total_count == 0 {
            0
        } else {
            self.total_count.div_ceil(size)
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Convert the items while keeping the pagination counts
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
        }
    }
}

/// Pagination metadata serialized into the `X-Pagination` response header
///
/// The plain representation carries previous/next page URLs here; the
/// hypermedia representation omits them (its links live in the body).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total_count: usize,
    pub page_size: usize,
    pub current_page: usize,
    pub total_pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_link: Option<String>,
}

impl PaginationMeta {
    /// Counts-only metadata, for the hypermedia representation
    pub fn counts_only<T>(paged: &PagedResult<T>) -> Self {
        Self {
            total_count: paged.total_count,
            page_size: paged.page_size,
            current_page: paged.current_page,
            total_pages: paged.total_pages(),
            previous_page_link: None,
            next_page_link: None,
        }
    }

    /// Full metadata with page URLs, for the plain representation
    pub fn with_links<T>(
        paged: &PagedResult<T>,
        previous_page_link: Option<String>,
        next_page_link: Option<String>,
    ) -> Self {
        Self {
            previous_page_link,
            next_page_link,
            ..Self::counts_only(paged)
        }
    }

    /// Serialize for the response header
    pub fn to_header_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
