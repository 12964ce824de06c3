//! Pagination and result-window types for query operations.

use serde::{Deserialize, Serialize};

/// MySQL idiom for "no upper bound" when only an offset is requested.
const NO_LIMIT: u64 = u64::MAX;

/// An optional offset/limit window applied to a query.
///
/// This replaces the `-1` sentinel convention for "unbounded": an absent
/// bound is simply `None`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Window {
    /// Number of rows to skip before the first returned row.
    pub offset: Option<u64>,
    /// Maximum number of rows to return.
    pub limit: Option<u64>,
}

impl Window {
    /// An unbounded window (all rows).
    #[must_use]
    pub const fn all() -> Self {
        Self {
            offset: None,
            limit: None,
        }
    }

    /// A window with both bounds set.
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    /// A window returning at most `limit` rows from the start.
    #[must_use]
    pub const fn first(limit: u64) -> Self {
        Self {
            offset: None,
            limit: Some(limit),
        }
    }

    /// Returns true if neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.offset.is_none() && self.limit.is_none()
    }

    /// Renders the window as a SQL `LIMIT ... OFFSET ...` suffix.
    ///
    /// Returns an empty string for an unbounded window. MySQL requires a
    /// LIMIT clause whenever OFFSET is present, so an offset-only window
    /// uses the maximum row count as its limit.
    #[must_use]
    pub fn clause(&self) -> String {
        match (self.limit, self.offset) {
            (None, None) => String::new(),
            (Some(limit), None) => format!(" LIMIT {}", limit),
            (limit, Some(offset)) => {
                format!(" LIMIT {} OFFSET {}", limit.unwrap_or(NO_LIMIT), offset)
            }
        }
    }
}

impl From<PageRequest> for Window {
    fn from(page: PageRequest) -> Self {
        Self::new(page.offset(), page.limit())
    }
}

/// A request for a page of results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (0-indexed).
    pub page: u64,
    /// The number of items per page.
    pub size: u64,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: u64 = 20;
    /// The maximum allowed page size.
    pub const MAX_SIZE: u64 = 100;

    /// Creates a new page request, clamping the size to [`Self::MAX_SIZE`].
    #[must_use]
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.min(Self::MAX_SIZE),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }

    /// Returns the row offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page * self.size
    }

    /// Returns the row limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A page of results together with paging metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// The current page number (0-indexed).
    pub page: u64,
    /// The number of items per page.
    pub size: u64,
    /// The total number of items across all pages.
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(content: Vec<T>, page: u64, size: u64, total_elements: u64) -> Self {
        Self {
            content,
            page,
            size,
            total_elements,
        }
    }

    /// Creates an empty page.
    #[must_use]
    pub fn empty(page: u64, size: u64) -> Self {
        Self::new(Vec::new(), page, size, 0)
    }

    /// The total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            (self.total_elements + self.size - 1) / self.size
        }
    }

    /// Whether a page follows this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages()
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Returns true if the page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Maps the page content to a different type, keeping the metadata.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}
