//! Derived page of query results.

use serde::Serialize;

/// One page of a derived result set. Never persisted; recomputed on
/// every mutation of the spec or the underlying collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<R> {
    /// Records of the current page, in final sort order.
    pub items: Vec<R>,
    /// Size of the filtered set before pagination.
    pub total_count: usize,
    /// `max(1, ceil(total_count / page_size))`; 1 even when empty.
    pub page_count: usize,
}

impl<R> Default for Page<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page_count: 1,
        }
    }
}

impl<R> Page<R> {
    /// Page count for a given total and page size.
    #[must_use]
    pub fn count_pages(total_count: usize, page_size: usize) -> usize {
        if total_count == 0 {
            1
        } else {
            total_count.div_ceil(page_size)
        }
    }
}
