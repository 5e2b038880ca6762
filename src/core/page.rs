//! Pagination types and page arithmetic
//!
//! The directory API exposes paging as two endpoints per entity: one that
//! returns the total row count and one that returns a window of rows. The
//! arithmetic that turns (requested page, page size, row count) into the
//! effective page and offset lives here so the two-phase driver and tests
//! share one definition.

use serde::{Deserialize, Serialize};

/// Default page size for listing views
pub const DEFAULT_LIST_PAGE_SIZE: u64 = 5;

/// One window of a paged listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Effective page number (starts at 1, clamped to the available range)
    pub page_no: u64,
    pub page_size: u64,
    /// Total rows matching the filter
    pub row_count: u64,
    /// Total pages (`0` when nothing matched)
    pub page_count: u64,
    pub entities: Vec<T>,
}

impl<T> Page<T> {
    /// The page an empty result set produces: page 1 of 0
    pub fn empty(page_size: u64) -> Self {
        Self {
            page_no: 1,
            page_size,
            row_count: 0,
            page_count: 0,
            entities: Vec::new(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page_no < self.page_count
    }

    pub fn has_prev(&self) -> bool {
        self.page_no > 1
    }
}

/// A requested page, before the row count is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_no: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Create a request; a page size below 1 is clamped to 1
    pub fn new(page_no: u64, page_size: u64) -> Self {
        Self {
            page_no,
            page_size: page_size.max(1),
        }
    }

    /// Resolve the request against the actual row count
    pub fn resolve(&self, row_count: u64) -> ResolvedPage {
        let page_count = row_count.div_ceil(self.page_size);
        let page_no = if page_count == 0 {
            1
        } else {
            self.page_no.clamp(1, page_count)
        };
        ResolvedPage {
            page_no,
            page_count,
            row_count,
            offset: (page_no - 1) * self.page_size,
        }
    }
}

/// The effective paging window once the row count is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPage {
    pub page_no: u64,
    pub page_count: u64,
    pub row_count: u64,
    pub offset: u64,
}

impl ResolvedPage {
    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        let request = PageRequest::new(1, 10);
        assert_eq!(request.resolve(0).page_count, 0);
        assert_eq!(request.resolve(1).page_count, 1);
        assert_eq!(request.resolve(10).page_count, 1);
        assert_eq!(request.resolve(11).page_count, 2);
    }

    #[test]
    fn test_page_no_is_clamped_to_range() {
        let request = PageRequest::new(99, 10);
        let resolved = request.resolve(25);
        assert_eq!(resolved.page_count, 3);
        assert_eq!(resolved.page_no, 3);
        assert_eq!(resolved.offset, 20);

        let request = PageRequest::new(0, 10);
        assert_eq!(request.resolve(25).page_no, 1);
    }

    #[test]
    fn test_zero_rows_resolve_to_empty_first_page() {
        let resolved = PageRequest::new(4, 10).resolve(0);
        assert!(resolved.is_empty());
        assert_eq!(resolved.page_no, 1);
        assert_eq!(resolved.offset, 0);
    }

    #[test]
    fn test_page_size_is_clamped_to_one() {
        let request = PageRequest::new(1, 0);
        assert_eq!(request.page_size, 1);
        assert_eq!(request.resolve(3).page_count, 3);
    }

    #[test]
    fn test_empty_page_navigation() {
        let page: Page<i64> = Page::empty(10);
        assert!(!page.has_next());
        assert!(!page.has_prev());
        assert_eq!(page.page_no, 1);
    }

    #[test]
    fn test_middle_page_navigation() {
        let page: Page<i64> = Page {
            page_no: 2,
            page_size: 10,
            row_count: 25,
            page_count: 3,
            entities: vec![],
        };
        assert!(page.has_next());
        assert!(page.has_prev());
    }
}
