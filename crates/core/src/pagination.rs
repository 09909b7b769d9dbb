//! Page-number pagination shared by the listing views.

use serde::Serialize;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on items per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Build a page request from raw query values, clamping out-of-range input.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: clamp_page(page),
            page_size: clamp_page_size(page_size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        }
    }

    /// Row limit for this page.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Row offset for this page. Saturates for absurd page numbers, which
    /// then read past the last row.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus totals.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        let total = total.max(0);
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total,
            total_pages: (total + request.page_size - 1) / request.page_size,
        }
    }
}

/// Clamp a user-provided page size into `[1, max]`.
pub fn clamp_page_size(page_size: Option<i64>, default: i64, max: i64) -> i64 {
    page_size.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_uses_default_when_none() {
        assert_eq!(clamp_page_size(None, 20, 100), 20);
    }

    #[test]
    fn page_size_respects_max() {
        assert_eq!(clamp_page_size(Some(500), 20, 100), 100);
    }

    #[test]
    fn page_size_floors_at_one() {
        assert_eq!(clamp_page_size(Some(0), 20, 100), 1);
        assert_eq!(clamp_page_size(Some(-3), 20, 100), 1);
    }

    #[test]
    fn page_floors_at_one() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-7)), 1);
        assert_eq!(clamp_page(Some(4)), 4);
    }

    #[test]
    fn offset_is_derived_from_page() {
        let req = PageRequest::new(Some(3), Some(10));
        assert_eq!(req.limit(), 10);
        assert_eq!(req.offset(), 20);
        assert_eq!(PageRequest::default().offset(), 0);
    }

    #[test]
    fn offset_saturates_on_huge_page() {
        let req = PageRequest::new(Some(i64::MAX), Some(MAX_PAGE_SIZE));
        assert_eq!(req.page, i64::MAX);
        assert_eq!(req.offset(), i64::MAX);
    }

    #[test]
    fn total_pages_rounds_up() {
        let req = PageRequest::new(Some(1), Some(10));
        assert_eq!(Page::<()>::new(vec![], req, 0).total_pages, 0);
        assert_eq!(Page::<()>::new(vec![], req, 10).total_pages, 1);
        assert_eq!(Page::<()>::new(vec![], req, 11).total_pages, 2);
    }
}
