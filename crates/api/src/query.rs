//! Shared query parameter types for API handlers.

use crewhub_core::pagination::PageRequest;
use serde::Deserialize;

/// Page-number pagination parameters (`?page=&page_size=`).
///
/// Out-of-range values are clamped by [`PageRequest::new`], never rejected.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        PageRequest::new(params.page, params.page_size)
    }
}
