//! Shared response envelope types for API handlers.
//!
//! List endpoints return a `{ "count": ..., "results": [...] }` envelope;
//! single objects are returned unwrapped.

use serde::Serialize;
use studyhub_db::query::Page;

/// Standard paginated collection envelope.
///
/// `count` is the total number of rows matching the request's filters, not
/// the page length.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub count: i64,
    pub results: Vec<T>,
}

impl<T: Serialize> From<Page<T>> for Paginated<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            count: page.total,
            results: page.items,
        }
    }
}
