//! Data models shared across database access and API handlers.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub mod appointment;
pub mod chair;
pub mod schedule;
pub mod user;

/// Query parameters for page-based listings.
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct PageQuery {
    /// 1-based page number (default: 1).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Items per page (default: 10, max: 100).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl PageQuery {
    /// Returns the page number, floored at 1.
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// Returns a clamped limit value (1..=100).
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, 100)
    }

    /// Returns the row offset for the current page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Pagination metadata attached to paged responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
    pub last_page: i64,
}

impl PageInfo {
    pub fn new(page: i64, limit: i64, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + limit - 1) / limit
        };
        let last_page = total_pages.max(1);
        let has_next_page = page < total_pages;
        let has_prev_page = page > 1;

        Self {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: limit,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then(|| page + 1),
            prev_page: has_prev_page.then(|| page - 1),
            last_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_clamps_out_of_range_values() {
        let query = PageQuery { page: 0, limit: 500 };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 100);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn page_info_for_middle_page() {
        let info = PageInfo::new(2, 10, 25);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next_page);
        assert!(info.has_prev_page);
        assert_eq!(info.next_page, Some(3));
        assert_eq!(info.prev_page, Some(1));
        assert_eq!(info.last_page, 3);
    }

    #[test]
    fn page_info_for_empty_listing() {
        let info = PageInfo::new(1, 10, 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next_page);
        assert!(!info.has_prev_page);
        assert_eq!(info.next_page, None);
        assert_eq!(info.last_page, 1);
    }

    #[test]
    fn page_info_serializes_camel_case() {
        let json = serde_json::to_value(PageInfo::new(1, 10, 5)).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["itemsPerPage"], 10);
        assert_eq!(json["hasNextPage"], false);
        assert!(json["nextPage"].is_null());
    }
}
