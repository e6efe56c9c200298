//! # Pagination
//!
//! Server-side pagination cursor. There is no page cache: every page change
//! re-fetches, and the cursor only moves when a response arrives.

use serde::{Deserialize, Serialize};
use shared::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
        }
    }
}

impl Pagination {
    /// Apply a successful response for `requested_page`.
    pub fn apply<T>(&mut self, requested_page: u32, page: &Page<T>) {
        self.total_pages = page.total_pages.max(1);
        self.total_items = page.total_items;
        self.current_page = requested_page.max(1);
    }

    /// Clamp a page number into `1..=total_pages`.
    pub fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages.max(1))
    }

    pub fn next_page(&self) -> u32 {
        self.clamp(self.current_page.saturating_add(1))
    }

    pub fn prev_page(&self) -> u32 {
        self.clamp(self.current_page.saturating_sub(1))
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total_pages: u32, total_items: u64) -> Page<()> {
        Page {
            items: Vec::new(),
            current_page: 1,
            total_pages,
            total_items,
        }
    }

    #[test]
    fn test_apply_uses_requested_page() {
        let mut pagination = Pagination::default();
        pagination.apply(3, &page(5, 48));
        assert_eq!(
            pagination,
            Pagination {
                current_page: 3,
                total_pages: 5,
                total_items: 48
            }
        );
    }

    #[test]
    fn test_navigation_clamps() {
        let mut pagination = Pagination::default();
        assert_eq!(pagination.next_page(), 1);
        assert_eq!(pagination.prev_page(), 1);
        assert!(!pagination.has_next());

        pagination.apply(2, &page(2, 15));
        assert_eq!(pagination.next_page(), 2);
        assert_eq!(pagination.prev_page(), 1);
        assert_eq!(pagination.clamp(0), 1);
        assert_eq!(pagination.clamp(9), 2);
        assert!(pagination.has_prev());
    }

    #[test]
    fn test_empty_result_keeps_one_page() {
        let mut pagination = Pagination::default();
        pagination.apply(1, &page(0, 0));
        assert_eq!(pagination.total_pages, 1);
    }
}
