//! List options and the page-navigation descriptor.

use serde::{Deserialize, Serialize};

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    pub page: i64,
    pub page_size: i64,
}

impl ListOptions {
    /// Build options, normalising a page of 0 or less to 1 and a page size of
    /// 0 or less to 1.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Rows to skip. Saturates for absurdly large pages, which then read
    /// past the end and come back empty.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// One entry in the page window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub number: i64,
    pub is_current: bool,
}

/// Navigation over a paged result: total pages, a window of surrounding
/// pages and the query parameters every generated link carries forward.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    total: i64,
    page_size: i64,
    current: i64,
    window_size: i64,
    params: Vec<(String, String)>,
}

impl Pagination {
    pub fn new(total: i64, page_size: i64, current: i64, window_size: i64) -> Self {
        let mut pagination = Self {
            total: total.max(0),
            page_size: page_size.max(1),
            current: current.max(1),
            window_size: window_size.max(1),
            params: Vec::new(),
        };
        pagination.current = pagination.current.min(pagination.total_pages());
        pagination
    }

    /// Carry `key=value` into every page link. Empty values are skipped.
    pub fn add_param(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.params.push((key.to_string(), value.to_string()));
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn total_pages(&self) -> i64 {
        if self.total == 0 {
            return 1;
        }
        (self.total + self.page_size - 1) / self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    pub fn previous(&self) -> i64 {
        (self.current - 1).max(1)
    }

    pub fn next(&self) -> i64 {
        (self.current + 1).min(self.total_pages())
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Pages around the current one, at most `window_size` of them.
    pub fn pages(&self) -> Vec<PageLink> {
        let total_pages = self.total_pages();
        let size = self.window_size.min(total_pages);

        let mut start = (self.current - size / 2).max(1);
        let mut end = start + size - 1;
        if end > total_pages {
            end = total_pages;
            start = (end - size + 1).max(1);
        }

        (start..=end)
            .map(|number| PageLink {
                number,
                is_current: number == self.current,
            })
            .collect()
    }

    /// Query string for `page`, e.g. `?page=2&language=go`.
    pub fn link(&self, page: i64) -> String {
        let mut link = format!("?page={}", page);
        for (key, value) in &self.params {
            link.push('&');
            link.push_str(&urlencoding::encode(key));
            link.push('=');
            link.push_str(&urlencoding::encode(value));
        }
        link
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(p: &Pagination) -> Vec<i64> {
        p.pages().iter().map(|l| l.number).collect()
    }

    #[test]
    fn test_list_options_normalise_page() {
        assert_eq!(ListOptions::new(0, 20).page, 1);
        assert_eq!(ListOptions::new(-3, 20).page, 1);
        assert_eq!(ListOptions::new(2, 20).offset(), 20);
    }

    #[test]
    fn test_offset_saturates_for_huge_pages() {
        let opts = ListOptions::new(i64::MAX, 20);
        assert_eq!(opts.offset(), i64::MAX);
        assert_eq!(opts.limit(), 20);

        let p = Pagination::new(30, 20, i64::MAX, 5);
        assert_eq!(p.current(), 2);
        assert_eq!(numbers(&p), vec![1, 2]);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(Pagination::new(0, 20, 1, 5).total_pages(), 1);
        assert_eq!(Pagination::new(20, 20, 1, 5).total_pages(), 1);
        assert_eq!(Pagination::new(30, 20, 1, 5).total_pages(), 2);
    }

    #[test]
    fn test_window_is_centred_and_bounded() {
        let p = Pagination::new(200, 10, 10, 5);
        assert_eq!(numbers(&p), vec![8, 9, 10, 11, 12]);

        let p = Pagination::new(200, 10, 1, 5);
        assert_eq!(numbers(&p), vec![1, 2, 3, 4, 5]);

        let p = Pagination::new(200, 10, 20, 5);
        assert_eq!(numbers(&p), vec![16, 17, 18, 19, 20]);

        let p = Pagination::new(30, 20, 2, 5);
        assert_eq!(numbers(&p), vec![1, 2]);
        assert!(p.pages()[1].is_current);
    }

    #[test]
    fn test_current_is_clamped_to_last_page() {
        let p = Pagination::new(30, 20, 9, 5);
        assert_eq!(p.current(), 2);
        assert!(!p.has_next());
        assert!(p.has_previous());
    }

    #[test]
    fn test_links_carry_params() {
        let mut p = Pagination::new(30, 20, 2, 5);
        p.add_param("sort", "moststars");
        p.add_param("q", "");
        p.add_param("language", "c++");
        assert_eq!(p.link(1), "?page=1&sort=moststars&language=c%2B%2B");
    }
}
