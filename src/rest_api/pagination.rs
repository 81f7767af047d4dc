//! # Pagination
//!
//! Page/limit parsing and the `next`/`prev` descriptors returned with list
//! responses. Pure arithmetic; the store supplies `total`.

use serde::Serialize;

/// Page used when `page` is absent or unusable
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when `limit` is absent or unusable.
/// Overridden by `--default-limit`.
pub const DEFAULT_LIMIT: u64 = 1;

/// A requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,
    /// Records per page
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// Parse raw `page`/`limit` values by their leading integer. Anything
    /// without a positive leading integer falls back to the default.
    pub fn parse(page: Option<&str>, limit: Option<&str>, default_limit: u64) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(default_limit.max(1)),
        }
    }

    /// Index of the first record on this page
    pub fn start_index(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// One past the index of the last record on this page
    pub fn end_index(&self) -> u64 {
        self.page.saturating_mul(self.limit)
    }

    /// Records to skip before this page
    pub fn skip(&self) -> u64 {
        self.start_index()
    }

    /// Describe the neighbouring pages given the total record count
    pub fn pagination(&self, total: u64) -> Pagination {
        Pagination {
            next: (self.end_index() < total).then(|| PageRef {
                page: self.page + 1,
                limit: self.limit,
            }),
            prev: (self.start_index() > 0).then(|| PageRef {
                page: self.page - 1,
                limit: self.limit,
            }),
        }
    }
}

/// Read the leading integer of `raw` (`"2abc"` is 2, `"5.9"` is 5).
/// Signed or digit-less input yields `None`, as does zero.
fn parse_positive(raw: Option<&str>) -> Option<u64> {
    let s = raw?.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse::<u64>().ok().filter(|n| *n > 0)
}

/// Pointer to a neighbouring page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRef {
    pub page: u64,
    pub limit: u64,
}

/// Neighbouring pages; each is omitted when there is no such page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let page = PageRequest::new(2, 10);
        assert_eq!(page.start_index(), 10);
        assert_eq!(page.end_index(), 20);

        let pagination = page.pagination(25);
        assert_eq!(pagination.next, Some(PageRef { page: 3, limit: 10 }));
        assert_eq!(pagination.prev, Some(PageRef { page: 1, limit: 10 }));
    }

    #[test]
    fn test_first_and_last_pages() {
        let first = PageRequest::new(1, 10).pagination(25);
        assert!(first.prev.is_none());
        assert!(first.next.is_some());

        let last = PageRequest::new(3, 10).pagination(25);
        assert!(last.next.is_none());
        assert_eq!(last.prev, Some(PageRef { page: 2, limit: 10 }));
    }

    #[test]
    fn test_exact_fit_has_no_next() {
        let pagination = PageRequest::new(2, 10).pagination(20);
        assert!(pagination.next.is_none());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(PageRequest::parse(None, None, DEFAULT_LIMIT), PageRequest::new(1, 1));
        assert_eq!(
            PageRequest::parse(Some("abc"), Some("0"), 25),
            PageRequest::new(1, 25)
        );
        assert_eq!(
            PageRequest::parse(Some("-3"), Some("7"), 25),
            PageRequest::new(1, 7)
        );
    }

    #[test]
    fn test_leading_integer_is_used() {
        assert_eq!(
            PageRequest::parse(Some("2abc"), Some("5.9"), 25),
            PageRequest::new(2, 5)
        );
        assert_eq!(
            PageRequest::parse(Some(" 3"), Some("+4"), 25),
            PageRequest::new(3, 4)
        );
        assert_eq!(
            PageRequest::parse(Some("0x10"), Some(".5"), 25),
            PageRequest::new(1, 25)
        );
    }

    #[test]
    fn test_empty_pagination_serializes_as_empty_object() {
        let json = serde_json::to_value(Pagination::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
