//! Page request parsing and page result types.

use serde::{Deserialize, Serialize};

/// Requested page, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRequest {
    Number(u32),
    /// The last non-empty page, or page 1 when nothing matches.
    Last,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::Number(1)
    }
}

impl PageRequest {
    /// Builds a numeric request, clamping anything below 1 to page 1.
    pub fn number(page: i64) -> Self {
        if page < 1 {
            Self::Number(1)
        } else {
            Self::Number(u32::try_from(page).unwrap_or(u32::MAX))
        }
    }

    /// Parses a raw `page` query parameter.
    ///
    /// - missing or blank -> page 1
    /// - `last` (any case) -> [`PageRequest::Last`]
    /// - integers below 1 -> page 1
    /// - anything else -> `Err` carrying the raw value
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(Self::default());
        };

        if value.eq_ignore_ascii_case("last") {
            return Ok(Self::Last);
        }

        value
            .parse::<i64>()
            .map(Self::number)
            .map_err(|_| value.to_string())
    }

    /// Resolves the concrete page number for a result of `total` records.
    pub(crate) fn resolve(self, total: u64, page_size: u32) -> u32 {
        match self {
            Self::Number(page) => page.max(1),
            Self::Last => total_pages(total, page_size).max(1),
        }
    }
}

/// Pagination metadata returned with every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Matching records across all pages.
    pub total: u64,
    /// The page these items belong to (1-based).
    pub page: u32,
    pub page_size: u32,
    /// `ceil(total / page_size)`; zero when nothing matches.
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageMeta {
    pub(crate) fn new(total: u64, page: u32, page_size: u32) -> Self {
        let total_pages = total_pages(total, page_size);
        Self {
            total,
            page,
            page_size,
            total_pages,
            has_prev: page > 1 && total_pages > 0,
            has_next: page < total_pages,
        }
    }

    /// Row offset of the first item on this page.
    pub(crate) fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// One page of an ordered, filtered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{PageMeta, PageRequest};

    #[test]
    fn parse_defaults_blank_input_to_first_page() {
        assert_eq!(PageRequest::parse(None), Ok(PageRequest::Number(1)));
        assert_eq!(PageRequest::parse(Some("  ")), Ok(PageRequest::Number(1)));
    }

    #[test]
    fn parse_clamps_non_positive_numbers() {
        assert_eq!(PageRequest::parse(Some("0")), Ok(PageRequest::Number(1)));
        assert_eq!(PageRequest::parse(Some("-3")), Ok(PageRequest::Number(1)));
        assert_eq!(PageRequest::parse(Some("7")), Ok(PageRequest::Number(7)));
    }

    #[test]
    fn parse_accepts_last_and_rejects_garbage() {
        assert_eq!(PageRequest::parse(Some("LAST")), Ok(PageRequest::Last));
        assert_eq!(PageRequest::parse(Some("2.5")), Err("2.5".to_string()));
        assert_eq!(PageRequest::parse(Some("two")), Err("two".to_string()));
    }

    #[test]
    fn parse_saturates_huge_numbers() {
        assert_eq!(
            PageRequest::parse(Some("99999999999")),
            Ok(PageRequest::Number(u32::MAX))
        );
    }

    #[test]
    fn last_resolves_to_final_page_or_first_when_empty() {
        assert_eq!(PageRequest::Last.resolve(12, 5), 3);
        assert_eq!(PageRequest::Last.resolve(10, 5), 2);
        assert_eq!(PageRequest::Last.resolve(0, 5), 1);
        assert_eq!(PageRequest::Number(4).resolve(0, 5), 4);
    }

    #[test]
    fn meta_matches_twelve_records_on_page_two() {
        let meta = PageMeta::new(12, 2, 5);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_prev);
        assert!(meta.has_next);
        assert_eq!(meta.offset(), 5);
    }

    #[test]
    fn meta_for_empty_collection_has_no_pages() {
        let meta = PageMeta::new(0, 1, 5);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_prev);
        assert!(!meta.has_next);
    }

    #[test]
    fn meta_past_the_end_points_back_only() {
        let meta = PageMeta::new(7, 9, 5);
        assert_eq!(meta.total_pages, 2);
        assert!(meta.has_prev);
        assert!(!meta.has_next);
    }
}
