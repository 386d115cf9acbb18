// src/common/pagination.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// `?page=N` das listagens públicas (1-based).
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Página desejada, começando em 1
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, page_size: i64) -> Self {
        Self {
            page: page.unwrap_or(1),
            page_size,
        }
    }

    /// Página 0, negativa ou tão alta que o OFFSET estoura não existe:
    /// devolve página vazia em vez de erro.
    pub fn is_valid(&self) -> bool {
        self.page >= 1 && self.page_size >= 1 && self.checked_offset().is_some()
    }

    fn checked_offset(&self) -> Option<i64> {
        (self.page - 1).max(0).checked_mul(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        self.checked_offset().unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub num_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        // Mesmo sem registros existe a página 1 (vazia)
        let num_pages = if total <= 0 {
            1
        } else {
            (total + request.page_size - 1) / request.page_size
        };

        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total,
            num_pages,
            has_next: request.page >= 1 && request.page < num_pages,
            has_previous: request.page > 1,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            num_pages: self.num_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_rows_of_fifteen_make_two_pages() {
        let first = PageRequest::new(Some(1), 15);
        let second = PageRequest::new(Some(2), 15);

        assert_eq!((first.offset(), first.limit()), (0, 15));
        assert_eq!((second.offset(), second.limit()), (15, 15));

        let page: Page<u8> = Page::new(vec![0; 15], 16, first);
        assert_eq!(page.num_pages, 2);
        assert!(page.has_next);
        assert!(!page.has_previous);

        let page: Page<u8> = Page::new(vec![0], 16, second);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn missing_page_defaults_to_first() {
        let request = PageRequest::new(None, 10);
        assert_eq!(request.page, 1);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn zero_or_negative_page_is_invalid() {
        assert!(!PageRequest::new(Some(0), 10).is_valid());
        assert!(!PageRequest::new(Some(-3), 10).is_valid());
        assert!(PageRequest::new(Some(99), 10).is_valid());
    }

    #[test]
    fn huge_page_number_is_an_empty_page() {
        let request = PageRequest::new(Some(i64::MAX), 15);
        assert!(!request.is_valid());
        assert_eq!(request.offset(), i64::MAX);

        let request = PageRequest::new(Some(i64::MAX / 10), 15);
        assert!(!request.is_valid());

        let page: Page<u8> = Page::new(vec![], 16, PageRequest::new(Some(i64::MAX), 15));
        assert!(page.items.is_empty());
        assert_eq!(page.num_pages, 2);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn page_past_the_end_reports_no_next() {
        let page: Page<u8> = Page::new(vec![], 16, PageRequest::new(Some(5), 15));
        assert!(page.items.is_empty());
        assert_eq!(page.num_pages, 2);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn empty_table_still_has_one_page() {
        let page: Page<u8> = Page::new(vec![], 0, PageRequest::new(None, 10));
        assert_eq!(page.num_pages, 1);
        assert!(!page.has_next);
    }
}
