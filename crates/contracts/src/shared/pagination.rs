use serde::{Deserialize, Serialize};

/// Информация о пагинации списка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl PaginationInfo {
    /// `total_pages = ceil(total_items / page_size)`; page_size должен быть > 0
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(page_size)
        };
        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }

    /// Диапазон индексов страницы (1-based page); пустой, если страница вне диапазона
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self
            .page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        start..end
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Страница результатов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(PaginationInfo::new(1, 10, 0).total_pages, 0);
        assert_eq!(PaginationInfo::new(1, 10, 10).total_pages, 1);
        assert_eq!(PaginationInfo::new(1, 10, 11).total_pages, 2);
        assert_eq!(PaginationInfo::new(1, 3, 7).total_pages, 3);
    }

    #[test]
    fn test_range_clamps_out_of_range_pages() {
        assert_eq!(PaginationInfo::new(1, 3, 7).range(), 0..3);
        assert_eq!(PaginationInfo::new(3, 3, 7).range(), 6..7);
        assert!(PaginationInfo::new(4, 3, 7).range().is_empty());
        assert!(PaginationInfo::new(usize::MAX, 3, 7).range().is_empty());
    }

    #[test]
    fn test_has_next() {
        assert!(PaginationInfo::new(1, 3, 7).has_next());
        assert!(!PaginationInfo::new(3, 3, 7).has_next());
    }
}
