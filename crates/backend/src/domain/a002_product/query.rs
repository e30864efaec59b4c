//! Фильтрация и пагинация списка товаров

use contracts::domain::a002_product::aggregate::{Product, ProductListQuery};
use contracts::shared::PaginationInfo;

/// Товары, прошедшие фильтры запроса, в порядке коллекции
///
/// Текстовый фильтр (OR по name/description/sku, без учёта регистра)
/// комбинируется с фильтром по категории через AND.
pub fn filter<'a>(products: &'a [Product], query: &ProductListQuery) -> Vec<&'a Product> {
    let needle = query.search_needle();
    products
        .iter()
        .filter(|p| needle.as_deref().map_or(true, |n| p.matches_search(n)))
        .filter(|p| query.category_id.map_or(true, |id| p.category_id == id))
        .collect()
}

/// Вырезать страницу из отфильтрованного набора
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> (Vec<T>, PaginationInfo) {
    let pagination = PaginationInfo::new(page, page_size, items.len());
    let slice = items[pagination.range()].to_vec();
    (slice, pagination)
}
