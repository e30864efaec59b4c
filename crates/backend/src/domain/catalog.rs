use std::collections::HashMap;

use contracts::domain::a001_category::aggregate::{Category, CategoryId, CategoryWithCount};
use contracts::domain::a002_product::aggregate::{Product, ProductId, ProductWithCategory};

/// In-memory каталог: категории + товары и правила их согласованности
///
/// Количество товаров в категории не хранится, а считается по коллекции товаров
/// при каждом чтении, поэтому инвариант `productCount == |товары категории|`
/// выполняется после любой последовательности изменений.
///
/// Новые записи вставляются в начало коллекции (свежие сверху).
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
    next_category_id: i64,
    next_product_id: i64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Пустой каталог
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }

    /// Каталог из готовых коллекций; счётчики ID начинаются с max + 1
    pub fn from_parts(categories: Vec<Category>, products: Vec<Product>) -> Self {
        let next_category_id = categories.iter().map(|c| c.id.value()).max().unwrap_or(0) + 1;
        let next_product_id = products.iter().map(|p| p.id.value()).max().unwrap_or(0) + 1;
        Self {
            categories,
            products,
            next_category_id,
            next_product_id,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find_category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub(crate) fn find_category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    pub(crate) fn find_product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Количество товаров, ссылающихся на категорию
    pub fn product_count(&self, id: CategoryId) -> usize {
        self.products.iter().filter(|p| p.category_id == id).count()
    }

    /// Количество товаров по всем категориям за один проход
    pub fn product_counts(&self) -> HashMap<CategoryId, usize> {
        let mut counts = HashMap::new();
        for product in &self.products {
            *counts.entry(product.category_id).or_insert(0) += 1;
        }
        counts
    }

    /// Категория с актуальным количеством товаров
    pub fn with_count(&self, category: &Category) -> CategoryWithCount {
        CategoryWithCount {
            category: category.clone(),
            product_count: self.product_count(category.id),
        }
    }

    /// Обогащение товара категорией (None для повисшей ссылки)
    pub fn enrich(&self, product: &Product) -> ProductWithCategory {
        ProductWithCategory {
            product: product.clone(),
            category: self.find_category(product.category_id).cloned(),
        }
    }

    /// Выдать следующий ID категории; ID не переиспользуются
    pub(crate) fn allocate_category_id(&mut self) -> CategoryId {
        let id = CategoryId::new(self.next_category_id);
        self.next_category_id += 1;
        id
    }

    /// Выдать следующий ID товара; ID не переиспользуются
    pub(crate) fn allocate_product_id(&mut self) -> ProductId {
        let id = ProductId::new(self.next_product_id);
        self.next_product_id += 1;
        id
    }

    pub(crate) fn insert_category(&mut self, category: Category) {
        self.categories.insert(0, category);
    }

    pub(crate) fn insert_product(&mut self, product: Product) {
        self.products.insert(0, product);
    }

    pub(crate) fn remove_product(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed;

    #[test]
    fn test_next_ids_start_after_max() {
        let mut catalog = seed::demo_catalog();
        assert_eq!(catalog.allocate_category_id(), CategoryId(5));
        assert_eq!(catalog.allocate_product_id(), ProductId(8));
        assert_eq!(catalog.allocate_product_id(), ProductId(9));
    }

    #[test]
    fn test_empty_catalog_starts_at_one() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.allocate_category_id(), CategoryId(1));
        assert_eq!(catalog.allocate_product_id(), ProductId(1));
    }

    #[test]
    fn test_product_counts_match_seed() {
        let catalog = seed::demo_catalog();
        let counts = catalog.product_counts();
        assert_eq!(counts.get(&CategoryId(1)), Some(&3));
        assert_eq!(counts.get(&CategoryId(2)), Some(&2));
        assert_eq!(counts.get(&CategoryId(3)), Some(&2));
        assert_eq!(counts.get(&CategoryId(4)), None);
        assert_eq!(catalog.product_count(CategoryId(4)), 0);
    }

    #[test]
    fn test_enrich_tolerates_dangling_reference() {
        let mut catalog = seed::demo_catalog();
        let mut orphan = catalog.products()[0].clone();
        orphan.category_id = CategoryId(99);
        let enriched = catalog.enrich(&orphan);
        assert!(enriched.category.is_none());

        let id = catalog.products()[0].id;
        assert_eq!(catalog.remove_product(id).map(|p| p.id), Some(id));
        assert!(catalog.find_product(id).is_none());
    }
}
