use contracts::domain::a001_category::aggregate::CategoryId;
use contracts::domain::a002_product::aggregate::{
    Product, ProductCreateRequest, ProductId, ProductListQuery, ProductStats,
    ProductUpdateRequest, ProductWithCategory,
};
use contracts::domain::common::AggregateRoot;
use contracts::shared::Page;

use super::query;
use crate::domain::a001_category::service as category_service;
use crate::domain::catalog::Catalog;
use crate::shared::error::CatalogError;

/// Страница товаров с фильтрами и пагинацией
pub fn list(
    catalog: &Catalog,
    params: &ProductListQuery,
) -> Result<Page<ProductWithCategory>, CatalogError> {
    params.validate()?;

    let filtered = query::filter(catalog.products(), params);
    let (items, pagination) = query::paginate(&filtered, params.page, params.page_size);

    Ok(Page {
        items: items.into_iter().map(|p| catalog.enrich(p)).collect(),
        pagination,
    })
}

/// Получение товара по ID
pub fn get_by_id(catalog: &Catalog, id: ProductId) -> Result<ProductWithCategory, CatalogError> {
    catalog
        .find_product(id)
        .map(|p| catalog.enrich(p))
        .ok_or(CatalogError::ProductNotFound(id))
}

/// Все товары категории (пустой список для неизвестной категории)
pub fn list_by_category(catalog: &Catalog, category_id: CategoryId) -> Vec<ProductWithCategory> {
    catalog
        .products()
        .iter()
        .filter(|p| p.category_id == category_id)
        .map(|p| catalog.enrich(p))
        .collect()
}

/// Сводная статистика, пересчитывается при каждом вызове
pub fn stats(catalog: &Catalog) -> ProductStats {
    let products = catalog.products();
    let total_products = products.len();
    let active_products = products.iter().filter(|p| p.is_active()).count();
    let total_value: f64 = products.iter().map(Product::stock_value).sum();
    let average_price = if total_products == 0 {
        0.0
    } else {
        total_value / total_products as f64
    };

    ProductStats {
        total_products,
        active_products,
        inactive_products: total_products - active_products,
        total_value,
        average_price,
        categories_count: catalog.categories().len(),
    }
}

/// Создание нового товара
pub fn create(catalog: &mut Catalog, dto: ProductCreateRequest) -> Result<Product, CatalogError> {
    dto.validate()?;
    category_service::ensure_assignable(catalog, dto.category_id)?;

    let id = catalog.allocate_product_id();
    let product = Product::new_for_insert(id, &dto);
    catalog.insert_product(product.clone());

    tracing::info!(
        "{} {} created in category {}: {}",
        Product::element_name(),
        id,
        product.category_id,
        product.name
    );
    Ok(product)
}

/// Обновление товара; смена категории проверяется так же, как при создании
pub fn update(
    catalog: &mut Catalog,
    id: ProductId,
    dto: ProductUpdateRequest,
) -> Result<Product, CatalogError> {
    dto.validate()?;
    let current_category = catalog
        .find_product(id)
        .map(|p| p.category_id)
        .ok_or(CatalogError::ProductNotFound(id))?;
    // Проверяем только перенос: текущая (пусть и неактивная) категория остаётся
    if let Some(category_id) = dto.category_id.filter(|c| *c != current_category) {
        category_service::ensure_assignable(catalog, category_id)?;
    }

    let product = catalog
        .find_product_mut(id)
        .ok_or(CatalogError::ProductNotFound(id))?;
    let previous_category = product.category_id;
    product.update(&dto);
    product.before_write();
    let updated = product.clone();

    if previous_category != updated.category_id {
        tracing::info!(
            "{} {} moved from category {} to {}",
            Product::element_name(),
            id,
            previous_category,
            updated.category_id
        );
    } else {
        tracing::info!("{} {} updated", Product::element_name(), id);
    }
    Ok(updated)
}

/// Удаление товара (физическое)
pub fn delete(catalog: &mut Catalog, id: ProductId) -> Result<Product, CatalogError> {
    let removed = catalog
        .remove_product(id)
        .ok_or(CatalogError::ProductNotFound(id))?;
    tracing::info!("{} {} deleted", Product::element_name(), id);
    Ok(removed)
}
