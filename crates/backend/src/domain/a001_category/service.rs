use contracts::domain::a001_category::aggregate::{
    Category, CategoryCreateRequest, CategoryId, CategoryOption, CategoryUpdateRequest,
    CategoryWithCount,
};
use contracts::domain::common::AggregateRoot;

use crate::domain::catalog::Catalog;
use crate::shared::error::CatalogError;

/// Список категорий с актуальным количеством товаров
pub fn list(catalog: &Catalog, include_inactive: bool) -> Vec<CategoryWithCount> {
    let counts = catalog.product_counts();
    catalog
        .categories()
        .iter()
        .filter(|c| include_inactive || c.is_active())
        .map(|c| CategoryWithCount {
            category: c.clone(),
            product_count: counts.get(&c.id).copied().unwrap_or(0),
        })
        .collect()
}

/// Получение категории по ID
pub fn get_by_id(catalog: &Catalog, id: CategoryId) -> Result<CategoryWithCount, CatalogError> {
    catalog
        .find_category(id)
        .map(|c| catalog.with_count(c))
        .ok_or(CatalogError::CategoryNotFound(id))
}

/// Активные категории для выпадающего списка
pub fn options(catalog: &Catalog) -> Vec<CategoryOption> {
    catalog
        .categories()
        .iter()
        .filter(|c| c.is_active())
        .map(CategoryOption::from)
        .collect()
}

/// Создание новой категории
pub fn create(
    catalog: &mut Catalog,
    dto: CategoryCreateRequest,
) -> Result<CategoryWithCount, CatalogError> {
    dto.validate()?;

    let id = catalog.allocate_category_id();
    let category = Category::new_for_insert(id, &dto);
    let created = catalog.with_count(&category);
    catalog.insert_category(category);

    tracing::info!("{} {} created: {}", Category::element_name(), id, dto.name.trim());
    Ok(created)
}

/// Обновление категории
pub fn update(
    catalog: &mut Catalog,
    id: CategoryId,
    dto: CategoryUpdateRequest,
) -> Result<CategoryWithCount, CatalogError> {
    dto.validate()?;

    let category = catalog
        .find_category_mut(id)
        .ok_or(CatalogError::CategoryNotFound(id))?;
    category.update(&dto);
    category.before_write();
    let updated = category.clone();

    tracing::info!("{} {} updated", Category::element_name(), id);
    Ok(catalog.with_count(&updated))
}

/// Мягкое удаление категории
///
/// Отклоняется, пока на категорию ссылается хотя бы один товар;
/// в этом случае каталог не меняется.
pub fn delete(catalog: &mut Catalog, id: CategoryId) -> Result<CategoryWithCount, CatalogError> {
    if catalog.find_category(id).is_none() {
        return Err(CatalogError::CategoryNotFound(id));
    }

    let count = catalog.product_count(id);
    if count > 0 {
        tracing::warn!("Refusing to delete category {} with {} products", id, count);
        return Err(CatalogError::CategoryInUse { id, count });
    }

    let category = catalog
        .find_category_mut(id)
        .ok_or(CatalogError::CategoryNotFound(id))?;
    category.metadata.deactivate();
    let deleted = category.clone();

    tracing::info!("{} {} deactivated", Category::element_name(), id);
    Ok(catalog.with_count(&deleted))
}

/// Проверка, что на категорию можно сослаться из товара (существует и активна)
pub fn ensure_assignable(catalog: &Catalog, id: CategoryId) -> Result<(), CatalogError> {
    match catalog.find_category(id) {
        None => Err(CatalogError::UnknownCategory(id)),
        Some(c) if !c.is_active() => Err(CatalogError::InactiveCategory(id)),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed;

    fn create_request(name: &str) -> CategoryCreateRequest {
        CategoryCreateRequest {
            name: name.into(),
            description: "Toys and games for all ages".into(),
        }
    }

    #[test]
    fn test_list_hides_inactive_by_default() {
        let catalog = seed::demo_catalog();
        let active = list(&catalog, false);
        assert_eq!(active.len(), 3);
        assert!(active.iter().all(|c| c.category.is_active()));

        let all = list(&catalog, true);
        assert_eq!(all.len(), 4);
        let electronics = all.iter().find(|c| c.category.id == CategoryId(1)).unwrap();
        assert_eq!(electronics.product_count, 3);
    }

    #[test]
    fn test_create_puts_new_category_first_with_zero_count() {
        let mut catalog = seed::demo_catalog();
        let created = create(&mut catalog, create_request("Toys")).unwrap();
        assert_eq!(created.category.id, CategoryId(5));
        assert_eq!(created.product_count, 0);
        assert!(created.category.is_active());
        assert_eq!(list(&catalog, false)[0].category.name, "Toys");
    }

    #[test]
    fn test_create_rejects_invalid_request() {
        let mut catalog = seed::demo_catalog();
        let err = create(
            &mut catalog,
            CategoryCreateRequest {
                name: "".into(),
                description: "short".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(catalog.categories().len(), 4);
    }

    #[test]
    fn test_update_touches_updated_at() {
        let mut catalog = seed::demo_catalog();
        let before = catalog.find_category(CategoryId(2)).unwrap().metadata.updated_at;
        let updated = update(
            &mut catalog,
            CategoryId(2),
            CategoryUpdateRequest {
                name: Some("Apparel".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.category.name, "Apparel");
        assert_eq!(updated.product_count, 2);
        assert!(updated.category.metadata.updated_at > before);
    }

    #[test]
    fn test_update_unknown_category_is_not_found() {
        let mut catalog = seed::demo_catalog();
        let err = update(&mut catalog, CategoryId(42), CategoryUpdateRequest::default());
        assert_eq!(err.unwrap_err(), CatalogError::CategoryNotFound(CategoryId(42)));
    }

    #[test]
    fn test_delete_with_products_is_rejected_and_changes_nothing() {
        let mut catalog = seed::demo_catalog();
        let categories_before = catalog.categories().to_vec();
        let products_before = catalog.products().to_vec();

        let err = delete(&mut catalog, CategoryId(1)).unwrap_err();
        assert_eq!(
            err,
            CatalogError::CategoryInUse {
                id: CategoryId(1),
                count: 3
            }
        );
        assert_eq!(catalog.categories(), categories_before.as_slice());
        assert_eq!(catalog.products(), products_before.as_slice());
    }

    #[test]
    fn test_delete_empty_category_is_soft() {
        let mut catalog = seed::demo_catalog();
        let created = create(&mut catalog, create_request("Toys")).unwrap();
        let deleted = delete(&mut catalog, created.category.id).unwrap();
        assert!(!deleted.category.is_active());
        assert_eq!(catalog.categories().len(), 5);
        assert!(options(&catalog).iter().all(|o| o.id != created.category.id));
    }

    #[test]
    fn test_ensure_assignable() {
        let catalog = seed::demo_catalog();
        assert!(ensure_assignable(&catalog, CategoryId(1)).is_ok());
        assert_eq!(
            ensure_assignable(&catalog, CategoryId(4)),
            Err(CatalogError::InactiveCategory(CategoryId(4)))
        );
        assert_eq!(
            ensure_assignable(&catalog, CategoryId(9)),
            Err(CatalogError::UnknownCategory(CategoryId(9)))
        );
    }
}
