//! API функции категорий

use contracts::domain::a001_category::aggregate::{
    CategoryCreateRequest, CategoryId, CategoryListQuery, CategoryOption, CategoryUpdateRequest,
    CategoryWithCount,
};
use contracts::domain::a002_product::aggregate::ProductWithCategory;
use contracts::system::auth::ApiError;

use crate::shared::api::ApiClient;

const ENDPOINT: &str = "categories";

pub async fn fetch_all(
    client: &ApiClient,
    include_inactive: bool,
) -> Result<Vec<CategoryWithCount>, ApiError> {
    client
        .get_with_query(ENDPOINT, &CategoryListQuery { include_inactive })
        .await
}

/// Активные категории для выпадающего списка формы товара
pub async fn fetch_options(client: &ApiClient) -> Result<Vec<CategoryOption>, ApiError> {
    client.get(&format!("{}/options", ENDPOINT)).await
}

pub async fn fetch_by_id(client: &ApiClient, id: CategoryId) -> Result<CategoryWithCount, ApiError> {
    client.get(&format!("{}/{}", ENDPOINT, id)).await
}

pub async fn fetch_products(
    client: &ApiClient,
    id: CategoryId,
) -> Result<Vec<ProductWithCategory>, ApiError> {
    client.get(&format!("{}/{}/products", ENDPOINT, id)).await
}

/// Создание; форма проверяется до отправки
pub async fn create(
    client: &ApiClient,
    dto: &CategoryCreateRequest,
) -> Result<CategoryWithCount, ApiError> {
    dto.validate()?;
    client.post(ENDPOINT, dto).await
}

pub async fn update(
    client: &ApiClient,
    id: CategoryId,
    dto: &CategoryUpdateRequest,
) -> Result<CategoryWithCount, ApiError> {
    dto.validate()?;
    client.put(&format!("{}/{}", ENDPOINT, id), dto).await
}

/// Мягкое удаление; сервер отклоняет удаление категории с товарами
pub async fn delete(client: &ApiClient, id: CategoryId) -> Result<CategoryWithCount, ApiError> {
    client.delete(&format!("{}/{}", ENDPOINT, id)).await
}
