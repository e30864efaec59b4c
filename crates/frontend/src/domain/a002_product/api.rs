//! API функции товаров

use contracts::domain::a002_product::aggregate::{
    Product, ProductCreateRequest, ProductId, ProductListQuery, ProductStats,
    ProductUpdateRequest, ProductWithCategory,
};
use contracts::shared::Page;
use contracts::system::auth::ApiError;

use crate::shared::api::ApiClient;

const ENDPOINT: &str = "products";

/// Страница товаров с фильтрами
pub async fn fetch_page(
    client: &ApiClient,
    query: &ProductListQuery,
) -> Result<Page<ProductWithCategory>, ApiError> {
    query.validate()?;
    client.get_with_query(ENDPOINT, query).await
}

pub async fn fetch_stats(client: &ApiClient) -> Result<ProductStats, ApiError> {
    client.get(&format!("{}/stats", ENDPOINT)).await
}

pub async fn fetch_by_id(client: &ApiClient, id: ProductId) -> Result<ProductWithCategory, ApiError> {
    client.get(&format!("{}/{}", ENDPOINT, id)).await
}

pub async fn create(client: &ApiClient, dto: &ProductCreateRequest) -> Result<Product, ApiError> {
    dto.validate()?;
    client.post(ENDPOINT, dto).await
}

pub async fn update(
    client: &ApiClient,
    id: ProductId,
    dto: &ProductUpdateRequest,
) -> Result<Product, ApiError> {
    dto.validate()?;
    client.put(&format!("{}/{}", ENDPOINT, id), dto).await
}

pub async fn delete(client: &ApiClient, id: ProductId) -> Result<Product, ApiError> {
    client.delete(&format!("{}/{}", ENDPOINT, id)).await
}
