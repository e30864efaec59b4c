use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use contracts::domain::a001_category::aggregate::{
    CategoryCreateRequest, CategoryId, CategoryListQuery, CategoryOption, CategoryUpdateRequest,
    CategoryWithCount,
};
use contracts::domain::a002_product::aggregate::ProductWithCategory;
use contracts::shared::ApiResponse;

use super::parse_id;
use crate::domain::a001_category::service;
use crate::domain::a002_product::service as product_service;
use crate::shared::error::AppResult;
use crate::state::AppState;

/// GET /api/categories?includeInactive
pub async fn list_all(
    State(state): State<AppState>,
    query: Result<Query<CategoryListQuery>, QueryRejection>,
) -> AppResult<Vec<CategoryWithCount>> {
    let Query(query) = query?;
    let catalog = state.catalog.read().await;
    let items = service::list(&catalog, query.include_inactive);
    Ok(Json(ApiResponse::ok("Categories retrieved successfully", items)))
}

/// GET /api/categories/options
pub async fn options(State(state): State<AppState>) -> AppResult<Vec<CategoryOption>> {
    let catalog = state.catalog.read().await;
    Ok(Json(ApiResponse::ok(
        "Categories retrieved successfully",
        service::options(&catalog),
    )))
}

/// GET /api/categories/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<CategoryWithCount> {
    let id: CategoryId = parse_id(&id)?;
    let catalog = state.catalog.read().await;
    let category = service::get_by_id(&catalog, id)?;
    Ok(Json(ApiResponse::ok("Category retrieved successfully", category)))
}

/// GET /api/categories/:id/products
pub async fn list_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Vec<ProductWithCategory>> {
    let id: CategoryId = parse_id(&id)?;
    let catalog = state.catalog.read().await;
    Ok(Json(ApiResponse::ok(
        "Products retrieved successfully",
        product_service::list_by_category(&catalog, id),
    )))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CategoryCreateRequest>, JsonRejection>,
) -> AppResult<CategoryWithCount> {
    let Json(dto) = payload?;
    let mut catalog = state.catalog.write().await;
    let created = service::create(&mut catalog, dto)?;
    Ok(Json(ApiResponse::ok("Category created successfully", created)))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryUpdateRequest>, JsonRejection>,
) -> AppResult<CategoryWithCount> {
    let id: CategoryId = parse_id(&id)?;
    let Json(dto) = payload?;
    let mut catalog = state.catalog.write().await;
    let updated = service::update(&mut catalog, id, dto)?;
    Ok(Json(ApiResponse::ok("Category updated successfully", updated)))
}

/// DELETE /api/categories/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<CategoryWithCount> {
    let id: CategoryId = parse_id(&id)?;
    let mut catalog = state.catalog.write().await;
    let deleted = service::delete(&mut catalog, id)?;
    Ok(Json(ApiResponse::ok("Category deleted successfully", deleted)))
}
