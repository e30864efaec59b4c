use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use contracts::domain::a002_product::aggregate::{
    Product, ProductCreateRequest, ProductId, ProductListQuery, ProductStats,
    ProductUpdateRequest, ProductWithCategory,
};
use contracts::shared::{ApiResponse, Page};

use super::parse_id;
use crate::domain::a002_product::service;
use crate::shared::error::AppResult;
use crate::state::AppState;

/// GET /api/products?page&pageSize&search&categoryId
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> AppResult<Page<ProductWithCategory>> {
    let Query(query) = query?;
    let catalog = state.catalog.read().await;
    let page = service::list(&catalog, &query)?;
    Ok(Json(ApiResponse::ok("Products retrieved successfully", page)))
}

/// GET /api/products/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<ProductStats> {
    let catalog = state.catalog.read().await;
    Ok(Json(ApiResponse::ok("Statistics retrieved", service::stats(&catalog))))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ProductWithCategory> {
    let id: ProductId = parse_id(&id)?;
    let catalog = state.catalog.read().await;
    let product = service::get_by_id(&catalog, id)?;
    Ok(Json(ApiResponse::ok("Product retrieved successfully", product)))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProductCreateRequest>, JsonRejection>,
) -> AppResult<Product> {
    let Json(dto) = payload?;
    let mut catalog = state.catalog.write().await;
    let created = service::create(&mut catalog, dto)?;
    Ok(Json(ApiResponse::ok("Product created successfully", created)))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductUpdateRequest>, JsonRejection>,
) -> AppResult<Product> {
    let id: ProductId = parse_id(&id)?;
    let Json(dto) = payload?;
    let mut catalog = state.catalog.write().await;
    let updated = service::update(&mut catalog, id, dto)?;
    Ok(Json(ApiResponse::ok("Product updated successfully", updated)))
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Product> {
    let id: ProductId = parse_id(&id)?;
    let mut catalog = state.catalog.write().await;
    let deleted = service::delete(&mut catalog, id)?;
    Ok(Json(ApiResponse::ok("Product deleted successfully", deleted)))
}
