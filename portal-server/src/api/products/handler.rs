//! Product API Handlers

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use shared::catalog::{derive_categories, rice_category_products};
use shared::models::{Product, ProductCategory, ProductId};

use crate::api::{ApiResponse, AppError, AppResult};
use crate::core::ServerState;
use shared::ErrorCode;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteResponse {
    pub id: ProductId,
    pub favorite: bool,
}

/// GET /api/products - categories derived from rice products
pub async fn categories(
    State(state): State<ServerState>,
) -> AppResult<ApiResponse<Vec<ProductCategory>>> {
    let catalog = state.catalog.fetch_catalog().await?;
    let rice = rice_category_products(&catalog.products);
    Ok(ApiResponse::success(derive_categories(&rice)))
}

/// GET /api/products/search?q= - empty term lists everything
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<Product>>> {
    let term = query.q.unwrap_or_default();
    let products = state.catalog.search_products(&term).await?;
    Ok(ApiResponse::success(products))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Product>> {
    let id = ProductId::from(id);
    let product = state.catalog.get_product(&id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
    })?;
    Ok(ApiResponse::success(product))
}

/// POST /api/products/{id}/favorite - flip and return the stored value
pub async fn toggle_favorite(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<FavoriteResponse>> {
    let id = ProductId::from(id);
    let favorite = state.catalog.toggle_favorite(&id).await?;
    Ok(ApiResponse::success(FavoriteResponse { id, favorite }))
}
