//! Catalog API Handlers

use axum::extract::{Query, State};
use portal_client::CatalogView;
use serde::{Deserialize, Serialize};
use shared::catalog::{CategoryBucket, CategorySelection};
use shared::models::{DatabaseInfo, Product, ProductCategory};

use crate::api::{ApiResponse, AppResult};
use crate::core::ServerState;

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// `all`, `favorite` or a category name; defaults to `favorite`
    pub category: Option<String>,
}

/// Label printing page payload
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub selection: String,
    pub products: Vec<Product>,
    pub categories: Vec<ProductCategory>,
    pub buckets: Vec<CategoryBucket>,
}

/// GET /api/catalog - retail rice products filtered by the selection
pub async fn catalog(
    State(state): State<ServerState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<ApiResponse<CatalogResponse>> {
    let fetched = state.catalog.fetch_catalog().await?;

    let mut view = CatalogView::retail();
    view.replace(fetched.products);
    view.select(CategorySelection::parse(query.category.as_deref()));

    Ok(ApiResponse::success(CatalogResponse {
        selection: view.selection().key().to_string(),
        products: view.visible(),
        categories: view.categories().to_vec(),
        buckets: view.buckets(),
    }))
}

/// GET /api/info - store row counts
pub async fn info(State(state): State<ServerState>) -> AppResult<ApiResponse<DatabaseInfo>> {
    let info = state.catalog.database_info().await?;
    Ok(ApiResponse::success(info))
}
