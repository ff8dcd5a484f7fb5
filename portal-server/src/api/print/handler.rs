//! Label print Handlers

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use shared::print::{build_print_url, parse_print_quantity};

use crate::api::{ApiResponse, AppError, AppResult};
use crate::core::ServerState;

#[derive(Debug, Deserialize)]
pub struct PrintQuery {
    pub code: Option<String>,
    /// Kept as text so malformed input gets the quantity error
    pub quantity: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PrintUrlResponse {
    pub url: String,
    pub code: String,
    pub quantity: u32,
}

/// GET /api/print-url?code=&quantity=
///
/// The quantity is validated before the URL is built; the caller opens the
/// URL itself.
pub async fn print_url(
    State(state): State<ServerState>,
    Query(query): Query<PrintQuery>,
) -> AppResult<ApiResponse<PrintUrlResponse>> {
    let code = query
        .code
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::validation("Product code is required").with_detail("field", "code"))?;
    let quantity = parse_print_quantity(query.quantity.as_deref().unwrap_or("1"))?;

    let url = build_print_url(state.print_base().as_deref(), &code, quantity)?;
    tracing::debug!(code = %code, quantity, "Print URL built");

    Ok(ApiResponse::success(PrintUrlResponse { url, code, quantity }))
}
