//! Sync API Handlers

use axum::{Extension, extract::State};
use portal_client::SyncOutcome;

use crate::api::{ApiResponse, AppResult};
use crate::auth::CurrentSession;
use crate::core::ServerState;

/// POST /api/sync
///
/// The webhook reply becomes the response message. The catalog is not
/// refetched here.
pub async fn trigger(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentSession>,
) -> AppResult<ApiResponse<SyncOutcome>> {
    tracing::info!(username = %current.session.username, "Catalog sync requested");
    let outcome = state.sync.trigger_sync().await?;
    Ok(ApiResponse::success_with_message(outcome.message.clone(), outcome))
}
