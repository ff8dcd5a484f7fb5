//! Health route
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /health | GET | none |
//!
//! ```json
//! { "status": "healthy", "version": "0.1.0", "store_connected": true }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// healthy | degraded
    pub status: String,
    pub version: String,
    pub store_connected: bool,
}

/// Always 200; a failed store ping only degrades the status
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let store_connected = state.catalog.check_connection().await;
    Json(HealthResponse {
        status: if store_connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store_connected,
    })
}
