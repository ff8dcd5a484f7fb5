//! Product API

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::categories))
        .route("/search", get(handler::search))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/favorite", post(handler::toggle_favorite))
}
