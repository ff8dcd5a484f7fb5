//! Router assembly

mod logging;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use shared::error::AppError;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::auth::require_auth;
use crate::core::ServerState;

pub use logging::logging_middleware;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Every route, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(api::health::router())
        .merge(api::auth::router())
        .merge(api::catalog::router())
        .merge(api::products::router())
        .merge(api::sync::router())
        .merge(api::print::router())
        .merge(api::pages::router())
        .fallback(not_found)
}

async fn not_found(uri: http::Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}

fn handler_panicked(_panic: Box<dyn Any + Send + 'static>) -> Response {
    AppError::internal("Request handler panicked").into_response()
}

/// Fully layered application with state applied
///
/// Used by the HTTP server and by tests driving the router directly.
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        // Route guard, innermost so the request id is already set
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(CatchPanicLayer::custom(handler_panicked))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER)))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state.clone())
}
