//! Route guard middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use http::HeaderMap;
use portal_client::auth::{HOME_ROUTE, RouteDecision, SIGN_IN_ROUTE, route_decision};
use shared::error::AppError;
use shared::models::Session;

use crate::core::ServerState;
use crate::security_log;

/// Cookie carrying the session token for browser navigation
pub const SESSION_COOKIE: &str = "portal_session";

/// `Set-Cookie` value for a session token; `max_age` 0 clears it
pub fn session_cookie(token: &str, max_age: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age
    )
}

/// Session attached to an authenticated request
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: String,
    pub session: Session,
}

/// Token from `Authorization: Bearer` or the session cookie
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    if bearer.is_some() {
        return bearer;
    }

    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|t| !t.is_empty())
}

/// Authentication middleware
///
/// Looks up the session token and injects [`CurrentSession`] into the
/// request extensions.
///
/// # Public paths
///
/// - `OPTIONS *` (CORS preflight)
/// - `/health`
/// - `/api/auth/login`
/// - `/signin` (authenticated visitors are sent home)
///
/// # Failures
///
/// | Request | Response |
/// |---------|----------|
/// | `/api/*` without a session | 401 with the error envelope |
/// | `/api/*` with an unknown or expired token | 401 SessionExpired |
/// | any other page without a session | 303 to `/signin` |
pub async fn require_auth(State(state): State<ServerState>, mut req: Request, next: Next) -> Response {
    if req.method() == http::Method::OPTIONS {
        return next.run(req).await;
    }

    let path = req.uri().path().to_string();
    if path == "/health" || path == "/api/auth/login" {
        return next.run(req).await;
    }

    let token = extract_token(req.headers());
    let current = token.as_ref().and_then(|token| {
        state.sessions.get(token).map(|session| CurrentSession {
            token: token.clone(),
            session,
        })
    });

    if path.starts_with("/api/") {
        return match current {
            Some(current) => {
                req.extensions_mut().insert(current);
                next.run(req).await
            }
            None if token.is_some() => {
                security_log!("WARN", "session_rejected", uri = path.as_str());
                AppError::session_expired().into_response()
            }
            None => {
                security_log!("WARN", "auth_missing", uri = path.as_str());
                AppError::not_authenticated().into_response()
            }
        };
    }

    match route_decision(current.is_some(), &path) {
        RouteDecision::Allow => {
            if let Some(current) = current {
                req.extensions_mut().insert(current);
            }
            next.run(req).await
        }
        RouteDecision::RedirectToSignIn => Redirect::to(SIGN_IN_ROUTE).into_response(),
        RouteDecision::RedirectHome => Redirect::to(HOME_ROUTE).into_response(),
    }
}
