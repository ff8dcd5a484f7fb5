//! Authentication Handlers

use axum::{Extension, Json, extract::State};
use http::header::SET_COOKIE;
use portal_client::AuthError;
use shared::models::{LoginRequest, LoginResponse, Session};

use crate::api::{ApiResponse, AppError, AppResult};
use crate::auth::{CurrentSession, session_cookie};
use crate::core::ServerState;
use crate::security_log;

/// Provider tokens stay on the server
fn public_session(mut session: Session) -> Session {
    session.access_token = None;
    session
}

/// POST /api/auth/login
///
/// Delegates to the configured identity provider and issues a portal
/// session token, returned in the body and as the session cookie.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<([(http::HeaderName, String); 1], ApiResponse<LoginResponse>)> {
    let username = req.username.trim().to_string();
    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Username and password are required"));
    }

    let session = match state.identity.login(&username, &req.password).await {
        Ok(session) => session,
        Err(AuthError::InvalidCredentials) => {
            security_log!("WARN", "login_failed", username = username.as_str());
            return Err(AppError::invalid_credentials());
        }
        Err(e) => {
            tracing::error!(provider = state.identity.name(), error = %e, "Identity provider failed");
            return Err(e.into());
        }
    };

    let token = state.sessions.issue(session.clone());
    tracing::info!(username = %session.username, provider = state.identity.name(), "User logged in");

    let cookie = session_cookie(&token, state.sessions.ttl_secs());
    let body = LoginResponse {
        token,
        session: public_session(session),
    };
    Ok(([(SET_COOKIE, cookie)], ApiResponse::success(body)))
}

/// GET /api/auth/me
pub async fn me(Extension(current): Extension<CurrentSession>) -> AppResult<ApiResponse<Session>> {
    Ok(ApiResponse::success(public_session(current.session)))
}

/// POST /api/auth/logout
///
/// The portal session is dropped even when the provider logout fails.
pub async fn logout(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentSession>,
) -> AppResult<([(http::HeaderName, String); 1], ApiResponse<()>)> {
    state.sessions.revoke(&current.token);
    if let Err(e) = state.identity.logout(&current.session).await {
        tracing::warn!(error = %e, "Provider logout failed");
    }
    tracing::info!(username = %current.session.username, "User logged out");

    Ok(([(SET_COOKIE, session_cookie("", 0))], ApiResponse::ok()))
}
