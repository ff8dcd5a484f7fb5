//! Home, sign-in and sign-out pages
//!
//! All are guarded by `require_auth`: anonymous visitors only ever reach
//! `/signin`, signed-in visitors never do.
//!
//! | Path | Method | Result |
//! |------|--------|--------|
//! | / | GET | home page |
//! | /signin | GET | sign-in form |
//! | /signin | POST | form login, `303 /` with the session cookie |
//! | /signout | POST | drops the session, `303 /signin` |

use axum::{
    Extension, Form, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use http::StatusCode;
use http::header::SET_COOKIE;
use portal_client::AuthError;
use portal_client::auth::{HOME_ROUTE, SIGN_IN_ROUTE};
use shared::models::LoginRequest;

use crate::auth::{CurrentSession, session_cookie};
use crate::core::ServerState;
use crate::security_log;

pub const SIGN_OUT_ROUTE: &str = "/signout";

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(HOME_ROUTE, get(home))
        .route(SIGN_IN_ROUTE, get(sign_in).post(submit_sign_in))
        .route(SIGN_OUT_ROUTE, post(sign_out))
}

pub async fn home(Extension(current): Extension<CurrentSession>) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><title>Label portal</title></head>\
         <body><h1>Label portal</h1><p>Signed in as {}</p>\
         <form method=\"post\" action=\"{}\"><button>Sign out</button></form>\
         </body></html>",
        escape(&current.session.username),
        SIGN_OUT_ROUTE
    ))
}

pub async fn sign_in() -> Html<String> {
    sign_in_page(None)
}

/// POST /signin
///
/// A rejected login re-renders the form and leaves no session behind.
pub async fn submit_sign_in(State(state): State<ServerState>, Form(form): Form<LoginRequest>) -> Response {
    let username = form.username.trim().to_string();
    if username.is_empty() || form.password.is_empty() {
        return (StatusCode::BAD_REQUEST, sign_in_page(Some("Enter a username and password"))).into_response();
    }

    let session = match state.identity.login(&username, &form.password).await {
        Ok(session) => session,
        Err(AuthError::InvalidCredentials) => {
            security_log!("WARN", "login_failed", username = username.as_str());
            return (StatusCode::UNAUTHORIZED, sign_in_page(Some("Invalid username or password"))).into_response();
        }
        Err(e) => {
            tracing::error!(provider = state.identity.name(), error = %e, "Identity provider failed");
            return (StatusCode::BAD_GATEWAY, sign_in_page(Some("Sign-in is unavailable, try again later")))
                .into_response();
        }
    };

    let token = state.sessions.issue(session);
    tracing::info!(username = %username, provider = state.identity.name(), "User signed in");
    let cookie = session_cookie(&token, state.sessions.ttl_secs());
    ([(SET_COOKIE, cookie)], Redirect::to(HOME_ROUTE)).into_response()
}

/// POST /signout
pub async fn sign_out(State(state): State<ServerState>, Extension(current): Extension<CurrentSession>) -> Response {
    state.sessions.revoke(&current.token);
    if let Err(e) = state.identity.logout(&current.session).await {
        tracing::warn!(error = %e, "Provider logout failed");
    }
    tracing::info!(username = %current.session.username, "User signed out");
    ([(SET_COOKIE, session_cookie("", 0))], Redirect::to(SIGN_IN_ROUTE)).into_response()
}

fn sign_in_page(error: Option<&str>) -> Html<String> {
    let error = error
        .map(|e| format!("<p class=\"error\">{}</p>", escape(e)))
        .unwrap_or_default();
    Html(format!(
        "<!doctype html><html><head><title>Sign in</title></head>\
         <body><h1>Sign in</h1>{}\
         <form method=\"post\" action=\"{}\">\
         <input name=\"username\" autocomplete=\"username\">\
         <input name=\"password\" type=\"password\" autocomplete=\"current-password\">\
         <button>Sign in</button></form></body></html>",
        error, SIGN_IN_ROUTE
    ))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
