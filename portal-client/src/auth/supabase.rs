//! Supabase password-grant identity provider

use super::{AuthError, IdentityProvider};
use crate::config::ClientConfig;
use crate::http::{HttpClient, HttpReply, HttpRequest};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use shared::error::ConfigError;
use shared::models::Session;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    user: Option<UserResponse>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    email: Option<String>,
}

/// Delegates login to `{SUPABASE_URL}/auth/v1`
#[derive(Clone)]
pub struct SupabaseAuthProvider {
    http: Arc<dyn HttpClient>,
    auth_url: String,
    anon_key: String,
}

impl SupabaseAuthProvider {
    pub fn new(http: Arc<dyn HttpClient>, project_url: &str, anon_key: impl Into<String>) -> Self {
        Self {
            http,
            auth_url: format!("{}/auth/v1", project_url.trim_end_matches('/')),
            anon_key: anon_key.into(),
        }
    }

    pub fn from_config(http: Arc<dyn HttpClient>, config: &ClientConfig) -> Result<Self, ConfigError> {
        let (url, key) = config.store_endpoint()?;
        Ok(Self::new(http, url, key))
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpReply, AuthError> {
        self.http
            .execute(request.header("apikey", self.anon_key.as_str()))
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))
    }
}

fn provider_error(reply: &HttpReply) -> AuthError {
    AuthError::Provider(format!("{} {}", reply.status, reply.status_text))
}

#[async_trait]
impl IdentityProvider for SupabaseAuthProvider {
    fn name(&self) -> &'static str {
        "supabase"
    }

    async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let request = HttpRequest::post(format!("{}/token?grant_type=password", self.auth_url))
            .json(json!({ "email": username, "password": password }));
        let reply = self.send(request).await?;

        match reply.status {
            400 | 401 => return Err(AuthError::InvalidCredentials),
            _ if !reply.is_success() => return Err(provider_error(&reply)),
            _ => {}
        }

        let token: TokenResponse = reply
            .json()
            .map_err(|e| AuthError::Provider(format!("invalid token response: {}", e)))?;

        let name = token
            .user
            .and_then(|u| u.email)
            .unwrap_or_else(|| username.to_string());
        let mut session = Session::new(name).with_access_token(token.access_token);
        let expires_at = token.expires_at.or_else(|| {
            token
                .expires_in
                .map(|secs| chrono::Utc::now().timestamp() + secs)
        });
        if let Some(expires_at) = expires_at {
            session = session.with_expires_at(expires_at);
        }
        Ok(session)
    }

    async fn logout(&self, session: &Session) -> Result<(), AuthError> {
        let Some(token) = session.access_token.as_deref() else {
            return Ok(());
        };
        let reply = self
            .send(HttpRequest::post(format!("{}/logout", self.auth_url)).bearer(token))
            .await?;
        // An already revoked token counts as logged out
        if reply.is_success() || reply.status == 401 || reply.status == 403 {
            Ok(())
        } else {
            Err(provider_error(&reply))
        }
    }

    async fn current_session(&self, marker: &Session) -> Result<Option<Session>, AuthError> {
        let Some(token) = marker.access_token.as_deref() else {
            return Ok(None);
        };
        let reply = self
            .send(HttpRequest::get(format!("{}/user", self.auth_url)).bearer(token))
            .await?;

        match reply.status {
            401 | 403 => Ok(None),
            _ if !reply.is_success() => Err(provider_error(&reply)),
            _ => {
                let user: UserResponse = reply
                    .json()
                    .map_err(|e| AuthError::Provider(format!("invalid user response: {}", e)))?;
                let mut session = marker.clone();
                if let Some(email) = user.email {
                    session.username = email;
                }
                Ok(Some(session))
            }
        }
    }
}
