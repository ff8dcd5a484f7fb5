//! Auth Gate and identity providers
//!
//! The gate never compares credentials itself: it asks an
//! [`IdentityProvider`] and persists the resulting marker through a
//! [`SessionStore`].

mod fixed;
mod gate;
mod session;
mod supabase;

pub use fixed::FixedCredentialProvider;
pub use gate::{AuthGate, GateState, HOME_ROUTE, RouteDecision, SIGN_IN_ROUTE, route_decision};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use supabase::SupabaseAuthProvider;

use crate::config::{AuthProviderKind, ClientConfig};
use crate::http::HttpClient;
use async_trait::async_trait;
use shared::error::{AppError, ConfigError, ErrorCode};
use shared::models::Session;
use std::sync::Arc;
use thiserror::Error;

/// Authentication error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Identity provider error: {0}")]
    Provider(String),

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl AuthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidCredentials => ErrorCode::InvalidCredentials,
            Self::Config(e) => e.code(),
            Self::Provider(_) => ErrorCode::AuthProviderError,
            Self::Storage(_) => ErrorCode::SessionStorageError,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Config(config) => config.into(),
            other => AppError::with_message(other.code(), other.to_string()),
        }
    }
}

/// Identity capability behind the Auth Gate
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    /// [`AuthError::InvalidCredentials`] on a plain mismatch
    async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError>;

    async fn logout(&self, session: &Session) -> Result<(), AuthError>;

    /// Re-validate a persisted marker; `None` when it no longer holds
    async fn current_session(&self, marker: &Session) -> Result<Option<Session>, AuthError>;
}

/// Build the provider selected by configuration
pub fn provider_from_config(
    http: Arc<dyn HttpClient>,
    config: &ClientConfig,
) -> Result<Arc<dyn IdentityProvider>, ConfigError> {
    let provider: Arc<dyn IdentityProvider> = match config.auth_provider() {
        AuthProviderKind::Fixed => Arc::new(FixedCredentialProvider::from_config(config)?),
        AuthProviderKind::Supabase => Arc::new(SupabaseAuthProvider::from_config(http, config)?),
    };
    tracing::debug!(provider = provider.name(), "Identity provider selected");
    Ok(provider)
}
