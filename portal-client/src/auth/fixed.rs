//! Legacy constant credential pair

use super::{AuthError, IdentityProvider};
use crate::config::{AUTH_PASSWORD_KEY, AUTH_USERNAME_KEY, ClientConfig};
use async_trait::async_trait;
use shared::error::ConfigError;
use shared::models::Session;

/// Accepts exactly one configured username/password pair
///
/// Meant for tests and single-machine setups. There are no built-in
/// defaults: both values must be configured.
#[derive(Clone)]
pub struct FixedCredentialProvider {
    username: String,
    password: String,
}

impl std::fmt::Debug for FixedCredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedCredentialProvider")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl FixedCredentialProvider {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let username = config
            .auth_username
            .as_deref()
            .ok_or_else(|| ConfigError::missing(AUTH_USERNAME_KEY))?;
        let password = config
            .auth_password
            .as_deref()
            .ok_or_else(|| ConfigError::missing(AUTH_PASSWORD_KEY))?;
        Ok(Self::new(username, password))
    }
}

#[async_trait]
impl IdentityProvider for FixedCredentialProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if username == self.username && password == self.password {
            Ok(Session::new(username))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn logout(&self, _session: &Session) -> Result<(), AuthError> {
        Ok(())
    }

    async fn current_session(&self, marker: &Session) -> Result<Option<Session>, AuthError> {
        let valid = marker.is_authenticated && marker.username == self.username;
        Ok(valid.then(|| marker.clone()))
    }
}
