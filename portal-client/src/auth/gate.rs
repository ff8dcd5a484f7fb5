//! Auth Gate state machine and route policy

use super::{AuthError, IdentityProvider, SessionStore};
use shared::models::Session;
use std::sync::Arc;

pub const SIGN_IN_ROUTE: &str = "/signin";
pub const HOME_ROUTE: &str = "/";

/// Where a navigation should end up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToSignIn,
    RedirectHome,
}

/// Route policy: the sign-in route is open to everyone but bounces
/// authenticated visitors home; everything else requires a session
pub fn route_decision(authenticated: bool, path: &str) -> RouteDecision {
    let is_sign_in = path == SIGN_IN_ROUTE || path.starts_with("/signin/");
    match (authenticated, is_sign_in) {
        (true, true) => RouteDecision::RedirectHome,
        (true, false) | (false, true) => RouteDecision::Allow,
        (false, false) => RouteDecision::RedirectToSignIn,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Unknown,
    Checking,
    Authenticated(Session),
    Unauthenticated,
}

/// Guards every protected action
///
/// The gate re-evaluates on each [`AuthGate::check`]; there is no terminal
/// state. Failed logins leave the state untouched and there is no lockout.
pub struct AuthGate {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn SessionStore>,
    state: GateState,
}

impl AuthGate {
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            provider,
            store,
            state: GateState::Unknown,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            GateState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// Read the persisted marker and settle on a state
    pub async fn check(&mut self) -> &GateState {
        self.state = GateState::Checking;

        let marker = match self.store.load() {
            Ok(marker) => marker,
            Err(e) => {
                tracing::warn!(error = %e, "Session marker unavailable");
                self.clear_marker();
                None
            }
        };

        self.state = match marker {
            Some(marker) if marker.is_valid_at(chrono::Utc::now().timestamp()) => {
                match self.provider.current_session(&marker).await {
                    Ok(Some(session)) => GateState::Authenticated(session),
                    Ok(None) => {
                        tracing::info!(username = %marker.username, "Stored session no longer valid");
                        self.clear_marker();
                        GateState::Unauthenticated
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Could not verify stored session");
                        GateState::Unauthenticated
                    }
                }
            }
            Some(_) => {
                self.clear_marker();
                GateState::Unauthenticated
            }
            None => GateState::Unauthenticated,
        };

        &self.state
    }

    /// `Ok(false)` on a credential mismatch, without any state change
    pub async fn login(&mut self, username: &str, password: &str) -> Result<bool, AuthError> {
        let session = match self.provider.login(username, password).await {
            Ok(session) => session,
            Err(AuthError::InvalidCredentials) => {
                tracing::info!(username = %username, "Login rejected");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        self.store.save(&session)?;
        tracing::info!(username = %session.username, provider = self.provider.name(), "Logged in");
        self.state = GateState::Authenticated(session);
        Ok(true)
    }

    fn clear_marker(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear session marker");
        }
    }

    /// Drop the marker; provider-side logout failures are only logged
    ///
    /// Works from any state: a marker the provider could not verify is
    /// still cleared.
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        let session = match &self.state {
            GateState::Authenticated(session) => Some(session.clone()),
            _ => self.store.load().ok().flatten(),
        };
        if let Some(session) = session
            && let Err(e) = self.provider.logout(&session).await
        {
            tracing::warn!(error = %e, "Provider logout failed");
        }
        self.store.clear()?;
        self.state = GateState::Unauthenticated;
        Ok(())
    }

    /// Route policy applied to the current state
    pub fn navigate(&self, path: &str) -> RouteDecision {
        route_decision(self.is_authenticated(), path)
    }
}
