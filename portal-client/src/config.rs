//! Client configuration
//!
//! | Variable | Meaning |
//! |---|---|
//! | `SUPABASE_URL`, `SUPABASE_ANON_KEY` | catalog store connection |
//! | `WEBHOOK_URL` | webhook base, also the print base (`{WEBHOOK_URL}/print`) |
//! | `PRINT_URL` | explicit print endpoint, overrides the derived one |
//! | `WEBHOOK_SECRET` | basic-auth credential for the sync webhook |
//! | `AUTH_USERNAME`, `AUTH_PASSWORD` | legacy fixed credential pair |
//! | `AUTH_PROVIDER` | `fixed` or `supabase` |
//! | `REQUEST_TIMEOUT_SECS` | catalog query timeout, default 30 |

use shared::error::ConfigError;
use shared::print::print_base_from_webhook;
use std::fmt;
use std::str::FromStr;

pub const SUPABASE_URL_KEY: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_KEY: &str = "SUPABASE_ANON_KEY";
pub const WEBHOOK_URL_KEY: &str = "WEBHOOK_URL";
pub const WEBHOOK_SECRET_KEY: &str = "WEBHOOK_SECRET";
pub const AUTH_USERNAME_KEY: &str = "AUTH_USERNAME";
pub const AUTH_PASSWORD_KEY: &str = "AUTH_PASSWORD";
pub const AUTH_PROVIDER_KEY: &str = "AUTH_PROVIDER";
pub const REQUEST_TIMEOUT_KEY: &str = "REQUEST_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which identity provider backs the Auth Gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProviderKind {
    /// Legacy constant credential pair
    Fixed,
    /// Supabase password grant
    Supabase,
}

impl FromStr for AuthProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "supabase" => Ok(Self::Supabase),
            other => Err(ConfigError::invalid(
                AUTH_PROVIDER_KEY,
                format!("expected 'fixed' or 'supabase', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for AuthProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => f.write_str("fixed"),
            Self::Supabase => f.write_str("supabase"),
        }
    }
}

/// Connection settings for the catalog store, webhook and identity provider
///
/// Every endpoint is optional here; operations that need one fail with
/// [`ConfigError`] when it is absent.
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub webhook_url: Option<String>,
    pub print_url: Option<String>,
    pub webhook_secret: Option<String>,
    pub auth_username: Option<String>,
    pub auth_password: Option<String>,
    /// Explicit provider choice; `None` resolves via [`Self::auth_provider`]
    pub auth_provider: Option<AuthProviderKind>,
    /// Catalog query timeout in seconds
    pub timeout: u64,
}

// Secrets stay out of debug output
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &self.supabase_anon_key.as_ref().map(|_| "***"))
            .field("webhook_url", &self.webhook_url)
            .field("print_url", &self.print_url)
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "***"))
            .field("auth_username", &self.auth_username)
            .field("auth_password", &self.auth_password.as_ref().map(|_| "***"))
            .field("auth_provider", &self.auth_provider)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Empty configuration with the default timeout
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            ..Default::default()
        }
    }

    /// Load from process environment
    ///
    /// Call `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout = match get(REQUEST_TIMEOUT_KEY) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    ConfigError::invalid(REQUEST_TIMEOUT_KEY, format!("not a positive integer: {}", raw))
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let auth_provider = get(AUTH_PROVIDER_KEY)
            .map(|raw| raw.parse::<AuthProviderKind>())
            .transpose()?;

        Ok(Self {
            supabase_url: get(SUPABASE_URL_KEY).map(|u| u.trim_end_matches('/').to_string()),
            supabase_anon_key: get(SUPABASE_ANON_KEY_KEY),
            webhook_url: get(WEBHOOK_URL_KEY).map(|u| u.trim_end_matches('/').to_string()),
            print_url: get(shared::print::PRINT_URL_KEY),
            webhook_secret: get(WEBHOOK_SECRET_KEY),
            auth_username: get(AUTH_USERNAME_KEY),
            auth_password: get(AUTH_PASSWORD_KEY),
            auth_provider,
            timeout,
        })
    }

    /// Set the catalog store connection
    pub fn with_supabase(mut self, url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        self.supabase_url = Some(url.into().trim_end_matches('/').to_string());
        self.supabase_anon_key = Some(anon_key.into());
        self
    }

    /// Set the webhook base URL
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    /// Set the webhook basic-auth credential
    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    /// Set an explicit print endpoint
    pub fn with_print_url(mut self, url: impl Into<String>) -> Self {
        self.print_url = Some(url.into());
        self
    }

    /// Set the legacy fixed credential pair
    pub fn with_fixed_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth_username = Some(username.into());
        self.auth_password = Some(password.into());
        self
    }

    pub fn with_auth_provider(mut self, kind: AuthProviderKind) -> Self {
        self.auth_provider = Some(kind);
        self
    }

    /// Set the catalog query timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Store URL and anon key, both required
    pub fn store_endpoint(&self) -> Result<(&str, &str), ConfigError> {
        let url = self
            .supabase_url
            .as_deref()
            .ok_or_else(|| ConfigError::missing(SUPABASE_URL_KEY))?;
        let key = self
            .supabase_anon_key
            .as_deref()
            .ok_or_else(|| ConfigError::missing(SUPABASE_ANON_KEY_KEY))?;
        Ok((url, key))
    }

    /// Explicit print URL, else `{WEBHOOK_URL}/print`
    pub fn print_base(&self) -> Option<String> {
        self.print_url
            .clone()
            .or_else(|| self.webhook_url.as_deref().map(print_base_from_webhook))
    }

    /// Configured provider, else Supabase when the store is configured
    pub fn auth_provider(&self) -> AuthProviderKind {
        self.auth_provider.unwrap_or(if self.store_endpoint().is_ok() {
            AuthProviderKind::Supabase
        } else {
            AuthProviderKind::Fixed
        })
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout)
    }
}
