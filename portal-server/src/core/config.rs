use portal_client::ClientConfig;
use shared::error::ConfigError;

const DEFAULT_SESSION_TTL_SECS: u64 = 12 * 60 * 60;

/// Server configuration
///
/// # Environment variables
///
/// Every value can be set through the environment (a `.env` file is loaded
/// first by the binary). The catalog, webhook and identity settings are read
/// by [`ClientConfig::from_env`].
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development, staging or production |
/// | LOG_LEVEL | info | default log level when `RUST_LOG` is unset |
/// | LOG_DIR | (none) | daily rolling log files go here when set |
/// | SESSION_TTL_SECS | 43200 | lifetime of a portal session |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 SUPABASE_URL=https://x.supabase.co cargo run -p portal-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub session_ttl_secs: u64,
    /// Catalog store, webhook and identity provider settings
    pub client: ClientConfig,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset values fall back to defaults; malformed catalog settings are an
    /// error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            session_ttl_secs: std::env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_SESSION_TTL_SECS),
            client: ClientConfig::from_env()?,
        })
    }

    /// Defaults around a given client configuration
    ///
    /// Used by tests and embedders that do not read the environment.
    pub fn with_client(client: ClientConfig) -> Self {
        Self {
            http_port: 3000,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            client,
        }
    }

    pub fn with_session_ttl(mut self, secs: u64) -> Self {
        self.session_ttl_secs = secs;
        self
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
