//! Domain error kinds
//!
//! Store and transport failures are wrapped into one of these kinds before
//! they leave the client library. Each kind carries a stable [`ErrorCode`]
//! and converts into [`AppError`] for presentation.

use super::codes::ErrorCode;
use super::types::AppError;
use thiserror::Error;

/// Required external endpoint or credential is missing or unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} is not configured")]
    Missing { key: &'static str },

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    pub fn missing(key: &'static str) -> Self {
        Self::Missing { key }
    }

    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Missing { .. } => ErrorCode::ConfigMissing,
            Self::Invalid { .. } => ErrorCode::ConfigInvalid,
        }
    }

    /// Name of the offending configuration key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Missing { key } | Self::Invalid { key, .. } => key,
        }
    }
}

/// Which catalog table a fetch was reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogResource {
    Products,
    Categories,
}

impl std::fmt::Display for CatalogResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Products => f.write_str("products"),
            Self::Categories => f.write_str("categories"),
        }
    }
}

/// Catalog read failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("catalog store unreachable: {0}")]
    Unreachable(String),

    #[error("catalog query timed out after {0}s")]
    Timeout(u64),

    #[error("{resource} query rejected ({status}): {message}")]
    Rejected {
        resource: CatalogResource,
        status: u16,
        message: String,
    },

    #[error("malformed {resource} response: {message}")]
    Malformed {
        resource: CatalogResource,
        message: String,
    },
}

impl FetchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Config(e) => e.code(),
            Self::Unreachable(_) => ErrorCode::CatalogUnreachable,
            Self::Timeout(_) => ErrorCode::CatalogTimeout,
            Self::Rejected {
                resource: CatalogResource::Products,
                ..
            } => ErrorCode::ProductsFetchFailed,
            Self::Rejected {
                resource: CatalogResource::Categories,
                ..
            } => ErrorCode::CategoriesFetchFailed,
            Self::Malformed { .. } => ErrorCode::CatalogMalformed,
        }
    }
}

/// Favorite read or write failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("product {product_id} not found")]
    NotFound { product_id: String },

    #[error("failed to read favorite state: {0}")]
    Read(String),

    #[error("failed to update favorite state: {0}")]
    Write(String),
}

impl ToggleError {
    pub fn not_found(product_id: impl ToString) -> Self {
        Self::NotFound {
            product_id: product_id.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Config(e) => e.code(),
            Self::NotFound { .. } => ErrorCode::FavoriteProductNotFound,
            Self::Read(_) => ErrorCode::FavoriteReadFailed,
            Self::Write(_) => ErrorCode::FavoriteUpdateFailed,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Webhook call failed or was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error(transparent)]
    MissingConfig(#[from] ConfigError),

    #[error("sync webhook rejected the request with status {status}: {message}")]
    RemoteRejected { status: u16, message: String },

    #[error("sync webhook unreachable: {0}")]
    Transport(String),
}

impl TriggerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingConfig(e) => e.code(),
            Self::RemoteRejected { .. } => ErrorCode::SyncRejected,
            Self::Transport(_) => ErrorCode::SyncFailed,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::with_message(err.code(), err.to_string()).with_detail("key", err.key())
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match &err {
            FetchError::Rejected { status, .. } => app.with_detail("status", *status),
            FetchError::Config(config) => app.with_detail("key", config.key()),
            _ => app,
        }
    }
}

impl From<ToggleError> for AppError {
    fn from(err: ToggleError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match &err {
            ToggleError::NotFound { product_id } => {
                app.with_detail("product_id", product_id.clone())
            }
            _ => app,
        }
    }
}

impl From<TriggerError> for AppError {
    fn from(err: TriggerError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match &err {
            TriggerError::RemoteRejected { status, .. } => app.with_detail("status", *status),
            TriggerError::MissingConfig(config) => app.with_detail("key", config.key()),
            _ => app,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_codes_distinguish_resource() {
        let products = FetchError::Rejected {
            resource: CatalogResource::Products,
            status: 500,
            message: "boom".into(),
        };
        let categories = FetchError::Rejected {
            resource: CatalogResource::Categories,
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(products.code(), ErrorCode::ProductsFetchFailed);
        assert_eq!(categories.code(), ErrorCode::CategoriesFetchFailed);
        assert_eq!(FetchError::Timeout(30).code(), ErrorCode::CatalogTimeout);
    }

    #[test]
    fn test_toggle_not_found_has_distinct_code() {
        let not_found = ToggleError::not_found(7);
        assert!(not_found.is_not_found());
        assert_ne!(not_found.code(), ToggleError::Write("x".into()).code());
        assert_ne!(not_found.code(), ToggleError::Read("x".into()).code());

        let app: AppError = not_found.into();
        assert_eq!(app.code, ErrorCode::FavoriteProductNotFound);
        assert_eq!(app.details.unwrap().get("product_id").unwrap(), "7");
    }

    #[test]
    fn test_trigger_missing_config_is_config_error() {
        let err: TriggerError = ConfigError::missing("WEBHOOK_URL").into();
        assert_eq!(err.code(), ErrorCode::ConfigMissing);
        assert_eq!(err.to_string(), "WEBHOOK_URL is not configured");

        let app: AppError = err.into();
        assert_eq!(app.details.unwrap().get("key").unwrap(), "WEBHOOK_URL");
    }

    #[test]
    fn test_remote_rejected_carries_status() {
        let err = TriggerError::RemoteRejected {
            status: 401,
            message: "Unauthorized".into(),
        };
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::SyncRejected);
        assert_eq!(app.details.unwrap().get("status").unwrap(), 401);
    }
}
