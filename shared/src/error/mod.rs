//! Unified error system for the staff portal
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//! - Domain error kinds: [`ConfigError`], [`FetchError`], [`ToggleError`],
//!   [`TriggerError`]
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ApiResponse, ConfigError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "quantity must be positive");
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(2));
//!
//! let err: AppError = ConfigError::missing("WEBHOOK_URL").into();
//! assert_eq!(err.code, ErrorCode::ConfigMissing);
//! ```

mod category;
mod codes;
mod domain;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use domain::{CatalogResource, ConfigError, FetchError, ToggleError, TriggerError};
pub use types::{ApiResponse, AppError, AppResult};
