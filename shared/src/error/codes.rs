//! Unified error codes for the staff portal
//!
//! This module defines all error codes used across the client library, the
//! HTTP server and the CLI. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Configuration errors
//! - 3xxx: Catalog fetch errors
//! - 4xxx: Favorite toggle errors
//! - 5xxx: Sync trigger errors
//! - 6xxx: Print errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they serialize compactly
/// and stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Session has expired
    SessionExpired = 1005,
    /// Identity provider failed or is unreachable
    AuthProviderError = 1010,
    /// Persisted session marker could not be read or written
    SessionStorageError = 1011,

    // ==================== 2xxx: Config ====================
    /// Required endpoint or credential is not configured
    ConfigMissing = 2001,
    /// Configured value cannot be used
    ConfigInvalid = 2002,

    // ==================== 3xxx: Catalog ====================
    /// Product query failed
    ProductsFetchFailed = 3001,
    /// Category query failed
    CategoriesFetchFailed = 3002,
    /// Catalog query timed out
    CatalogTimeout = 3003,
    /// Catalog store is unreachable
    CatalogUnreachable = 3004,
    /// Catalog store returned a malformed response
    CatalogMalformed = 3005,
    /// Product does not exist in the catalog
    ProductNotFound = 3101,

    // ==================== 4xxx: Favorite ====================
    /// Product to toggle does not exist
    FavoriteProductNotFound = 4001,
    /// Reading the current favorite flag failed
    FavoriteReadFailed = 4002,
    /// Writing the new favorite flag failed
    FavoriteUpdateFailed = 4003,

    // ==================== 5xxx: Sync ====================
    /// Sync webhook answered with a non-success status
    SyncRejected = 5001,
    /// Sync webhook could not be reached
    SyncFailed = 5002,

    // ==================== 6xxx: Print ====================
    /// Print quantity outside the accepted range
    PrintQuantityInvalid = 6001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::AuthProviderError => "Identity provider error",
            ErrorCode::SessionStorageError => "Session storage error",

            // Config
            ErrorCode::ConfigMissing => "Required configuration is missing",
            ErrorCode::ConfigInvalid => "Configuration value is invalid",

            // Catalog
            ErrorCode::ProductsFetchFailed => "Failed to load products",
            ErrorCode::CategoriesFetchFailed => "Failed to load categories",
            ErrorCode::CatalogTimeout => "Catalog request timed out",
            ErrorCode::CatalogUnreachable => "Catalog store is unreachable",
            ErrorCode::CatalogMalformed => "Catalog response is malformed",
            ErrorCode::ProductNotFound => "Product not found",

            // Favorite
            ErrorCode::FavoriteProductNotFound => "Product to toggle not found",
            ErrorCode::FavoriteReadFailed => "Failed to read favorite state",
            ErrorCode::FavoriteUpdateFailed => "Failed to update favorite state",

            // Sync
            ErrorCode::SyncRejected => "Sync request was rejected",
            ErrorCode::SyncFailed => "Sync request failed",

            // Print
            ErrorCode::PrintQuantityInvalid => "Print quantity must be between 1 and 1000",

            // System
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1005 => Ok(ErrorCode::SessionExpired),
            1010 => Ok(ErrorCode::AuthProviderError),
            1011 => Ok(ErrorCode::SessionStorageError),

            // Config
            2001 => Ok(ErrorCode::ConfigMissing),
            2002 => Ok(ErrorCode::ConfigInvalid),

            // Catalog
            3001 => Ok(ErrorCode::ProductsFetchFailed),
            3002 => Ok(ErrorCode::CategoriesFetchFailed),
            3003 => Ok(ErrorCode::CatalogTimeout),
            3004 => Ok(ErrorCode::CatalogUnreachable),
            3005 => Ok(ErrorCode::CatalogMalformed),
            3101 => Ok(ErrorCode::ProductNotFound),

            // Favorite
            4001 => Ok(ErrorCode::FavoriteProductNotFound),
            4002 => Ok(ErrorCode::FavoriteReadFailed),
            4003 => Ok(ErrorCode::FavoriteUpdateFailed),

            // Sync
            5001 => Ok(ErrorCode::SyncRejected),
            5002 => Ok(ErrorCode::SyncFailed),

            // Print
            6001 => Ok(ErrorCode::PrintQuantityInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
