//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Configuration errors
/// - 3xxx: Catalog fetch errors
/// - 4xxx: Favorite toggle errors
/// - 5xxx: Sync trigger errors
/// - 6xxx: Print errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Configuration errors (2xxx)
    Config,
    /// Catalog fetch errors (3xxx)
    Catalog,
    /// Favorite toggle errors (4xxx)
    Favorite,
    /// Sync trigger errors (5xxx)
    Sync,
    /// Print errors (6xxx)
    Print,
    /// System errors (7xxx and above)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Config,
            3000..4000 => Self::Catalog,
            4000..5000 => Self::Favorite,
            5000..6000 => Self::Sync,
            6000..7000 => Self::Print,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Config => "config",
            Self::Catalog => "catalog",
            Self::Favorite => "favorite",
            Self::Sync => "sync",
            Self::Print => "print",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
