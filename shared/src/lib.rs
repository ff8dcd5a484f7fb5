//! Shared types for the label portal
//!
//! Data models, catalog rules, error types, price formatting and print link
//! construction used by both the client library and the HTTP server.

pub mod catalog;
pub mod error;
pub mod format;
pub mod models;
pub mod print;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{Catalog, Product, ProductCategory, ProductId, Session};
