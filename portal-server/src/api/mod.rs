//! HTTP API
//!
//! - [`health`] - liveness and store connectivity
//! - [`auth`] - login, logout, current session
//! - [`catalog`] - retail catalog view and store info
//! - [`products`] - product lookup, search, favorite toggle
//! - [`sync`] - catalog sync webhook
//! - [`print`] - label print URL
//! - [`pages`] - home and sign-in pages

pub mod auth;
pub mod catalog;
pub mod health;
pub mod pages;
pub mod print;
pub mod products;
pub mod sync;

pub use shared::error::{ApiResponse, AppError, AppResult};
