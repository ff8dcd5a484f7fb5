//! Data models
//!
//! Shared between the client library, the HTTP server and API consumers.

pub mod catalog;
pub mod category;
pub mod product;
pub mod session;

// Re-exports
pub use catalog::*;
pub use category::*;
pub use product::*;
pub use session::*;
