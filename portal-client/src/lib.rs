//! Portal Client - catalog, favorites, sync trigger and Auth Gate
//!
//! Talks to the hosted catalog store, the sync webhook and the identity
//! provider through one [`HttpClient`] seam.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod view;
pub mod webhook;

pub use auth::{AuthError, AuthGate, FileSessionStore, IdentityProvider, SessionStore};
pub use catalog::CatalogService;
pub use config::{AuthProviderKind, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, HttpReply, HttpRequest, NetworkHttpClient};
pub use store::{CatalogStore, MemoryStore, PostgrestStore};
pub use view::CatalogView;
pub use webhook::{SyncOutcome, SyncTrigger};

// Re-export shared types for convenience
pub use shared::error::{ConfigError, FetchError, ToggleError, TriggerError};
pub use shared::models::{Catalog, Product, ProductCategory, ProductId, Session};
