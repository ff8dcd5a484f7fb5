//! Portal Server - HTTP surface of the label portal
//!
//! Staff sign in through the configured identity provider, then browse the
//! retail rice catalog, flip favorites, trigger the catalog sync and get
//! label print links.
//!
//! ```text
//! portal-server/src/
//! ├── core/      # configuration, state, startup
//! ├── auth/      # portal sessions and the route guard
//! ├── api/       # HTTP handlers
//! ├── routes/    # router assembly and request logging
//! └── utils/     # logging setup
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod routes;
pub mod utils;

pub use auth::{CurrentSession, SessionRegistry};
pub use core::{Config, Server, ServerError, ServerState};
pub use routes::build_app;
pub use utils::init_logger;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

/// Security event on the `security` log target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
