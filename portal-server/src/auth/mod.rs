//! Portal sessions and the route guard

mod middleware;
mod session;

pub use middleware::{CurrentSession, SESSION_COOKIE, extract_token, require_auth, session_cookie};
pub use session::SessionRegistry;
