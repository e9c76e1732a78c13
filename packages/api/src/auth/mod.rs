//! Authentication: the backend's password sign-in, tokens kept in the session.

#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use session::{current_session, require_session, store_session, SESSION_AUTH_KEY};
