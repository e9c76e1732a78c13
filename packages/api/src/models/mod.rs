//! Data models that cross the server boundary or live in the session.

mod user;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use session::{AuthSession, TokenResponse};
#[cfg(feature = "server")]
pub use user::AuthUser;
pub use user::UserInfo;
