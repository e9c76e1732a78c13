//! # Session gate — which page requests need a signed-in user
//!
//! The rule set is tiny and shared by both enforcement points: the axum
//! middleware in the `web` binary (full page loads) and the app shell in the
//! same binary (in-app navigation).
//!
//! - No session, page other than `/` or `/login` → redirect to `/login`.
//! - Session present, page is `/login` → redirect to `/timeline`.
//! - Anything else passes.
//!
//! Callers that cannot determine the session (store error, failed refresh)
//! pass [`SessionState::Absent`], so the gate fails closed.

/// Public landing page.
pub const LANDING_PATH: &str = "/";
/// Login page.
pub const LOGIN_PATH: &str = "/login";
/// Default page for a signed-in user.
pub const HOME_PATH: &str = "/timeline";

/// Path prefixes that are not pages and are never gated.
const UNGATED_PREFIXES: &[&str] = &["/api/", "/assets/", "/_dioxus", "/wasm/", "/auth/callback"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Present,
    Absent,
}

impl From<bool> for SessionState {
    fn from(present: bool) -> Self {
        if present {
            SessionState::Present
        } else {
            SessionState::Absent
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(&'static str),
}

/// Decide what happens to a request for `path`.
pub fn decide(path: &str, session: SessionState) -> GateDecision {
    let path = normalize(path);
    match session {
        SessionState::Absent if path != LANDING_PATH && path != LOGIN_PATH => {
            GateDecision::Redirect(LOGIN_PATH)
        }
        SessionState::Present if path == LOGIN_PATH => GateDecision::Redirect(HOME_PATH),
        _ => GateDecision::Allow,
    }
}

/// Whether a request path is a page the gate applies to.
pub fn is_gated(path: &str) -> bool {
    if path == "/favicon.ico" {
        return false;
    }
    !UNGATED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix) || path == prefix.trim_end_matches('/'))
}

/// Drops the query and a trailing slash: `/login/?next=x` → `/login`.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => LANDING_PATH,
        trimmed => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_page_without_session() {
        assert_eq!(
            decide("/timeline", SessionState::Absent),
            GateDecision::Redirect("/login")
        );
        assert_eq!(
            decide("/playlist", SessionState::Absent),
            GateDecision::Redirect("/login")
        );
    }

    #[test]
    fn test_login_with_session() {
        assert_eq!(
            decide("/login", SessionState::Present),
            GateDecision::Redirect("/timeline")
        );
        assert_eq!(
            decide("/login/?from=nav", SessionState::Present),
            GateDecision::Redirect("/timeline")
        );
    }

    #[test]
    fn test_public_pages_pass() {
        assert_eq!(decide("/", SessionState::Absent), GateDecision::Allow);
        assert_eq!(decide("/login", SessionState::Absent), GateDecision::Allow);
        assert_eq!(decide("/", SessionState::Present), GateDecision::Allow);
    }

    #[test]
    fn test_signed_in_pages_pass() {
        for path in ["/timeline", "/gallery", "/notes", "/letters", "/playlist"] {
            assert_eq!(decide(path, SessionState::Present), GateDecision::Allow);
        }
    }

    #[test]
    fn test_session_state_from_bool() {
        assert_eq!(SessionState::from(true), SessionState::Present);
        assert_eq!(SessionState::from(false), SessionState::Absent);
    }

    #[test]
    fn test_non_pages_are_not_gated() {
        assert!(!is_gated("/api/notes"));
        assert!(!is_gated("/assets/main-abc123.css"));
        assert!(!is_gated("/_dioxus/hot-reload"));
        assert!(!is_gated("/wasm/web_bg.wasm"));
        assert!(!is_gated("/favicon.ico"));
        assert!(!is_gated("/api"));
        assert!(is_gated("/"));
        assert!(is_gated("/timeline"));
        assert!(is_gated("/apiary"));
    }
}
