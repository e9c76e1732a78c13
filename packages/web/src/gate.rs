//! Session gate as axum middleware, for full page loads.
//!
//! Must run inside the session layer. Non-page paths pass straight through.

use api::gate::{decide, is_gated, GateDecision, SessionState};
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

async fn session_state(session: &Session) -> SessionState {
    let backend = match api::backend::get_backend().await {
        Ok(backend) => backend,
        Err(e) => {
            tracing::warn!("backend unavailable, treating request as signed out: {}", e);
            return SessionState::Absent;
        }
    };
    match api::auth::current_session(session, backend).await {
        Ok(auth) => SessionState::from(auth.is_some()),
        Err(e) => {
            tracing::warn!("session lookup failed, treating request as signed out: {}", e);
            SessionState::Absent
        }
    }
}

pub async fn session_gate(session: Session, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !is_gated(&path) {
        return next.run(request).await;
    }

    match decide(&path, session_state(&session).await) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::Redirect(to) => {
            tracing::debug!(from = %path, to, "gate redirect");
            Redirect::to(to).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{self, header, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "landing" }))
            .route("/login", get(|| async { "login" }))
            .route("/timeline", get(|| async { "timeline" }))
            .route("/api/auth/me", get(|| async { "null" }))
            .layer(axum::middleware::from_fn(session_gate))
            .layer(SessionManagerLayer::new(MemoryStore::default()))
    }

    async fn get_path(path: &str) -> Response {
        app()
            .oneshot(http::Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_protected_page_redirects_to_login() {
        let response = get_path("/timeline").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_public_pages_pass() {
        assert_eq!(get_path("/").await.status(), StatusCode::OK);
        assert_eq!(get_path("/login").await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_server_functions_are_not_gated() {
        assert_eq!(get_path("/api/auth/me").await.status(), StatusCode::OK);
    }
}
