//! Auth tokens in the server-side session.
//!
//! The signed-in [`AuthSession`] lives under [`SESSION_AUTH_KEY`]. Reads go
//! through [`current_session`], which refreshes an expired access token once
//! and drops the session when the backend rejects the refresh. A refresh
//! that fails in transit leaves the tokens in place and surfaces the error.

use tower_sessions::Session;

use crate::backend::{BackendClient, BackendError};
use crate::models::AuthSession;

/// Key for storing the auth tokens in the session.
pub const SESSION_AUTH_KEY: &str = "auth";

pub async fn store_session(session: &Session, auth: &AuthSession) -> Result<(), BackendError> {
    session.insert(SESSION_AUTH_KEY, auth).await?;
    Ok(())
}

/// The live auth session, refreshed if its access token has expired.
///
/// Returns `Ok(None)` when nobody is signed in or the refresh token was
/// rejected; in the latter case the stale tokens are removed. Transport
/// failures are returned as errors and keep the session for the next try.
pub async fn current_session(
    session: &Session,
    backend: &BackendClient,
) -> Result<Option<AuthSession>, BackendError> {
    current_session_at(session, backend, chrono::Utc::now().timestamp()).await
}

async fn current_session_at(
    session: &Session,
    backend: &BackendClient,
    now: i64,
) -> Result<Option<AuthSession>, BackendError> {
    let Some(auth) = session.get::<AuthSession>(SESSION_AUTH_KEY).await? else {
        return Ok(None);
    };
    if !auth.is_expired(now) {
        return Ok(Some(auth));
    }

    match backend.refresh_session(&auth.refresh_token).await {
        Ok(refreshed) => {
            tracing::debug!(user_id = %refreshed.user.id, "refreshed access token");
            store_session(session, &refreshed).await?;
            Ok(Some(refreshed))
        }
        Err(e) if e.is_rejection() => {
            tracing::warn!(user_id = %auth.user.id, "token refresh rejected: {}", e);
            session.remove::<AuthSession>(SESSION_AUTH_KEY).await?;
            Ok(None)
        }
        Err(e) => {
            tracing::warn!(user_id = %auth.user.id, "token refresh failed, keeping session: {}", e);
            Err(e)
        }
    }
}

/// Like [`current_session`] but fails with [`BackendError::Unauthenticated`]
/// when nobody is signed in.
pub async fn require_session(
    session: &Session,
    backend: &BackendClient,
) -> Result<AuthSession, BackendError> {
    current_session(session, backend)
        .await?
        .ok_or(BackendError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::backend::BackendConfig;
    use crate::models::UserInfo;

    fn auth(expires_at: i64) -> AuthSession {
        AuthSession {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            expires_at,
            user: UserInfo {
                id: "u1".to_string(),
                email: "ben@example.com".to_string(),
                name: None,
            },
        }
    }

    fn new_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    async fn backend(refresh_ok: bool) -> BackendClient {
        let handler = move |Json(_body): Json<Value>| async move {
            if refresh_ok {
                (
                    StatusCode::OK,
                    Json(json!({
                        "access_token": "fresh",
                        "refresh_token": "rt2",
                        "expires_in": 3600,
                        "user": {"id": "u1", "email": "ben@example.com"}
                    })),
                )
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error_description": "Refresh Token Not Found"})),
                )
            }
        };
        let router = Router::new().route("/auth/v1/token", post(handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        BackendClient::new(BackendConfig::new(format!("http://{addr}"), "anon")).unwrap()
    }

    #[tokio::test]
    async fn test_no_session() {
        let session = new_session();
        let backend = backend(true).await;
        assert_eq!(current_session_at(&session, &backend, 0).await.unwrap(), None);
        assert!(matches!(
            require_session(&session, &backend).await,
            Err(BackendError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_valid_session_is_returned_unchanged() {
        let session = new_session();
        let backend = backend(false).await;
        store_session(&session, &auth(10_000)).await.unwrap();

        let current = current_session_at(&session, &backend, 1_000).await.unwrap();
        assert_eq!(current, Some(auth(10_000)));
    }

    #[tokio::test]
    async fn test_expired_session_is_refreshed() {
        let session = new_session();
        let backend = backend(true).await;
        store_session(&session, &auth(1_000)).await.unwrap();

        let current = current_session_at(&session, &backend, 5_000).await.unwrap().unwrap();
        assert_eq!(current.access_token, "fresh");

        let stored: AuthSession = session.get(SESSION_AUTH_KEY).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token, "rt2");
    }

    #[tokio::test]
    async fn test_rejected_refresh_clears_session() {
        let session = new_session();
        let backend = backend(false).await;
        store_session(&session, &auth(1_000)).await.unwrap();

        assert_eq!(current_session_at(&session, &backend, 5_000).await.unwrap(), None);
        let stored: Option<AuthSession> = session.get(SESSION_AUTH_KEY).await.unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend_keeps_session() {
        let session = new_session();
        // Bind then drop a listener so nothing is accepting on the port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let backend = BackendClient::new(BackendConfig::new(format!("http://{addr}"), "anon")).unwrap();
        store_session(&session, &auth(1_000)).await.unwrap();

        let result = current_session_at(&session, &backend, 5_000).await;
        assert!(matches!(result, Err(BackendError::Http(_))));

        let stored: Option<AuthSession> = session.get(SESSION_AUTH_KEY).await.unwrap();
        assert_eq!(stored, Some(auth(1_000)));
    }
}
