//! # Backend client — thin typed wrapper over the hosted REST endpoints
//!
//! Every request carries the public key in the `apikey` header and a bearer
//! token: the signed-in user's access token when there is one, the public key
//! otherwise.
//!
//! | Concern | Request |
//! |---------|---------|
//! | list | `GET /rest/v1/{table}?select=*&order={column}.{asc,desc}` |
//! | insert | `POST /rest/v1/{table}` with `Prefer: return=representation`, body `[draft]` |
//! | delete | `DELETE /rest/v1/{table}?id=eq.{id}` |
//! | upload | `POST /storage/v1/object/{bucket}/{key}` |
//! | remove object | `DELETE /storage/v1/object/{bucket}` with `{"prefixes": [key]}` |
//! | sign in / refresh | `POST /auth/v1/token?grant_type=password` / `refresh_token` |
//! | sign out | `POST /auth/v1/logout` |
//! | current user | `GET /auth/v1/user` |
//!
//! Non-2xx responses become [`BackendError::Api`] carrying the first message
//! field found in the JSON error body.

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use store::Record;

use super::{BackendConfig, BackendError};
use crate::models::{AuthSession, AuthUser, TokenResponse, UserInfo};

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

/// Error body shapes used by the REST, storage and auth services.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let bearer = token.unwrap_or(&self.config.anon_key);
        self.http
            .request(method, format!("{}{}", self.config.url, path))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    /// List every row of `R`'s table in its configured order.
    pub async fn list<R: Record>(&self, token: &str) -> Result<Vec<R>, BackendError> {
        let response = self
            .request(Method::GET, &format!("/rest/v1/{}", R::TABLE), Some(token))
            .query(&[("select", "*".to_string()), ("order", R::ORDER.to_query())])
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Insert one row and return it as stored (with id and timestamps).
    pub async fn insert<R: Record>(&self, token: &str, draft: &R::Draft) -> Result<R, BackendError> {
        let response = self
            .request(Method::POST, &format!("/rest/v1/{}", R::TABLE), Some(token))
            .header("Prefer", "return=representation")
            .json(&[draft])
            .send()
            .await?;
        let rows: Vec<R> = check(response).await?.json().await?;
        rows.into_iter().next().ok_or(BackendError::EmptyResponse)
    }

    pub async fn delete<R: Record>(&self, token: &str, id: &str) -> Result<(), BackendError> {
        let response = self
            .request(Method::DELETE, &format!("/rest/v1/{}", R::TABLE), Some(token))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// Upload an object into the image bucket under `key`.
    pub async fn upload(
        &self,
        token: &str,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), BackendError> {
        let path = format!("/storage/v1/object/{}/{}", self.config.bucket, key);
        let response = self
            .request(Method::POST, &path, Some(token))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// Public URL of an object in the image bucket.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.url, self.config.bucket, key
        )
    }

    pub async fn remove_object(&self, token: &str, key: &str) -> Result<(), BackendError> {
        let path = format!("/storage/v1/object/{}", self.config.bucket);
        let response = self
            .request(Method::DELETE, &path, Some(token))
            .json(&serde_json::json!({ "prefixes": [key] }))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.token_grant("password", &body).await
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, BackendError> {
        let body = serde_json::json!({ "refresh_token": refresh_token });
        self.token_grant("refresh_token", &body).await
    }

    async fn token_grant(
        &self,
        grant_type: &str,
        body: &serde_json::Value,
    ) -> Result<AuthSession, BackendError> {
        let response = self
            .request(Method::POST, "/auth/v1/token", None)
            .query(&[("grant_type", grant_type)])
            .json(body)
            .send()
            .await?;
        let token: TokenResponse = check(response).await?.json().await?;
        Ok(AuthSession::from_token(token, chrono::Utc::now().timestamp()))
    }

    /// Revoke the session behind `token`.
    pub async fn sign_out(&self, token: &str) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, "/auth/v1/logout", Some(token))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    pub async fn get_user(&self, token: &str) -> Result<UserInfo, BackendError> {
        let response = self
            .request(Method::GET, "/auth/v1/user", Some(token))
            .send()
            .await?;
        let user: AuthUser = check(response).await?.json().await?;
        Ok(user.to_info())
    }
}

/// Pass 2xx responses through; turn anything else into [`BackendError::Api`].
async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let parsed: ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.msg)
        .or(parsed.error_description)
        .or(parsed.error)
        .unwrap_or_else(|| format!("Backend returned {status}"));
    Err(BackendError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use store::{Letter, NewNote, Note};

    use super::*;

    type Seen = Arc<Mutex<Vec<String>>>;

    async fn spawn_fake(router: Router) -> BackendClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        BackendClient::new(BackendConfig::new(format!("http://{addr}"), "anon-key")).unwrap()
    }

    async fn list_notes(
        State(seen): State<Seen>,
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        seen.lock().unwrap().push(format!(
            "list apikey={} auth={} select={} order={}",
            headers["apikey"].to_str().unwrap(),
            headers["authorization"].to_str().unwrap(),
            query["select"],
            query["order"],
        ));
        Json(json!([
            {"id": "n2", "content": "second", "user_id": "u1", "created_at": "2024-03-02T10:00:00+00:00"},
            {"id": "n1", "content": "first", "user_id": "u1", "created_at": "2024-03-01T10:00:00+00:00"}
        ]))
    }

    async fn insert_note(
        State(seen): State<Seen>,
        headers: HeaderMap,
        Json(rows): Json<Vec<Value>>,
    ) -> (StatusCode, Json<Value>) {
        seen.lock().unwrap().push(format!(
            "insert prefer={} rows={}",
            headers["prefer"].to_str().unwrap(),
            rows.len()
        ));
        let row = &rows[0];
        (
            StatusCode::CREATED,
            Json(json!([{
                "id": "n3",
                "content": row["content"],
                "user_id": row["user_id"],
                "created_at": "2024-03-03T10:00:00+00:00"
            }])),
        )
    }

    async fn delete_note(
        State(seen): State<Seen>,
        Query(query): Query<HashMap<String, String>>,
    ) -> StatusCode {
        seen.lock().unwrap().push(format!("delete id={}", query["id"]));
        StatusCode::NO_CONTENT
    }

    async fn broken_letters() -> (StatusCode, Json<Value>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"code": "42P01", "message": "relation \"letters\" does not exist"})),
        )
    }

    async fn token(
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if query["grant_type"] != "password" || body["password"] != "secret" {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})),
            );
        }
        (
            StatusCode::OK,
            Json(json!({
                "access_token": "user-token",
                "refresh_token": "refresh",
                "expires_in": 3600,
                "token_type": "bearer",
                "user": {"id": "u1", "email": body["email"]}
            })),
        )
    }

    fn fake_router(seen: Seen) -> Router {
        Router::new()
            .route("/rest/v1/notes", get(list_notes).post(insert_note).delete(delete_note))
            .route("/rest/v1/letters", get(broken_letters))
            .route("/auth/v1/token", post(token))
            .with_state(seen)
    }

    #[tokio::test]
    async fn test_list_sends_order_and_keys() {
        let seen = Seen::default();
        let client = spawn_fake(fake_router(seen.clone())).await;

        let notes: Vec<Note> = client.list("user-token").await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, "n2");

        let log = seen.lock().unwrap();
        assert_eq!(
            log[0],
            "list apikey=anon-key auth=Bearer user-token select=* order=created_at.desc"
        );
    }

    #[tokio::test]
    async fn test_insert_returns_created_row() {
        let seen = Seen::default();
        let client = spawn_fake(fake_router(seen.clone())).await;

        let draft = NewNote {
            content: "third".to_string(),
            user_id: Some("u1".to_string()),
        };
        let note: Note = client.insert::<Note>("user-token", &draft).await.unwrap();
        assert_eq!(note.id, "n3");
        assert_eq!(note.content, "third");
        assert_eq!(note.user_id.as_deref(), Some("u1"));
        assert_eq!(seen.lock().unwrap()[0], "insert prefer=return=representation rows=1");
    }

    #[tokio::test]
    async fn test_delete_targets_id() {
        let seen = Seen::default();
        let client = spawn_fake(fake_router(seen.clone())).await;

        client.delete::<Note>("user-token", "n1").await.unwrap();
        assert_eq!(seen.lock().unwrap()[0], "delete id=eq.n1");
    }

    #[tokio::test]
    async fn test_api_error_message() {
        let client = spawn_fake(fake_router(Seen::default())).await;

        let err = client.list::<Letter>("user-token").await.unwrap_err();
        match err {
            BackendError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "relation \"letters\" does not exist");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_password_sign_in() {
        let client = spawn_fake(fake_router(Seen::default())).await;

        let session = client
            .sign_in_with_password("ben@example.com", "secret")
            .await
            .unwrap();
        assert_eq!(session.access_token, "user-token");
        assert_eq!(session.user.email, "ben@example.com");

        let err = client
            .sign_in_with_password("ben@example.com", "nope")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(!err.is_auth());
    }

    #[test]
    fn test_public_url() {
        let client = BackendClient::new(BackendConfig::new("https://abc.supabase.co", "k")).unwrap();
        assert_eq!(
            client.public_url("1700-ab.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/memories/1700-ab.jpg"
        );
    }
}
