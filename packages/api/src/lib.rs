//! # API crate — shared fullstack server functions for Memory Vault
//!
//! This crate defines every Dioxus server function the views call, along with
//! the supporting modules they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | Backend auth tokens kept in the server-side session, with refresh |
//! | [`backend`] | `server` | REST, storage and auth client for the hosted backend (lazy `OnceCell` singleton) |
//! | [`gate`] | — | Which page paths need a signed-in user, shared by middleware and app shell |
//! | [`models`] | — | Token/session models and the client-safe [`UserInfo`] |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub.
//!
//! - **Authentication**: `get_current_user`, `sign_in`, `sign_out`
//! - **Timeline**: `list_milestones`, `create_milestone`, `delete_milestone`
//! - **Gallery**: `list_memories`, `upload_memory`, `delete_memory`
//! - **Notes**: `list_notes`, `create_note`, `delete_note`
//! - **Letters**: `list_letters`, `create_letter`, `delete_letter`
//! - **Playlist**: `list_songs`, `create_song`, `delete_song`
//! - **Config**: `get_journal_config`
//!
//! Every record operation runs with the signed-in user's access token, and
//! creates stamp the draft with that user's id before inserting.

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod backend;
pub mod gate;
pub mod models;

pub use dioxus::fullstack::FileStream;
pub use models::UserInfo;
pub use store::{
    JournalConfig, Letter, Memory, Milestone, NewLetter, NewMemory, NewMilestone, NewNote,
    NewSong, Note, Song,
};

#[cfg(feature = "server")]
use store::{Draft, Record};

/// Environment variable naming the journal config file.
#[cfg(feature = "server")]
const JOURNAL_CONFIG_ENV: &str = "JOURNAL_CONFIG";

#[cfg(feature = "server")]
async fn list_records<R: Record>(session: &tower_sessions::Session) -> Result<Vec<R>, ServerFnError> {
    let backend = backend::get_backend()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let auth = auth::require_session(session, backend)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    backend.list::<R>(&auth.access_token).await.map_err(|e| {
        tracing::warn!(table = R::TABLE, "list failed: {}", e);
        ServerFnError::new(e.to_string())
    })
}

#[cfg(feature = "server")]
async fn create_record<R: Record>(
    session: &tower_sessions::Session,
    draft: R::Draft,
) -> Result<R, ServerFnError> {
    draft.validate().map_err(|e| ServerFnError::new(e.to_string()))?;

    let backend = backend::get_backend()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let auth = auth::require_session(session, backend)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let draft = draft.with_owner(auth.user.id.clone());
    let record = backend
        .insert::<R>(&auth.access_token, &draft)
        .await
        .map_err(|e| {
            tracing::warn!(table = R::TABLE, "insert failed: {}", e);
            ServerFnError::new(e.to_string())
        })?;

    tracing::info!(table = R::TABLE, id = record.id(), user_id = %auth.user.id, "record created");
    Ok(record)
}

#[cfg(feature = "server")]
async fn delete_record<R: Record>(
    session: &tower_sessions::Session,
    id: &str,
) -> Result<(), ServerFnError> {
    let backend = backend::get_backend()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let auth = auth::require_session(session, backend)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    backend.delete::<R>(&auth.access_token, id).await.map_err(|e| {
        tracing::warn!(table = R::TABLE, id, "delete failed: {}", e);
        ServerFnError::new(e.to_string())
    })
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    let backend = backend::get_backend()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let auth = auth::current_session(&session, backend)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(auth.map(|a| a.user))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Sign in with email and password against the backend's auth service.
#[cfg(feature = "server")]
#[post("/api/auth/sign-in", session: tower_sessions::Session)]
pub async fn sign_in(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.is_empty() {
        return Err(ServerFnError::new("Email and password are required"));
    }

    let backend = backend::get_backend()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let auth = backend
        .sign_in_with_password(&email, &password)
        .await
        .map_err(|e| {
            tracing::info!("sign-in rejected: {}", e);
            ServerFnError::new(e.to_string())
        })?;

    // New session id on sign-in.
    session
        .cycle_id()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    auth::store_session(&session, &auth)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(user_id = %auth.user.id, "signed in");
    Ok(auth.user)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-in")]
pub async fn sign_in(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Sign out: revoke the backend session (best effort) and clear the cookie session.
#[cfg(feature = "server")]
#[post("/api/auth/sign-out", session: tower_sessions::Session)]
pub async fn sign_out() -> Result<(), ServerFnError> {
    let stored: Option<models::AuthSession> = session
        .get(auth::SESSION_AUTH_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if let Some(auth) = stored {
        match backend::get_backend().await {
            Ok(backend) => {
                if let Err(e) = backend.sign_out(&auth.access_token).await {
                    tracing::warn!(user_id = %auth.user.id, "backend sign-out failed: {}", e);
                }
            }
            Err(e) => tracing::warn!("backend unavailable during sign-out: {}", e),
        }
    }

    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-out")]
pub async fn sign_out() -> Result<(), ServerFnError> {
    Ok(())
}

/// Milestones, oldest first.
#[cfg(feature = "server")]
#[get("/api/milestones", session: tower_sessions::Session)]
pub async fn list_milestones() -> Result<Vec<Milestone>, ServerFnError> {
    list_records(&session).await
}

#[cfg(not(feature = "server"))]
#[get("/api/milestones")]
pub async fn list_milestones() -> Result<Vec<Milestone>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/milestones", session: tower_sessions::Session)]
pub async fn create_milestone(draft: NewMilestone) -> Result<Milestone, ServerFnError> {
    create_record(&session, draft).await
}

#[cfg(not(feature = "server"))]
#[post("/api/milestones")]
pub async fn create_milestone(draft: NewMilestone) -> Result<Milestone, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/milestones/delete", session: tower_sessions::Session)]
pub async fn delete_milestone(id: String) -> Result<(), ServerFnError> {
    delete_record::<Milestone>(&session, &id).await
}

#[cfg(not(feature = "server"))]
#[post("/api/milestones/delete")]
pub async fn delete_milestone(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Photo memories, newest first.
#[cfg(feature = "server")]
#[get("/api/memories", session: tower_sessions::Session)]
pub async fn list_memories() -> Result<Vec<Memory>, ServerFnError> {
    list_records(&session).await
}

#[cfg(not(feature = "server"))]
#[get("/api/memories")]
pub async fn list_memories() -> Result<Vec<Memory>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Largest image accepted by [`upload_memory`].
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

/// Upload an image to the bucket, then insert a memory pointing at its public URL.
///
/// The image is streamed as the raw request body with the caption in the
/// query string. If the insert fails the uploaded object is removed again.
#[cfg(feature = "server")]
#[post("/api/memories?caption", session: tower_sessions::Session)]
pub async fn upload_memory(caption: String, image: FileStream) -> Result<Memory, ServerFnError> {
    use rand::distributions::Uniform;
    use rand::Rng;

    let backend = backend::get_backend()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let auth = auth::require_session(&session, backend)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let file_name = image.file_name().to_string();
    let content_type = image
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = read_image(image).await?;

    const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let nonce: String = rand::thread_rng()
        .sample_iter(Uniform::from(0..BASE36.len()))
        .take(8)
        .map(|i| BASE36[i] as char)
        .collect();
    let key = store::models::object_key(&file_name, chrono::Utc::now().timestamp_millis(), &nonce);

    let size = bytes.len();
    backend
        .upload(&auth.access_token, &key, &content_type, bytes)
        .await
        .map_err(|e| {
            tracing::warn!(key = %key, "upload failed: {}", e);
            ServerFnError::new(e.to_string())
        })?;
    tracing::debug!(key = %key, size, "image uploaded");

    let draft = NewMemory {
        image_url: backend.public_url(&key),
        caption: caption.trim().to_string(),
        user_id: None,
    };
    match create_record::<Memory>(&session, draft).await {
        Ok(memory) => Ok(memory),
        Err(e) => {
            if let Err(cleanup) = backend.remove_object(&auth.access_token, &key).await {
                tracing::warn!(key = %key, "orphaned upload not removed: {}", cleanup);
            }
            Err(e)
        }
    }
}

#[cfg(not(feature = "server"))]
#[post("/api/memories?caption")]
pub async fn upload_memory(caption: String, image: FileStream) -> Result<Memory, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Collect an uploaded image, refusing empty bodies and anything over
/// [`MAX_IMAGE_BYTES`].
#[cfg(feature = "server")]
async fn read_image(mut image: FileStream) -> Result<Vec<u8>, ServerFnError> {
    use futures::StreamExt;

    let hint = image.size().unwrap_or(0).min(MAX_IMAGE_BYTES as u64) as usize;
    let mut bytes = Vec::with_capacity(hint);
    while let Some(chunk) = image.next().await {
        let chunk = chunk.map_err(|e| ServerFnError::new(e.to_string()))?;
        if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
            return Err(ServerFnError::new("image is larger than 20 MB"));
        }
        bytes.extend_from_slice(&chunk);
    }
    if bytes.is_empty() {
        return Err(ServerFnError::new("image is required"));
    }
    Ok(bytes)
}

/// Delete a memory's storage object, then its row.
///
/// A storage failure is logged and does not keep the row.
#[cfg(feature = "server")]
#[post("/api/memories/delete", session: tower_sessions::Session)]
pub async fn delete_memory(id: String, image_url: String) -> Result<(), ServerFnError> {
    if let Some(key) = store::models::object_key_from_url(&image_url) {
        let backend = backend::get_backend()
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;
        let auth = auth::require_session(&session, backend)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;
        if let Err(e) = backend.remove_object(&auth.access_token, key).await {
            tracing::warn!(key, "image object not removed: {}", e);
        }
    }

    delete_record::<Memory>(&session, &id).await
}

#[cfg(not(feature = "server"))]
#[post("/api/memories/delete")]
pub async fn delete_memory(id: String, image_url: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Notes, newest first.
#[cfg(feature = "server")]
#[get("/api/notes", session: tower_sessions::Session)]
pub async fn list_notes() -> Result<Vec<Note>, ServerFnError> {
    list_records(&session).await
}

#[cfg(not(feature = "server"))]
#[get("/api/notes")]
pub async fn list_notes() -> Result<Vec<Note>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/notes", session: tower_sessions::Session)]
pub async fn create_note(draft: NewNote) -> Result<Note, ServerFnError> {
    create_record(&session, draft).await
}

#[cfg(not(feature = "server"))]
#[post("/api/notes")]
pub async fn create_note(draft: NewNote) -> Result<Note, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/notes/delete", session: tower_sessions::Session)]
pub async fn delete_note(id: String) -> Result<(), ServerFnError> {
    delete_record::<Note>(&session, &id).await
}

#[cfg(not(feature = "server"))]
#[post("/api/notes/delete")]
pub async fn delete_note(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Open-when letters, newest first.
#[cfg(feature = "server")]
#[get("/api/letters", session: tower_sessions::Session)]
pub async fn list_letters() -> Result<Vec<Letter>, ServerFnError> {
    list_records(&session).await
}

#[cfg(not(feature = "server"))]
#[get("/api/letters")]
pub async fn list_letters() -> Result<Vec<Letter>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/letters", session: tower_sessions::Session)]
pub async fn create_letter(draft: NewLetter) -> Result<Letter, ServerFnError> {
    create_record(&session, draft).await
}

#[cfg(not(feature = "server"))]
#[post("/api/letters")]
pub async fn create_letter(draft: NewLetter) -> Result<Letter, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/letters/delete", session: tower_sessions::Session)]
pub async fn delete_letter(id: String) -> Result<(), ServerFnError> {
    delete_record::<Letter>(&session, &id).await
}

#[cfg(not(feature = "server"))]
#[post("/api/letters/delete")]
pub async fn delete_letter(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Playlist songs, newest first.
#[cfg(feature = "server")]
#[get("/api/songs", session: tower_sessions::Session)]
pub async fn list_songs() -> Result<Vec<Song>, ServerFnError> {
    list_records(&session).await
}

#[cfg(not(feature = "server"))]
#[get("/api/songs")]
pub async fn list_songs() -> Result<Vec<Song>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/songs", session: tower_sessions::Session)]
pub async fn create_song(draft: NewSong) -> Result<Song, ServerFnError> {
    create_record(&session, draft).await
}

#[cfg(not(feature = "server"))]
#[post("/api/songs")]
pub async fn create_song(draft: NewSong) -> Result<Song, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/songs/delete", session: tower_sessions::Session)]
pub async fn delete_song(id: String) -> Result<(), ServerFnError> {
    delete_record::<Song>(&session, &id).await
}

#[cfg(not(feature = "server"))]
#[post("/api/songs/delete")]
pub async fn delete_song(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Read the journal config (`journal.toml`, or the file named by `JOURNAL_CONFIG`).
///
/// A missing file yields the defaults; a malformed one is an error.
#[cfg(feature = "server")]
#[get("/api/config")]
pub async fn get_journal_config() -> Result<JournalConfig, ServerFnError> {
    let path = std::env::var(JOURNAL_CONFIG_ENV).unwrap_or_else(|_| JournalConfig::filename().to_string());

    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "no journal config, using defaults");
            return Ok(JournalConfig::default());
        }
        Err(e) => return Err(ServerFnError::new(e.to_string())),
    };

    JournalConfig::from_toml(&text).map_err(|e| {
        tracing::warn!(path = %path, "invalid journal config: {}", e);
        ServerFnError::new(e.to_string())
    })
}

#[cfg(not(feature = "server"))]
#[get("/api/config")]
pub async fn get_journal_config() -> Result<JournalConfig, ServerFnError> {
    Ok(JournalConfig::default())
}
