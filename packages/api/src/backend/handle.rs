//! Shared backend client using the OnceCell pattern.

use tokio::sync::OnceCell;

use super::{BackendClient, BackendConfig, BackendError};

static BACKEND: OnceCell<BackendClient> = OnceCell::const_new();

/// Get or initialize the shared backend client.
/// Uses SUPABASE_URL and SUPABASE_ANON_KEY from the environment.
pub async fn get_backend() -> Result<&'static BackendClient, BackendError> {
    BACKEND
        .get_or_try_init(|| async { BackendClient::new(BackendConfig::from_env()?) })
        .await
}
