//! Backend endpoint configuration from environment variables.

use super::BackendError;

const DEFAULT_BUCKET: &str = "memories";

/// Endpoint, public key and image bucket of the hosted backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Base URL without a trailing slash: `https://abc.supabase.co`.
    pub url: String,
    pub anon_key: String,
    pub bucket: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Read the config from environment variables.
    pub fn from_env() -> Result<Self, BackendError> {
        dotenvy::dotenv().ok();

        let url = std::env::var("SUPABASE_URL").map_err(|_| BackendError::MissingEnv("SUPABASE_URL"))?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| BackendError::MissingEnv("SUPABASE_ANON_KEY"))?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(BackendError::InvalidUrl(url));
        }

        let config = Self::new(url, anon_key);
        Ok(match std::env::var("MEMORIES_BUCKET") {
            Ok(bucket) if !bucket.trim().is_empty() => config.with_bucket(bucket.trim()),
            _ => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_dropped() {
        let config = BackendConfig::new("https://abc.supabase.co/", "key");
        assert_eq!(config.url, "https://abc.supabase.co");
        assert_eq!(config.bucket, "memories");
        assert_eq!(config.with_bucket("photos").bucket, "photos");
    }
}
