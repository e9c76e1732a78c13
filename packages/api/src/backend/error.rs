use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0} not set")]
    MissingEnv(&'static str),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Backend returned no row")]
    EmptyResponse,

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error(transparent)]
    Invalid(#[from] store::ValidationError),
}

impl BackendError {
    /// Whether the backend rejected the caller's credentials.
    pub fn is_auth(&self) -> bool {
        match self {
            BackendError::Unauthenticated => true,
            BackendError::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Whether the backend answered and refused the request, as opposed to
    /// the request never completing.
    pub fn is_rejection(&self) -> bool {
        matches!(self, BackendError::Api { status, .. } if (400..500).contains(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_is_client_error_only() {
        let api = |status| BackendError::Api {
            status,
            message: String::new(),
        };
        assert!(api(400).is_rejection());
        assert!(api(401).is_rejection());
        assert!(!api(500).is_rejection());
        assert!(!api(503).is_rejection());
        assert!(!BackendError::EmptyResponse.is_rejection());
    }
}
