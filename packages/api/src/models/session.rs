//! Backend auth tokens as kept in the server-side session.

use serde::{Deserialize, Serialize};

use super::user::{AuthUser, UserInfo};

/// Refresh this many seconds before the access token actually expires.
const EXPIRY_LEEWAY_SECS: i64 = 60;

/// Token grant response from `/auth/v1/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

/// A signed-in session. Never sent to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds.
    pub expires_at: i64,
    pub user: UserInfo,
}

impl AuthSession {
    pub fn from_token(token: TokenResponse, now: i64) -> Self {
        Self {
            expires_at: token.expires_at.unwrap_or(now + token.expires_in),
            user: token.user.to_info(),
            access_token: token.access_token,
            refresh_token: token.refresh_token,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now + EXPIRY_LEEWAY_SECS >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_at: Option<i64>) -> TokenResponse {
        serde_json::from_value(serde_json::json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 3600,
            "expires_at": expires_at,
            "token_type": "bearer",
            "user": { "id": "u1", "email": "ben@example.com" }
        }))
        .unwrap()
    }

    #[test]
    fn test_expiry_from_expires_in() {
        let session = AuthSession::from_token(token(None), 1_000);
        assert_eq!(session.expires_at, 4_600);
        assert_eq!(session.user.id, "u1");
        assert!(!session.is_expired(1_000));
        assert!(session.is_expired(4_540));
        assert!(session.is_expired(5_000));
    }

    #[test]
    fn test_expiry_prefers_expires_at() {
        let session = AuthSession::from_token(token(Some(9_999)), 1_000);
        assert_eq!(session.expires_at, 9_999);
    }
}
