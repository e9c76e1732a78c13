//! # Signed-in user
//!
//! Two representations of one of the two partners:
//!
//! ## [`AuthUser`] (server only)
//!
//! The user object returned by the auth API (`/auth/v1/user` and inside token
//! responses): the backend-generated `id`, the login `email`, and free-form
//! `user_metadata` from which an optional display `name` is read.
//!
//! ## [`UserInfo`]
//!
//! The client-safe projection sent to the views. [`UserInfo::display_name`]
//! falls back to the email address when no name is set.

use serde::{Deserialize, Serialize};

/// User object as returned by the auth API.
#[cfg(feature = "server")]
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Map<String, serde_json::Value>,
}

#[cfg(feature = "server")]
impl AuthUser {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone().unwrap_or_default(),
            name: self
                .user_metadata
                .get("name")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl UserInfo {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user = UserInfo {
            id: "u1".to_string(),
            email: "ben@example.com".to_string(),
            name: None,
        };
        assert_eq!(user.display_name(), "ben@example.com");
        user.name = Some("Ben".to_string());
        assert_eq!(user.display_name(), "Ben");
    }

    #[cfg(feature = "server")]
    #[test]
    fn test_auth_user_reads_metadata_name() {
        let user: AuthUser = serde_json::from_str(
            r#"{"id":"u2","email":"trizah@example.com","user_metadata":{"name":"Trizah"}}"#,
        )
        .unwrap();
        let info = user.to_info();
        assert_eq!(info.name.as_deref(), Some("Trizah"));
        assert_eq!(info.email, "trizah@example.com");
    }
}
