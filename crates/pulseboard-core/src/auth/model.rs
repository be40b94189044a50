//! User and credential domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An authenticated user as issued by the auth data source.
///
/// Immutable for the lifetime of a session. Persisted to durable storage as
/// camelCase JSON under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display name
    pub name: String,
    /// Role shown under the name (e.g. "Administrator")
    pub role: String,
    /// Initials used when no avatar image is available
    pub avatar_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub email: String,
}

/// A username/password pair submitted by the login view.
///
/// The stores never inspect these values; validation belongs to the
/// [`AuthService`](super::AuthService).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful authentication result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGrant {
    pub user: User,
    /// Opaque session token
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            name: "Jane Pearson".to_string(),
            role: "Administrator".to_string(),
            avatar_label: "JP".to_string(),
            avatar_url: Some("https://i.pravatar.cc/150?img=12".to_string()),
            email: "jane.pearson@example.com".to_string(),
        }
    }

    #[test]
    fn test_user_json_round_trip() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"avatarLabel\":\"JP\""));

        let restored: User = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, user);
    }

    #[test]
    fn test_user_without_avatar_url() {
        let json = r#"{"name":"A","role":"B","avatarLabel":"AB","email":"a@b.c"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.avatar_url.is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("admin", "admin123");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("admin123"));
    }
}
