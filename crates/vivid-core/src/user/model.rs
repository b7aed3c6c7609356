//! User records and the local profile.

use crate::session::Session;
use crate::wire::{flexible_id, lenient_string};
use serde::{Deserialize, Serialize};

/// A user as returned by `GET /users` and `POST /users`.
///
/// The listing endpoint exposes passwords; the login flow depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl UserRecord {
    /// Case-insensitive email comparison with an exact password match.
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        let email_matches = self
            .email
            .as_deref()
            .is_some_and(|e| e.to_lowercase() == email.to_lowercase());
        email_matches && self.password.as_deref() == Some(password)
    }

    /// Bearer token issued by the backend, if the record carries one.
    pub fn issued_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .or(self.access_token.as_deref())
            .filter(|t| !t.is_empty())
    }
}

/// Nested author/owner reference inside posts and comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default, deserialize_with = "flexible_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

/// Free-text profile used only for greeting text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Greeting line shown after login.
pub fn greeting(profile: &UserProfile, session: &Session) -> String {
    let name = if profile.first_name.trim().is_empty() {
        session.identity.as_deref().unwrap_or_default()
    } else {
        profile.first_name.trim()
    };
    format!("Welcome {} to the blogging site", name)
}
