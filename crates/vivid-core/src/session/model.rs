//! Session domain model.

use serde::{Deserialize, Serialize};

/// Current authentication token and identity.
///
/// `is_active()` is derived from the token, so a session is active exactly
/// when a token is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub identity: Option<String>,
}

impl Session {
    /// The session at process start, before anything is restored.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A session holding both a token and the identity it belongs to.
    pub fn authenticated(token: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            identity: Some(identity.into()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }
}
