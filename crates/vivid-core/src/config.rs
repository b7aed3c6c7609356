//! Client configuration model.

use serde::{Deserialize, Serialize};

/// Base URL used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Backend user id new posts are attributed to when nothing is configured.
pub const DEFAULT_AUTHOR_USER_ID: &str = "1";

/// Resolved client configuration.
///
/// The posts/users base URL and the comments base URL come from different
/// sources and must point at the same backend in a correct deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub comments_base_url: String,
    pub author_user_id: String,
}

impl ClientConfig {
    /// True when both base URLs resolve to the same backend.
    pub fn base_urls_agree(&self) -> bool {
        self.api_base_url == self.comments_base_url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            comments_base_url: DEFAULT_API_BASE_URL.to_string(),
            author_user_id: DEFAULT_AUTHOR_USER_ID.to_string(),
        }
    }
}
