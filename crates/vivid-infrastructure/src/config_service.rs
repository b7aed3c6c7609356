//! Client configuration loading.
//!
//! Resolution order for the posts/users base URL:
//! 1. `VIVID_API_URL` environment variable
//! 2. `[api] base_url` in config.toml
//! 3. `http://localhost:8080`
//!
//! The comments base URL is read only from `[comments] base_url`; when absent it
//! follows the resolved posts/users URL.

use crate::paths::VividPaths;
use crate::storage::AtomicTomlFile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vivid_core::config::{ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_AUTHOR_USER_ID};
use vivid_core::error::{ClientError, Result};

/// Environment variable overriding the posts/users base URL.
pub const API_URL_ENV: &str = "VIVID_API_URL";

/// On-disk shape of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: Option<ApiSection>,
    #[serde(default)]
    pub comments: Option<CommentsSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub author_user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentsSection {
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Loads [`ClientConfig`] from config.toml and the environment.
pub struct ConfigService {
    file: AtomicTomlFile<ConfigFile>,
}

impl ConfigService {
    pub fn new(paths: &VividPaths) -> Self {
        Self {
            file: AtomicTomlFile::new(paths.config_file()),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    /// Reads config.toml and applies the environment override.
    ///
    /// A missing file yields the defaults; an unparseable one is an error.
    pub fn load(&self) -> Result<ClientConfig> {
        let file = self
            .file
            .load()
            .map_err(|e| {
                ClientError::config(format!(
                    "Failed to read {}: {}",
                    self.file.path().display(),
                    e
                ))
            })?
            .unwrap_or_default();

        Ok(resolve(file, std::env::var(API_URL_ENV).ok()))
    }
}

/// Merges file contents with the environment override.
pub fn resolve(file: ConfigFile, env_api_url: Option<String>) -> ClientConfig {
    let api = file.api.unwrap_or_default();

    let api_base_url = env_api_url
        .filter(|url| !url.trim().is_empty())
        .or(api.base_url)
        .map(|url| normalize_base_url(&url))
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let comments_base_url = file
        .comments
        .and_then(|c| c.base_url)
        .map(|url| normalize_base_url(&url))
        .unwrap_or_else(|| api_base_url.clone());

    let author_user_id = api
        .author_user_id
        .unwrap_or_else(|| DEFAULT_AUTHOR_USER_ID.to_string());

    let config = ClientConfig {
        api_base_url,
        comments_base_url,
        author_user_id,
    };

    if !config.base_urls_agree() {
        tracing::warn!(
            "[Config] Comments base URL {} differs from API base URL {}",
            config.comments_base_url,
            config.api_base_url
        );
    }

    config
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
