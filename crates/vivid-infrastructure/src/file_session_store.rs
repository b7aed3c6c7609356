//! File-backed session store.
//!
//! Token and identity are written to one TOML document in a single atomic
//! replace, so they can never be observed apart.

use crate::paths::VividPaths;
use crate::storage::{AtomicTomlError, AtomicTomlFile};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use vivid_core::error::{ClientError, Result};
use vivid_core::session::{Session, SessionStore};
use vivid_core::user::UserProfile;

/// On-disk shape of `session.toml`. Both fields are required; a document
/// missing either one is treated as malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    identity: String,
}

/// Session store persisting to `session.toml` and `profile.toml`.
///
/// The loaded session is cached behind an `RwLock`; `save` and `clear` update
/// the cache after the file operation succeeds.
pub struct FileSessionStore {
    session_file: AtomicTomlFile<PersistedSession>,
    profile_file: AtomicTomlFile<UserProfile>,
    cached: RwLock<Option<Session>>,
}

impl FileSessionStore {
    pub fn new(paths: &VividPaths) -> Self {
        Self {
            session_file: AtomicTomlFile::new(paths.session_file()),
            profile_file: AtomicTomlFile::new(paths.profile_file()),
            cached: RwLock::new(None),
        }
    }

    fn read_from_disk(&self) -> Session {
        match self.session_file.load() {
            Ok(Some(persisted)) if !persisted.token.is_empty() => {
                Session::authenticated(persisted.token, persisted.identity)
            }
            Ok(Some(_)) => {
                tracing::warn!(
                    "[SessionStore] Ignoring session with empty token at {}",
                    self.session_file.path().display()
                );
                Session::empty()
            }
            Ok(None) => Session::empty(),
            Err(e) => {
                tracing::warn!(
                    "[SessionStore] Treating unreadable session file {} as empty: {}",
                    self.session_file.path().display(),
                    e
                );
                Session::empty()
            }
        }
    }

    fn set_cache(&self, session: Session) {
        let mut write_lock = self.cached.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(session);
    }
}

fn storage_error(e: AtomicTomlError) -> ClientError {
    ClientError::storage(e.to_string())
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Session {
        {
            let read_lock = self.cached.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.read_from_disk();
        self.set_cache(loaded.clone());
        loaded
    }

    fn save(&self, token: &str, identity: &str) -> Result<()> {
        if token.is_empty() {
            return Err(ClientError::storage("Refusing to persist an empty token"));
        }

        let persisted = PersistedSession {
            token: token.to_string(),
            identity: identity.to_string(),
        };
        self.session_file.save(&persisted).map_err(storage_error)?;
        self.set_cache(Session::authenticated(token, identity));

        tracing::debug!("[SessionStore] Session persisted for {}", identity);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.session_file.remove().map_err(storage_error)?;
        self.set_cache(Session::empty());

        tracing::debug!("[SessionStore] Session cleared");
        Ok(())
    }

    fn load_profile(&self) -> UserProfile {
        match self.profile_file.load() {
            Ok(profile) => profile.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("[SessionStore] Ignoring unreadable profile: {}", e);
                UserProfile::default()
            }
        }
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.profile_file.save(profile).map_err(storage_error)
    }
}
