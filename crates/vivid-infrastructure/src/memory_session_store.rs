//! In-memory session store for tests and ephemeral runs.

use std::sync::Mutex;
use vivid_core::error::Result;
use vivid_core::session::{Session, SessionStore};
use vivid_core::user::UserProfile;

/// Session store that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: Mutex<Session>,
    profile: Mutex<UserProfile>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an already authenticated session.
    pub fn with_session(token: &str, identity: &str) -> Self {
        Self {
            session: Mutex::new(Session::authenticated(token, identity)),
            profile: Mutex::new(UserProfile::default()),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Session {
        self.session.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, token: &str, identity: &str) -> Result<()> {
        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        *session = Session::authenticated(token, identity);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        *session = Session::empty();
        Ok(())
    }

    fn load_profile(&self) -> UserProfile {
        self.profile.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        let mut current = self.profile.lock().unwrap_or_else(|e| e.into_inner());
        *current = profile.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_clear() {
        let store = InMemorySessionStore::new();
        assert!(!store.load().is_active());

        store.save("tok", "a@x.com").unwrap();
        assert!(store.load().is_active());

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), Session::empty());
    }
}
