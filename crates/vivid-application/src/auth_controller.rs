//! Login, signup and logout orchestration.
//!
//! The backend has no authenticate-by-credential endpoint, so login fetches
//! the whole user list and matches the credentials locally. That exposes every
//! user's record to the client; a `/login` endpoint returning a token would
//! remove the need for it.

use std::sync::Arc;
use uuid::Uuid;
use vivid_core::error::{ClientError, Result};
use vivid_core::gateway::ContentGateway;
use vivid_core::session::{Session, SessionStore};
use vivid_core::user::{UserProfile, UserRecord, greeting};

/// Built-in demo account accepted even when the user list is empty or
/// unreachable.
pub const DEMO_EMAIL: &str = "demo@vivid.blog";
pub const DEMO_PASSWORD: &str = "demo1234";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Fallback credential pair checked after the user list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCredentials {
    pub email: String,
    pub password: String,
}

impl DemoCredentials {
    fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

impl Default for DemoCredentials {
    fn default() -> Self {
        Self {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        }
    }
}

/// Drives the session through Anonymous → Authenticating → Authenticated.
///
/// This controller does not own post or comment collections. After
/// [`logout`](Self::logout) the caller must discard or re-fetch them.
pub struct AuthSessionController {
    gateway: Arc<dyn ContentGateway>,
    store: Arc<dyn SessionStore>,
    demo: DemoCredentials,
    state: AuthState,
}

impl AuthSessionController {
    /// Creates the controller, restoring a persisted session if there is one.
    pub fn new(gateway: Arc<dyn ContentGateway>, store: Arc<dyn SessionStore>) -> Self {
        let state = if store.load().is_active() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        };

        Self {
            gateway,
            store,
            demo: DemoCredentials::default(),
            state,
        }
    }

    pub fn with_demo_credentials(mut self, demo: DemoCredentials) -> Self {
        self.demo = demo;
        self
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn session(&self) -> Session {
        self.store.load()
    }

    /// Matches the credentials against the backend's user list.
    ///
    /// Email comparison ignores case; the password must match exactly. Both are
    /// trimmed first. The demo pair is accepted when nothing matches, including
    /// when the user list cannot be fetched.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();
        let password = password.trim();
        self.state = AuthState::Authenticating;

        let matched = self
            .gateway
            .list_users()
            .await
            .map(|users| users.into_iter().find(|u| u.matches_credentials(email, password)));

        let token = match matched {
            Ok(Some(user)) => issued_or_local_token(&user),
            Ok(None) if self.demo.matches(email, password) => local_token(),
            Ok(None) => {
                tracing::info!("[Auth] Login rejected: no matching user");
                self.reset_to_anonymous();
                return Err(ClientError::InvalidCredentials);
            }
            Err(e) if self.demo.matches(email, password) => {
                tracing::warn!("[Auth] User list unavailable ({}), accepting demo account", e);
                local_token()
            }
            Err(e) => {
                tracing::warn!("[Auth] Login unavailable: {}", e);
                self.reset_to_anonymous();
                return Err(ClientError::LoginUnavailable);
            }
        };

        self.establish(&token, email)
    }

    /// Registers a new user and signs in as them without calling `login`.
    pub async fn signup(&mut self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ClientError::MissingFields);
        }

        let previous = self.state;
        self.state = AuthState::Authenticating;

        match self.gateway.create_user(email, password).await {
            Ok(created) => {
                let identity = created
                    .email
                    .clone()
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| email.to_string());
                let token = issued_or_local_token(&created);
                self.establish(&token, &identity)
            }
            Err(e) => {
                tracing::info!("[Auth] Signup failed: {}", e);
                self.state = previous;
                Err(ClientError::from(e))
            }
        }
    }

    /// Ends the session and clears everything persisted for it.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        self.state = AuthState::Anonymous;
        tracing::info!("[Auth] Logged out");
        Ok(())
    }

    /// Number of users the backend reports.
    pub async fn registered_user_count(&self) -> Result<usize> {
        let users = self.gateway.list_users().await?;
        Ok(users.len())
    }

    pub fn profile(&self) -> UserProfile {
        self.store.load_profile()
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.store.save_profile(profile)
    }

    /// Greeting for the current session, preferring the profile's first name.
    pub fn greeting(&self) -> String {
        greeting(&self.store.load_profile(), &self.store.load())
    }

    fn establish(&mut self, token: &str, identity: &str) -> Result<Session> {
        if let Err(e) = self.store.save(token, identity) {
            self.state = AuthState::Anonymous;
            return Err(e);
        }

        self.state = AuthState::Authenticated;
        tracing::info!("[Auth] Signed in as {}", identity);
        Ok(self.store.load())
    }

    fn reset_to_anonymous(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("[Auth] Failed to clear previous session: {}", e);
        }
        self.state = AuthState::Anonymous;
    }
}

fn issued_or_local_token(user: &UserRecord) -> String {
    user.issued_token()
        .map(str::to_string)
        .unwrap_or_else(local_token)
}

/// Opaque token for sessions the backend did not issue one for. The backend
/// rejects it with 401, which surfaces as `SessionExpired`.
fn local_token() -> String {
    format!("local-{}", Uuid::new_v4())
}
