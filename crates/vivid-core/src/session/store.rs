//! Session store trait.

use super::model::Session;
use crate::error::Result;
use crate::user::UserProfile;

/// Persists the current session across process restarts.
///
/// # Implementation Notes
///
/// - `load` never fails: missing or malformed data yields [`Session::empty`].
/// - `save` must be atomic from a reader's perspective; a token is never
///   observable without its identity or vice versa.
/// - `clear` is idempotent.
pub trait SessionStore: Send + Sync {
    /// Returns the persisted session, or the empty session.
    fn load(&self) -> Session;

    /// Persists token and identity together.
    fn save(&self, token: &str, identity: &str) -> Result<()>;

    /// Removes every persisted session field.
    fn clear(&self) -> Result<()>;

    /// Returns the greeting profile, or the default profile.
    fn load_profile(&self) -> UserProfile;

    /// Persists the greeting profile. The profile is independent of the session
    /// and survives `clear`.
    fn save_profile(&self, profile: &UserProfile) -> Result<()>;
}
