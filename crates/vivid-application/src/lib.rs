//! Application layer for the Vivid client.
//!
//! Controllers own the client's in-memory state and coordinate the session
//! store with the content gateway:
//!
//! - [`AuthSessionController`]: login, signup, logout
//! - [`PostCollectionController`]: post list, optimistic creation, search
//! - [`CommentThreadController`]: one post's comments with ownership-gated edits
//!
//! Every remote failure is converted to a [`vivid_core::ClientError`] before it
//! leaves a controller, and local collections keep their last-known-good state
//! when a remote call fails.

pub mod auth_controller;
pub mod comment_controller;
pub mod post_controller;

#[cfg(test)]
mod test_support;

pub use auth_controller::{AuthSessionController, AuthState, DemoCredentials};
pub use comment_controller::{CommentThreadController, Confirmation, DeleteOutcome, EditCursor};
pub use post_controller::PostCollectionController;
