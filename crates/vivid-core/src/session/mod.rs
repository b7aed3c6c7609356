//! Session domain module.
//!
//! - `model`: the client's belief about who is logged in
//! - `store`: persistence contract for that belief

mod model;
mod store;

pub use model::Session;
pub use store::SessionStore;
