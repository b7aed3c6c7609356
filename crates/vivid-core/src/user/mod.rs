//! User domain module.
//!
//! - `model`: wire records for backend users and the local greeting profile

mod model;

pub use model::{UserProfile, UserRecord, UserRef, greeting};
