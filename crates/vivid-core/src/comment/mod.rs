//! Comment domain module.
//!
//! - `model`: local comment model, wire record and the ownership predicate

mod model;

pub use model::{Comment, CommentRecord, can_mutate};
