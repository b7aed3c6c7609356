//! Post domain module.
//!
//! - `model`: local post model, wire record, creation payload and search

mod model;

pub use model::{DEFAULT_AUTHOR, NewPost, Post, PostRecord, UNTITLED, parse_tags};
