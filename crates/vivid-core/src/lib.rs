//! Core domain for the Vivid blog client.
//!
//! This crate holds the models, contracts and error taxonomy shared by the
//! infrastructure and application layers. It performs no I/O.

pub mod comment;
pub mod config;
pub mod error;
pub mod gateway;
pub mod post;
pub mod session;
pub mod user;

mod wire;

pub use error::{ClientError, Result};
pub use gateway::{ContentGateway, GatewayError, GatewayResult};
