//! Infrastructure for the Vivid client: session persistence, configuration
//! loading and the HTTP gateway to the blog backend.

pub mod config_service;
pub mod file_session_store;
pub mod http_gateway;
pub mod memory_session_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_session_store::FileSessionStore;
pub use crate::http_gateway::HttpContentGateway;
pub use crate::memory_session_store::InMemorySessionStore;
