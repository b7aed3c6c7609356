//! Contract for the remote content service.
//!
//! The backend is reached only through this trait. Implementations are
//! stateless request/response wrappers: one attempt per call, no retries,
//! bearer credential attached whenever the session holds a token.

use crate::comment::CommentRecord;
use crate::post::{NewPost, PostRecord};
use crate::user::UserRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Classified outcome of a failed remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// HTTP 409 on user creation.
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// HTTP 401: token missing, expired or invalid.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// HTTP 403: authenticated but not the resource owner.
    #[error("Forbidden")]
    Forbidden,

    /// HTTP 404.
    #[error("Not found")]
    NotFound,

    /// Any other non-2xx status, with the backend's `message` when it sent one.
    #[error("Request failed with status {status}")]
    RequestFailed { status: u16, message: Option<String> },

    /// Network failure, or a body that is not the JSON the call expects.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl GatewayError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

/// A type alias for `Result<T, GatewayError>`.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Remote user/post/comment endpoints.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// `GET /users`
    async fn list_users(&self) -> GatewayResult<Vec<UserRecord>>;

    /// `POST /users`. A 409 is reported as [`GatewayError::EmailAlreadyRegistered`].
    async fn create_user(&self, email: &str, password: &str) -> GatewayResult<UserRecord>;

    /// `GET /posts`
    async fn list_posts(&self) -> GatewayResult<Vec<PostRecord>>;

    /// `POST /posts`
    async fn create_post(&self, post: &NewPost) -> GatewayResult<PostRecord>;

    /// `GET /posts/{id}`. A 404 is reported as [`GatewayError::NotFound`].
    async fn get_post(&self, id: &str) -> GatewayResult<PostRecord>;

    /// `GET /comments/post/{post_id}`
    async fn list_comments_for_post(&self, post_id: &str) -> GatewayResult<Vec<CommentRecord>>;

    /// `POST /comments`
    async fn create_comment(&self, post_id: &str, content: &str) -> GatewayResult<()>;

    /// `PUT /comments/{id}`
    async fn update_comment(&self, id: &str, content: &str) -> GatewayResult<()>;

    /// `DELETE /comments/{id}`
    async fn delete_comment(&self, id: &str) -> GatewayResult<()>;
}
