//! Error types surfaced at the controller boundary.

use crate::gateway::GatewayError;
use thiserror::Error;

/// Every failure a controller reports to the presentation layer.
///
/// Remote failures are always folded into one of these kinds before they leave
/// a controller, so callers never have to deal with transport-level errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Local validation failed; no remote call was attempted.
    #[error("Required fields are missing")]
    MissingFields,

    /// No user matched the submitted email and password.
    #[error("Email or password is incorrect")]
    InvalidCredentials,

    /// Signup rejected because the email is taken (HTTP 409).
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// The user list could not be fetched during login.
    #[error("Login failed: could not contact the server")]
    LoginUnavailable,

    /// The session token is missing, expired or rejected (HTTP 401).
    /// The caller is expected to redirect to the login flow.
    #[error("Session expired, please login again")]
    SessionExpired,

    /// Authenticated, but not the owner of the resource (HTTP 403).
    #[error("You are not the owner of this resource")]
    NotOwner,

    /// The requested resource does not exist (HTTP 404).
    #[error("Resource not found")]
    NotFound,

    /// Creating a post failed remotely.
    #[error("Could not save the post: {0}")]
    CreateFailed(String),

    /// Comment content is empty or there is no session token.
    #[error("Comment content is empty or you are not logged in")]
    MissingContentOrAuth,

    /// The backend answered with an unexpected status.
    #[error("Request failed with status {status}{}", message_suffix(.message))]
    RequestFailed { status: u16, message: Option<String> },

    /// Network failure or an unreadable response body.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Local session persistence failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// True when the presentation layer should send the user back to login.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// True for ownership denials, which are shown inline without a redirect.
    pub fn is_not_owner(&self) -> bool {
        matches!(self, Self::NotOwner)
    }

    /// True when the error was raised before any remote call.
    pub fn is_local_validation(&self) -> bool {
        matches!(self, Self::MissingFields | Self::MissingContentOrAuth)
    }
}

impl From<GatewayError> for ClientError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::EmailAlreadyRegistered => Self::EmailAlreadyRegistered,
            GatewayError::Unauthenticated => Self::SessionExpired,
            GatewayError::Forbidden => Self::NotOwner,
            GatewayError::NotFound => Self::NotFound,
            GatewayError::RequestFailed { status, message } => {
                Self::RequestFailed { status, message }
            }
            GatewayError::Transport(message) => Self::Transport(message),
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// A type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
