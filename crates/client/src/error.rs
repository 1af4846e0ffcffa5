//! Client-side error taxonomy.
//!
//! Both backends (in-memory and remote HTTP) fold their failures into
//! [`ClientError`] so view controllers branch on one shape. The variants
//! mirror how the UI reacts: `Validation` blocks the mutation before any
//! optimistic write, `NotFound` and `Api` roll an applied one back, and
//! `Network` marks transient transport trouble worth retrying.

use taskdeck_core::CoreError;

/// What went wrong on a facade call, independent of the backend behind it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// The referenced record does not exist. Displays identically to the
    /// server's message so toasts read the same against either backend.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The payload failed a schema rule. Raised before anything is sent.
    #[error("{0}")]
    Validation(String),

    /// The operation needs an authenticated session.
    #[error("{0}")]
    Unauthorized(String),

    /// The request never produced an HTTP response (DNS, refused
    /// connection, timeout). Transient by definition.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status that is not a 400 or
    /// a 404. `message` carries the server's own error string.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Anything that resists classification.
    #[error("{0}")]
    Unknown(String),
}

impl ClientError {
    /// Shorthand for the `NotFound` variant.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ClientError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// True for errors a retry has a chance of clearing.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::Api { status: 500..=599, .. }
        )
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, id } => ClientError::NotFound { entity, id },
            CoreError::Validation(message) => ClientError::Validation(message),
            CoreError::Unauthorized(message) => ClientError::Unauthorized(message),
            CoreError::Internal(message) => ClientError::Unknown(message),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
