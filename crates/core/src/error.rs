use crate::types::EntityId;

/// Domain-level error taxonomy shared across the workspace.
///
/// `NotFound` and `Validation` are the recoverable cases every caller is
/// expected to branch on; `Unauthorized` guards session-gated operations;
/// `Internal` is the catch-all that surfaces as a sanitized message.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    /// A referenced record does not exist in the store.
    #[error("{entity} with id {id} not found")]
    NotFound {
        entity: &'static str,
        id: EntityId,
    },

    /// A payload failed the schema constraints in [`crate::project`] or
    /// [`crate::task`]. The message is the field-level description.
    #[error("{0}")]
    Validation(String),

    /// The operation requires an authenticated session.
    #[error("{0}")]
    Unauthorized(String),

    /// Anything not classified above. Never exposed verbatim over HTTP.
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the `NotFound` variant.
    pub fn not_found(entity: &'static str, id: impl Into<EntityId>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}
