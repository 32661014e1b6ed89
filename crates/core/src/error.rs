//! Domain error taxonomy shared by the persistence and HTTP layers.

/// Domain-level errors.
///
/// Every mutating operation funnels failures into one of these variants;
/// nothing in the core is allowed to panic on a request path.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// Input failed validation before reaching the store.
    #[error("validation error: {0}")]
    Validation(String),

    /// A uniqueness or referential constraint was violated (e.g. duplicate
    /// primary key, delete blocked by live children).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not permitted.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] with an owned id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}
