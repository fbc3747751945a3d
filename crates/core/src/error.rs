//! Domain-level error type shared by every crate in the workspace.

use crate::types::DbId;

/// Errors produced by core domain logic.
///
/// All four failure kinds from the editorial workflow (validation,
/// missing authentication, forbidden action, missing entity) are distinct
/// variants so the API layer can map each to its own HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Human-readable entity kind, e.g. `"Article"`.
        entity: &'static str,
        /// The id that was looked up.
        id: DbId,
    },

    /// Malformed or missing input (empty title, out-of-enum status, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// No authenticated actor was supplied for a mutating call.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The actor is authenticated but not permitted to do this.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A uniqueness or state conflict.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An unexpected internal failure (storage, serialization, ...).
    #[error("Internal error: {0}")]
    Internal(String),
}
