//! Error types for the document actor.

use crate::resolver::ResolveError;
use crate::validator::ValidationError;
use thiserror::Error;

/// Errors that can occur during document operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DocumentError {
    /// The payload failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No usable type could be resolved for the write.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The requested document was not found.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl DocumentError {
    /// True for errors caused by the submitted payload rather than the system.
    pub fn is_rejection(&self) -> bool {
        matches!(self, DocumentError::Validation(_) | DocumentError::Resolve(_))
    }
}

impl From<String> for DocumentError {
    fn from(msg: String) -> Self {
        DocumentError::ActorCommunicationError(msg)
    }
}
