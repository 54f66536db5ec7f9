//! Request failures and the status each one maps to.

use super::response::ApiResponse;
use crate::document::DocumentError;
use http::{Method, StatusCode};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Invalid JSON, or a payload the validator or resolver rejected.
    #[error("{0}")]
    BadRequest(String),

    #[error("{field}: Could not find the provided object via resource URI '{uri}'")]
    ReferenceNotFound { field: String, uri: String },

    #[error("{0}")]
    NotFound(String),

    #[error("Method {method} is not allowed on '{path}'")]
    MethodNotAllowed { method: Method, path: String },

    #[error("Unsupported content type '{0}', expected application/json")]
    UnsupportedMediaType(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::ReferenceNotFound { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> ApiResponse {
        ApiResponse::error(self.status(), self.to_string())
    }
}

impl From<DocumentError> for ApiError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::Validation(_) | DocumentError::Resolve(_) => Self::BadRequest(e.to_string()),
            DocumentError::NotFound(id) => Self::NotFound(format!("No resource with id {id}")),
            DocumentError::ActorCommunicationError(msg) => Self::Internal(msg),
        }
    }
}
