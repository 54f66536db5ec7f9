//! Validation failures. Every variant renders to a 400 response.

use thiserror::Error;

/// Why a payload was rejected. `field` is a dotted path
/// (`customer.name`, `embeddedlist.1.name`).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent or null.
    #[error("The '{field}' field has no data and doesn't allow a default or null value.")]
    MissingField { field: String },

    #[error("{field}: {label} only accepts {accepts} values")]
    TypeMismatch {
        field: String,
        label: &'static str,
        accepts: &'static str,
    },

    #[error("{field}: Field is required and cannot be empty")]
    EmptyMapping { field: String },

    #[error("{field}: Only dictionaries may be used in a DictField")]
    NotAMapping { field: String },

    /// The payload (or the body of the request) is not a JSON object.
    #[error("The request body must be a JSON object")]
    NotAnObject,

    /// An embedded type vanished from the registry.
    #[error("{field}: unknown embedded document type '{resource_type}'")]
    UnknownEmbeddedType { field: String, resource_type: String },
}

impl ValidationError {
    /// Path of the offending field, if the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::TypeMismatch { field, .. }
            | ValidationError::EmptyMapping { field }
            | ValidationError::NotAMapping { field }
            | ValidationError::UnknownEmbeddedType { field, .. } => Some(field),
            ValidationError::NotAnObject => None,
        }
    }
}
