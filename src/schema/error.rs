//! Errors raised while assembling a [`SchemaRegistry`](super::SchemaRegistry).

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Resource type '{0}' is registered twice")]
    DuplicateType(String),

    /// The parent must be registered before the type extending it.
    #[error("Resource type '{child}' extends unknown type '{parent}'")]
    UnknownParent { child: String, parent: String },

    #[error("Resource type '{resource_type}' declares field '{field}' twice")]
    DuplicateField { resource_type: String, field: String },

    #[error("Field '{resource_type}.{field}' points at unknown type '{target}'")]
    UnknownTarget {
        resource_type: String,
        field: String,
        target: String,
    },

    #[error("Field '{resource_type}.{field}' embeds '{target}', which is not an embedded type")]
    NotEmbeddable {
        resource_type: String,
        field: String,
        target: String,
    },

    #[error("Field '{resource_type}.{field}' references '{target}', which is embedded only")]
    NotReferenceable {
        resource_type: String,
        field: String,
        target: String,
    },

    #[error("Endpoint '{0}' is registered twice")]
    DuplicateEndpoint(String),

    #[error("Endpoint '{endpoint}' serves unknown or embedded-only type '{base_type}'")]
    InvalidEndpoint { endpoint: String, base_type: String },
}
