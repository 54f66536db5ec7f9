//! # Type Resolution
//!
//! Decides which [`TypeSchema`] applies to a write and what the write does to the
//! store:
//!
//! | Stored resource | Resolved type | [`WriteTarget`] |
//! |---|---|---|
//! | none | any served type | `NoResource` |
//! | `person` | `person` | `ExistingSameType` |
//! | `person` | `strangeperson` | `ExistingTypeChanged` |
//!
//! The discriminator comes from, in order: the `type` parameter of the request
//! content type, the `resource_type` key of the body, the stored type (updates),
//! the endpoint's base type (creates).

use crate::schema::{Endpoint, SchemaRegistry, TypeSchema};
use serde_json::Value;
use thiserror::Error;

/// Body key carrying a document's discriminator.
pub const DISCRIMINATOR: &str = "resource_type";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unknown resource type '{0}'")]
    UnknownType(String),

    #[error("Resource type '{resource_type}' is not served by the '{endpoint}' endpoint")]
    TypeNotServed {
        endpoint: String,
        resource_type: String,
    },

    #[error("The 'resource_type' field only accepts string values")]
    InvalidDiscriminator,
}

/// What a write will do to the stored resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteTarget {
    /// Nothing is stored yet: create.
    NoResource,
    /// Same discriminator as the stored resource: replace fields in place.
    ExistingSameType,
    /// Different discriminator: delete the stored resource and recreate it
    /// under the same URI.
    ExistingTypeChanged { previous: String },
}

#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    pub schema: &'a TypeSchema,
    pub target: WriteTarget,
}

impl Resolution<'_> {
    pub fn resource_type(&self) -> &str {
        self.schema.resource_type()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> TypeResolver<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Resolves a write to `endpoint`.
    ///
    /// `declared` is the content-type `type` parameter; `existing` is the type of the
    /// stored resource, `None` for a create.
    pub fn resolve(
        &self,
        endpoint: &Endpoint,
        declared: Option<&str>,
        payload: &Value,
        existing: Option<&str>,
    ) -> Result<Resolution<'a>, ResolveError> {
        let resource_type = discriminator(declared, payload)?
            .or(existing)
            .unwrap_or(endpoint.base_type.as_str());

        let schema = self
            .registry
            .schema(resource_type)
            .ok_or_else(|| ResolveError::UnknownType(resource_type.to_string()))?;
        if !self.registry.serves(endpoint, resource_type) {
            return Err(ResolveError::TypeNotServed {
                endpoint: endpoint.name.clone(),
                resource_type: resource_type.to_string(),
            });
        }

        let target = match existing {
            None => WriteTarget::NoResource,
            Some(current) if current == resource_type => WriteTarget::ExistingSameType,
            Some(current) => WriteTarget::ExistingTypeChanged {
                previous: current.to_string(),
            },
        };
        Ok(Resolution { schema, target })
    }
}

/// The requested discriminator, if the request names one.
///
/// A declared type wins; the body value is not even inspected then.
pub fn discriminator<'p>(
    declared: Option<&'p str>,
    payload: &'p Value,
) -> Result<Option<&'p str>, ResolveError> {
    if declared.is_some() {
        return Ok(declared);
    }
    match payload.get(DISCRIMINATOR) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(resource_type)) => Ok(Some(resource_type.as_str())),
        Some(_) => Err(ResolveError::InvalidDiscriminator),
    }
}
