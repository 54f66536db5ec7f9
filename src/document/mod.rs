//! # Document Actor
//!
//! A [`Document`] is one stored resource: its id, its discriminator and its
//! normalized fields. Every endpoint runs its own `ResourceActor<Document>`, started
//! with a [`CollectionContext`] naming the endpoint and the shared registry.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation: resolve, validate, store
//! - [`error`] - [`DocumentError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::DocumentClient;
use crate::schema::{Endpoint, SchemaRegistry};
use crate::validator::Fields;
use resource_actor::ResourceActor;
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

/// Numeric id of a document within its endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u32);

impl From<u32> for DocumentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A stored resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub resource_type: String,
    pub fields: Fields,
}

/// A create or full-replace request.
///
/// `declared_type` is the `type` parameter of the request content type; it takes
/// precedence over a `resource_type` key inside `payload`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWrite {
    pub declared_type: Option<String>,
    pub payload: Value,
}

impl DocumentWrite {
    pub fn new(payload: Value) -> Self {
        Self {
            declared_type: None,
            payload,
        }
    }

    pub fn typed(resource_type: impl Into<String>, payload: Value) -> Self {
        Self {
            declared_type: Some(resource_type.into()),
            payload,
        }
    }
}

/// Dependencies injected into a document actor when it starts.
#[derive(Debug, Clone)]
pub struct CollectionContext {
    pub registry: Arc<SchemaRegistry>,
    pub endpoint: Endpoint,
}

/// Creates a new Document actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Document>, DocumentClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, DocumentClient::new(generic_client))
}
