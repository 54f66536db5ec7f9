//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).

pub mod document_client;

pub use document_client::*;
