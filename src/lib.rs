//! # Document Resources
//!
//! A REST-style resource layer over an actor-backed document store. Clients
//! POST, PUT, GET and DELETE JSON documents; every write is checked against an
//! explicit field table before it touches the store, and a write may change a
//! document's type in place.
//!
//! ## Module Tour
//!
//! ### 1. The Rules ([`schema`], [`validator`], [`resolver`])
//! - [`schema`]: [`TypeSchema`](schema::TypeSchema) field tables, the type hierarchy and
//!   endpoints, collected in a [`SchemaRegistry`](schema::SchemaRegistry).
//! - [`validator`]: checks a payload against a schema and normalizes it.
//! - [`resolver`]: picks the schema for a write from the content type, the body
//!   or the stored document, and classifies the write (create, update, type change).
//!
//! ### 2. The Store ([`document`], [`clients`])
//! - [`document`]: the [`Document`](document::Document) entity run by a
//!   `resource_actor::ResourceActor`, one actor per endpoint.
//! - [`clients`]: [`DocumentClient`](clients::DocumentClient), the typed wrapper around
//!   the actor's channel.
//!
//! ### 3. The Surface ([`api`], [`config`], [`lifecycle`])
//! - [`api`]: requests in, responses out: routing, status codes, `Location`,
//!   reference checks and expansion.
//! - [`config`]: [`ApiConfig`](config::ApiConfig), loaded from TOML.
//! - [`lifecycle`]: [`ResourceSystem`](lifecycle::ResourceSystem) starts and stops the actors.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run -- doc-resource.toml
//! ```

pub mod api;
pub mod clients;
pub mod config;
pub mod document;
pub mod lifecycle;
pub mod resolver;
pub mod schema;
pub mod validator;
