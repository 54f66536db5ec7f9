//! # System Lifecycle
//!
//! Starts one document actor per registered endpoint, wires each with its
//! [`CollectionContext`](crate::document::CollectionContext), and hands the clients
//! to a [`ResourceApi`](crate::api::ResourceApi).
//!
//! ```rust,ignore
//! let system = ResourceSystem::with_defaults(ApiConfig::default())?;
//! let response = system.api.handle(ApiRequest::get("/api/v1/person/")).await;
//! system.shutdown().await?;
//! ```
//!
//! Shutdown drops the API, and with it every client. Each actor sees its
//! channel close, leaves its run loop, and the system awaits the tasks.

pub mod resource_system;

pub use resource_system::ResourceSystem;
