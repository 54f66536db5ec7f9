//! # Resource Actor
//!
//! Building blocks for an actor-backed resource store: every resource collection
//! is owned by one [`ResourceActor`] task and reached through a cloneable
//! [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - what is stored and how writes are applied
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and the ordered store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe requests
//!
//! ## Replacing an entity
//!
//! Besides create/read/list/delete, an update hook may answer with
//! [`Revision::Replaced`]. The actor then deletes the old entity and stores the
//! replacement under the same id in one step, and the client sees
//! [`Updated::Replaced`]. Nothing else can touch the store in between.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor (no locks needed)
//! - Multiple actors run in **parallel**
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from queued expectations,
//! so client wrappers can be tested without a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::{ActorEntity, Revision};
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response, Updated};
