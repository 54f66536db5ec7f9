//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored resource implements to be
//! managed by the generic `ResourceActor`. It names the associated types for IDs,
//! write payloads, context and errors, and provides the lifecycle hooks
//! (`from_create_params`, `on_create`, `on_update`, `on_delete`).
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! The default implementations do nothing (`Ok(())`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// What an update did to the stored entity.
///
/// `Modified` means the hook changed `self` in place. `Replaced` carries a
/// brand-new entity that the actor swaps in under the *same* id: the old value
/// goes through `on_delete`, the new one through `on_create`.
#[derive(Debug, Clone, PartialEq)]
pub enum Revision<T> {
    Modified,
    Replaced(T),
}

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks can await. The `Context` type is
/// injected into every hook when the actor starts running ("late binding"),
/// which keeps construction free of dependencies.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update (or replace) an existing instance.
    type Update: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum per entity, not one per message. Errors are boxed into
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) on the way
    /// back to the client.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(
        id: Self::Id,
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    ///
    /// On error the hook must leave `self` untouched; the actor keeps whatever
    /// state `self` holds when the hook returns.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<Revision<Self>, Self::Error>;

    /// Called immediately before the entity is removed from the store, including
    /// removal as part of a replacement.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
