//! # Generic Messages
//!
//! This module defines the message types exchanged between the `ResourceClient`
//! and the `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Result of a successful update, tagged with how the store changed.
#[derive(Debug, Clone, PartialEq)]
pub enum Updated<T> {
    /// The entity was changed in place.
    Modified(T),
    /// The entity was deleted and recreated under the same id.
    Replaced(T),
}

impl<T> Updated<T> {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Updated::Replaced(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Updated::Modified(item) | Updated::Replaced(item) => item,
        }
    }
}

/// Internal message type sent to the actor to request operations.
///
/// # The CRUD Pattern
/// The variants map directly to the lifecycle of a stored resource:
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize a new resource under a fresh id.
/// - **Get**: Fetches the current state of one resource.
/// - **List**: Fetches every resource in creation order.
/// - **Update**: Uses [`ActorEntity::Update`] to modify or replace an existing resource.
/// - **Delete**: Removes the resource.
///
/// Generic over `T: ActorEntity`, so a payload for one entity type can never be
/// sent to an actor managing another.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<Updated<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
