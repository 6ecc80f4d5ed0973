//! # ActorEntity Trait
//!
//! The contract every stored resource (orders, drivers) implements to be
//! served by the generic [`ResourceActor`](crate::framework::ResourceActor).
//!
//! Associated types pin each entity to its own payloads: a `Driver` only
//! accepts a `DriverCreate`, an `Order` only an `OrderCreate`, and the
//! compiler rejects anything else.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::requested_id`]
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! The defaults do nothing.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can call other actors. The `Context`
/// type is injected into every hook by [`ResourceActor::run`](crate::framework::ResourceActor::run),
/// which lets dependencies be wired after construction.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `AssignDriver`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per actor, covering every hook.
    type Error: std::error::Error + Send + Sync + 'static;

    /// An id chosen by the caller, e.g. when loading fixtures with known ids.
    /// `None` lets the actor generate one.
    fn requested_id(_params: &Self::Create) -> Option<Self::Id> {
        None
    }

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the entity is stored.
    /// Returning an error aborts the create.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
