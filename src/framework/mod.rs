//! Generic actor framework for the order and driver stores.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that stored resource types implement
//! - [`ResourceActor`] - Generic actor that owns a store of entities
//! - [`ResourceClient`] - Typed, cloneable handle for talking to an actor
//! - [`FrameworkError`] - Plumbing errors (closed actor, not found, ...)
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
