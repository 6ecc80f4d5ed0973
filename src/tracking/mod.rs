//! Live delivery tracking.
//!
//! # Main Components
//!
//! - [`TrackingService`] - Validates a tracking request and starts a publisher
//! - [`PositionPublisher`] - Replays a driver's path, one update per tick
//! - [`Subscription`] - Caller's handle: state, update count, cancellation
//! - [`TrackingRepository`] - Where orders and driver paths are looked up
//! - [`progress`] - Progress and time-left helpers for display

pub mod config;
pub mod error;
pub mod progress;
pub mod publisher;
pub mod registry;
pub mod repository;
pub mod service;
pub mod subscription;

pub use config::{EtaStrategy, TrackingConfig};
pub use error::TrackingError;
pub use progress::{delivery_progress, format_time_remaining};
pub use publisher::{PositionPublisher, RouteCursor, TrackedRoute};
pub use registry::SubscriptionRegistry;
pub use repository::{ActorRepository, TrackingRepository};
pub use service::TrackingService;
pub use subscription::{Subscription, SubscriptionId, SubscriptionState};
