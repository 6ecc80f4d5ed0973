//! System orchestration: spawning the actors, demo data and logging setup.

pub mod demo;
pub mod observability;
mod tracking_system;

pub use demo::{seed_demo_data, SeedError};
pub use observability::setup_tracing;
pub use tracking_system::TrackingSystem;
