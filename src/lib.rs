//! # Dakar Go Tracking
//!
//! > **Live delivery tracking on top of resource-oriented actors.**
//!
//! Orders and drivers live in two Tokio actors. The tracking layer looks an
//! order up, finds the route of its assigned driver and replays that route
//! as a stream of [`LocationUpdate`](model::LocationUpdate)s, one every few
//! seconds, until the route ends or the subscriber cancels.
//!
//! ## Core Concepts
//!
//! ### Resource actors
//! [`ResourceActor<T: ActorEntity>`](framework::ResourceActor) owns a store of
//! `T` and answers CRUD and custom-action requests over a channel. [`Order`](model::Order)
//! and [`Driver`](model::Driver) are the two entities. The order actor runs
//! with a driver client as its context, so assigning a driver checks that the
//! driver exists.
//!
//! ### Subscriptions
//! [`TrackingService::subscribe`](tracking::TrackingService::subscribe) checks,
//! in order, that the order exists, that it has a driver, that the driver has
//! a route and that the route has at least two points. Each failure comes back
//! as a [`TrackingError`](tracking::TrackingError). On success a publisher task
//! starts and the caller gets a [`Subscription`](tracking::Subscription):
//!
//! - the first update arrives one tick interval after subscribing;
//! - a route of `N` points yields `N - 1` updates, in order;
//! - [`cancel`](tracking::Subscription::cancel) is idempotent, and no update
//!   starts after it returns.
//!
//! ### Time
//! All timers come from `tokio::time`, so tests run the publisher on a paused
//! clock with `#[tokio::test(start_paused = true)]`.
//!
//! ## Module Tour
//!
//! - [`framework`]: the generic actor, its client and a mock client for tests.
//! - [`model`]: coordinates, headings, paths, orders, drivers, location updates.
//! - [`clients`]: typed wrappers around the generic actor clients.
//! - [`order_actor`], [`driver_actor`]: entity implementations and errors.
//! - [`tracking`]: configuration, publisher, subscriptions and the service.
//! - [`lifecycle`]: [`TrackingSystem`](lifecycle::TrackingSystem), demo data,
//!   [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod driver_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod tracking;
