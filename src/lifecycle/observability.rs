//! # Observability
//!
//! [`setup_tracing`] installs the `tracing` subscriber used by the demo
//! binary. Log levels come from `RUST_LOG`:
//!
//! ```bash
//! # subscriptions accepted, completed and cancelled
//! RUST_LOG=info cargo run
//!
//! # plus every location update and actor request
//! RUST_LOG=debug cargo run
//!
//! # only the publisher
//! RUST_LOG=dakar_tracking::tracking=debug cargo run
//! ```
//!
//! Output uses the compact format with module paths hidden, so spans show
//! inline:
//!
//! ```text
//! INFO subscribe{order_id=OrderId("dkr123")}: Subscription accepted subscription=sub_1 driver_id=driver001
//! DEBUG Location update subscription=sub_1 order_id=dkr123 sequence=0 heading=223.03710816301725 speed_kmh=31
//! INFO Tracking completed subscription=sub_1 order_id=dkr123 updates=5
//! ```
//!
//! Precondition failures (unknown order, no driver, no path) are logged at
//! `warn` before being returned to the caller.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
