//! Driver registry: names, vehicles and the routes drivers follow.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::DriverClient;
use crate::framework::ResourceActor;
use crate::model::{Driver, DriverId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Driver actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Driver>, DriverClient) {
    let driver_id_counter = Arc::new(AtomicU64::new(1));
    let next_driver_id = move || {
        let id = driver_id_counter.fetch_add(1, Ordering::SeqCst);
        DriverId(format!("driver_{}", id))
    };

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_driver_id);
    let client = DriverClient::new(generic_client);

    (actor, client)
}
