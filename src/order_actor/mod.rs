//! Order-specific resource logic and entity implementation.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::{Order, OrderId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Order actor and its client.
///
/// The actor needs a [`DriverClient`](crate::clients::DriverClient) as its
/// run context.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let order_id_counter = Arc::new(AtomicU64::new(1));
    let next_order_id = move || {
        let id = order_id_counter.fetch_add(1, Ordering::SeqCst);
        OrderId(format!("order_{}", id))
    };

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_order_id);
    let client = OrderClient::new(generic_client);

    (actor, client)
}
