//! Error types for tracking subscriptions.

use crate::model::{DriverId, OrderId};
use thiserror::Error;

/// Why a tracking subscription could not be started.
///
/// Every variant means no update will ever be delivered for the request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackingError {
    /// No order with this id exists.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order exists but nobody is driving it.
    #[error("Order {0} has no driver assigned")]
    NoDriverAssigned(OrderId),

    /// The assigned driver has no registered route.
    #[error("No path registered for driver {0}")]
    NoPath(DriverId),

    /// The driver's route is too short to move along.
    #[error("Path for driver {driver} has {points} point(s), at least 2 are needed")]
    InsufficientPathData { driver: DriverId, points: usize },

    /// The order or driver store could not be reached.
    #[error("Repository error: {0}")]
    Repository(String),
}
