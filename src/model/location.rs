use crate::model::{Coordinate, DriverId, OrderId, VehicleKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One position report for a tracked order.
///
/// Built fresh on every tick and handed to the subscriber by value; nothing
/// keeps a copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdate {
    pub order_id: OrderId,
    pub position: Coordinate,
    /// Compass heading towards the next waypoint, `[0, 360)`.
    pub heading: f64,
    pub speed_kmh: u32,
    pub last_updated: DateTime<Utc>,
    pub driver_id: DriverId,
    pub driver_name: String,
    pub vehicle: VehicleKind,
    pub estimated_arrival: DateTime<Utc>,
    /// Index of `position` within the driver's path.
    pub sequence: usize,
}

impl LocationUpdate {
    /// Time left until `estimated_arrival`, measured from `last_updated`.
    pub fn eta_delta(&self) -> chrono::Duration {
        self.estimated_arrival - self.last_updated
    }
}
