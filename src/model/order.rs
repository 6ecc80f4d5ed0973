//! A delivery order as stored by the order actor.
//!
//! # Actor Framework
//! [`Order`] implements the [`ActorEntity`](crate::framework::ActorEntity) trait
//! (see `order_actor::entity`), so it lives inside a
//! [`ResourceActor`](crate::framework::ResourceActor).

use crate::model::{Coordinate, DriverId, VehicleKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders (e.g. `dkr123`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where an order is in its delivery lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    PickedUp,
    InTransit,
    Delivered,
    Cancelled,
    Failed,
}

impl OrderStatus {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::PickedUp => "Picked up",
            OrderStatus::InTransit => "In transit",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Failed => "Failed",
        }
    }

    /// No further transitions are accepted once an order is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Failed
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The driver currently responsible for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverAssignment {
    pub id: DriverId,
    pub name: String,
}

impl DriverAssignment {
    pub fn new(id: impl Into<DriverId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub items: String,
    pub total_amount: u32,
    pub vehicle: VehicleKind,
    pub status: OrderStatus,
    pub ordered_at: DateTime<Utc>,
    pub pickup_location: Option<Coordinate>,
    pub delivery_location: Option<Coordinate>,
    pub driver: Option<DriverAssignment>,
}

impl Order {
    /// Name shown for the assigned driver, falling back when unassigned.
    pub fn driver_name(&self) -> &str {
        self.driver
            .as_ref()
            .map(|d| d.name.as_str())
            .unwrap_or("Unknown Driver")
    }
}

/// Payload for creating a new order.
///
/// `id` is normally left empty and generated by the order actor; fixtures
/// loaded with known ids set it.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub id: Option<OrderId>,
    pub customer_name: String,
    pub customer_phone: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub items: String,
    pub total_amount: u32,
    pub vehicle: VehicleKind,
    pub status: OrderStatus,
    pub ordered_at: Option<DateTime<Utc>>,
    pub pickup_location: Option<Coordinate>,
    pub delivery_location: Option<Coordinate>,
    pub driver: Option<DriverAssignment>,
}

impl OrderCreate {
    /// A pending order between two addresses with no driver yet.
    pub fn new(
        customer_name: impl Into<String>,
        pickup_address: impl Into<String>,
        delivery_address: impl Into<String>,
        vehicle: VehicleKind,
    ) -> Self {
        Self {
            id: None,
            customer_name: customer_name.into(),
            customer_phone: String::new(),
            pickup_address: pickup_address.into(),
            delivery_address: delivery_address.into(),
            items: String::new(),
            total_amount: 0,
            vehicle,
            status: OrderStatus::Pending,
            ordered_at: None,
            pickup_location: None,
            delivery_location: None,
            driver: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<OrderId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_locations(mut self, pickup: Coordinate, delivery: Coordinate) -> Self {
        self.pickup_location = Some(pickup);
        self.delivery_location = Some(delivery);
        self
    }

    pub fn with_driver(mut self, driver: DriverAssignment) -> Self {
        self.driver = Some(driver);
        self
    }
}

/// Payload for updating an order.
#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
}
