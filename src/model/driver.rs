use crate::model::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Drivers (e.g. `driver001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DriverId(pub String);

impl From<&str> for DriverId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DriverId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for DriverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vehicle used for a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Scooter,
    Van,
    Truck,
    Car,
}

impl VehicleKind {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::Scooter => "Scooter",
            VehicleKind::Van => "Van",
            VehicleKind::Truck => "Truck",
            VehicleKind::Car => "Car / Tricycle",
        }
    }
}

impl Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A driver and the waypoints of the route they are driving.
///
/// The route is stored raw; it only becomes a [`Path`](crate::model::Path)
/// (and is checked for length) when tracking starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub vehicle: VehicleKind,
    pub route: Vec<Coordinate>,
}

/// Payload for registering a driver.
#[derive(Debug, Clone)]
pub struct DriverCreate {
    pub id: Option<DriverId>,
    pub name: String,
    pub vehicle: VehicleKind,
    pub route: Vec<Coordinate>,
}

/// Payload for updating a driver; `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct DriverUpdate {
    pub name: Option<String>,
    pub route: Option<Vec<Coordinate>>,
}
