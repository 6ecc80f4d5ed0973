//! Dakar demo fixtures: three drivers with their routes and one order each.

use crate::clients::{DriverClient, OrderClient};
use crate::driver_actor::DriverError;
use crate::model::{
    Coordinate, DriverAssignment, DriverCreate, DriverId, OrderCreate, OrderId, OrderStatus,
    VehicleKind,
};
use crate::order_actor::OrderError;
use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to register demo driver: {0}")]
    Driver(#[from] DriverError),
    #[error("failed to create demo order: {0}")]
    Order(#[from] OrderError),
}

struct DemoDriver {
    id: &'static str,
    name: &'static str,
    vehicle: VehicleKind,
    route: &'static [(f64, f64)],
}

static DRIVERS: [DemoDriver; 3] = [
    DemoDriver {
        id: "driver001",
        name: "Moussa Sow",
        vehicle: VehicleKind::Scooter,
        // Yoff Virage to Plateau
        route: &[
            (14.7645, -17.3660),
            (14.7500, -17.3800),
            (14.7350, -17.4000),
            (14.7200, -17.4200),
            (14.7050, -17.4300),
            (14.6937, -17.4441),
        ],
    },
    DemoDriver {
        id: "driver002",
        name: "Fatou Diallo",
        vehicle: VehicleKind::Van,
        // Sacré Coeur to Almadies
        route: &[
            (14.7247, -17.4752),
            (14.7300, -17.4850),
            (14.7350, -17.4950),
            (14.7400, -17.5050),
            (14.7450, -17.5150),
            (14.7471, -17.5233),
        ],
    },
    DemoDriver {
        id: "driver003",
        name: "Ibrahima Ndiaye",
        vehicle: VehicleKind::Scooter,
        // Liberté 6 to Fann Hock
        route: &[
            (14.7247, -17.4552),
            (14.7150, -17.4550),
            (14.7050, -17.4545),
            (14.6950, -17.4543),
            (14.6837, -17.4541),
        ],
    },
];

fn route(points: &[(f64, f64)]) -> Vec<Coordinate> {
    points
        .iter()
        .map(|&(lat, lng)| Coordinate::new(lat, lng))
        .collect()
}

fn demo_orders() -> Vec<OrderCreate> {
    let now = Utc::now();
    let assign = |driver: &DemoDriver| DriverAssignment::new(driver.id, driver.name);
    let ends = |driver: &DemoDriver| {
        let points = route(driver.route);
        (points[0], points[points.len() - 1])
    };

    let (pickup, delivery) = ends(&DRIVERS[0]);
    let yoff = OrderCreate {
        customer_phone: "771234567".into(),
        items: "Documents importants".into(),
        total_amount: 2500,
        ordered_at: Some(now),
        ..OrderCreate::new("Aminata Fall", "Yoff Virage", "Plateau, Rue 23", VehicleKind::Scooter)
    }
    .with_id("dkr123")
    .with_status(OrderStatus::InTransit)
    .with_locations(pickup, delivery)
    .with_driver(assign(&DRIVERS[0]));

    let (pickup, delivery) = ends(&DRIVERS[1]);
    let sacre_coeur = OrderCreate {
        customer_phone: "781234567".into(),
        items: "Colis fragile (vase)".into(),
        total_amount: 5000,
        ordered_at: Some(now - Duration::days(1)),
        ..OrderCreate::new("Moussa Diop", "Sacré Coeur 3", "Almadies, Ngor", VehicleKind::Van)
    }
    .with_id("dkr456")
    .with_status(OrderStatus::InTransit)
    .with_locations(pickup, delivery)
    .with_driver(assign(&DRIVERS[1]));

    let (pickup, delivery) = ends(&DRIVERS[2]);
    let liberte = OrderCreate {
        customer_phone: "761234567".into(),
        items: "Repas chaud (Thieboudienne)".into(),
        total_amount: 3000,
        ordered_at: Some(now - Duration::days(2)),
        ..OrderCreate::new("Aicha Ba", "Liberté 6", "Fann Hock", VehicleKind::Scooter)
    }
    .with_id("dkr789")
    .with_status(OrderStatus::Delivered)
    .with_locations(pickup, delivery)
    .with_driver(assign(&DRIVERS[2]));

    vec![yoff, sacre_coeur, liberte]
}

/// Registers the demo drivers, then their orders.
///
/// Drivers go first: the order actor refuses orders whose driver is unknown.
pub async fn seed_demo_data(
    drivers: &DriverClient,
    orders: &OrderClient,
) -> Result<Vec<OrderId>, SeedError> {
    for driver in &DRIVERS {
        drivers
            .register_driver(DriverCreate {
                id: Some(DriverId::from(driver.id)),
                name: driver.name.to_string(),
                vehicle: driver.vehicle,
                route: route(driver.route),
            })
            .await?;
    }

    let mut created = Vec::new();
    for order in demo_orders() {
        created.push(orders.create_order(order).await?);
    }
    info!(drivers = DRIVERS.len(), orders = created.len(), "Demo data loaded");
    Ok(created)
}
