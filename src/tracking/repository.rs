//! Where the tracking service looks up orders and driver routes.

use crate::clients::{DriverClient, OrderClient};
use crate::model::{Coordinate, DriverId, Order, OrderId};
use crate::order_actor::OrderError;
use crate::tracking::error::TrackingError;
use async_trait::async_trait;
use tracing::instrument;

/// Read-only access to the data a subscription is built from.
///
/// `Ok(None)` means "does not exist"; `Err` means the store itself failed.
#[async_trait]
pub trait TrackingRepository: Send + Sync {
    async fn find_order(&self, id: &OrderId) -> Result<Option<Order>, TrackingError>;

    /// The waypoints registered for a driver, if the driver is known.
    async fn find_path(&self, driver: &DriverId) -> Result<Option<Vec<Coordinate>>, TrackingError>;
}

/// Repository backed by the order and driver actors.
#[derive(Clone)]
pub struct ActorRepository {
    orders: OrderClient,
    drivers: DriverClient,
}

impl ActorRepository {
    pub fn new(orders: OrderClient, drivers: DriverClient) -> Self {
        Self { orders, drivers }
    }
}

#[async_trait]
impl TrackingRepository for ActorRepository {
    #[instrument(skip(self))]
    async fn find_order(&self, id: &OrderId) -> Result<Option<Order>, TrackingError> {
        match self.orders.get_order_by_id(id.clone()).await {
            Ok(order) => Ok(Some(order)),
            Err(OrderError::NotFound(_)) => Ok(None),
            Err(e) => Err(TrackingError::Repository(e.to_string())),
        }
    }

    #[instrument(skip(self))]
    async fn find_path(&self, driver: &DriverId) -> Result<Option<Vec<Coordinate>>, TrackingError> {
        self.drivers
            .get_driver(driver.clone())
            .await
            .map(|found| found.map(|d| d.route))
            .map_err(|e| TrackingError::Repository(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::framework::FrameworkError;
    use crate::model::{Driver, VehicleKind};

    #[tokio::test]
    async fn missing_order_is_none() {
        let mut orders = MockClient::<Order>::new();
        let drivers = MockClient::<Driver>::new();
        orders.expect_get(OrderId::from("nope")).return_ok(None);

        let repo = ActorRepository::new(OrderClient::new(orders.client()), DriverClient::new(drivers.client()));
        assert_eq!(repo.find_order(&OrderId::from("nope")).await, Ok(None));
        orders.verify();
    }

    #[tokio::test]
    async fn actor_failure_is_repository_error() {
        let orders = MockClient::<Order>::new();
        let mut drivers = MockClient::<Driver>::new();
        drivers
            .expect_get(DriverId::from("driver001"))
            .return_err(FrameworkError::ActorClosed);

        let repo = ActorRepository::new(OrderClient::new(orders.client()), DriverClient::new(drivers.client()));
        let result = repo.find_path(&DriverId::from("driver001")).await;
        assert!(matches!(result, Err(TrackingError::Repository(_))));
    }

    #[tokio::test]
    async fn path_is_the_driver_route() {
        let orders = MockClient::<Order>::new();
        let mut drivers = MockClient::<Driver>::new();
        let route = vec![Coordinate::new(14.7645, -17.3660), Coordinate::new(14.6937, -17.4441)];
        drivers.expect_get(DriverId::from("driver001")).return_ok(Some(Driver {
            id: DriverId::from("driver001"),
            name: "Moussa Sow".into(),
            vehicle: VehicleKind::Scooter,
            route: route.clone(),
        }));

        let repo = ActorRepository::new(OrderClient::new(orders.client()), DriverClient::new(drivers.client()));
        assert_eq!(repo.find_path(&DriverId::from("driver001")).await, Ok(Some(route)));
        drivers.verify();
    }
}
