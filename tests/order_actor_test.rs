use chrono::Utc;
use dakar_tracking::clients::{actor_client::ActorClient, DriverClient, OrderClient};
use dakar_tracking::framework::mock::MockClient;
use dakar_tracking::framework::FrameworkError;
use dakar_tracking::model::{
    Coordinate, Driver, DriverAssignment, DriverId, Order, OrderCreate, OrderId, OrderStatus,
    VehicleKind,
};
use dakar_tracking::order_actor::OrderError;

fn driver(id: &str, name: &str) -> Driver {
    Driver {
        id: DriverId::from(id),
        name: name.into(),
        vehicle: VehicleKind::Scooter,
        route: vec![
            Coordinate::new(14.7645, -17.3660),
            Coordinate::new(14.6937, -17.4441),
        ],
    }
}

/// Real Order actor with a mocked Driver dependency.
///
/// The driver check in `Order::on_create` and in the `AssignDriver` action
/// goes through the mock, so no driver actor is needed.
#[tokio::test]
async fn test_order_actor_with_mocked_drivers() {
    let mut driver_mock = MockClient::<Driver>::new();

    // on_create validates the assigned driver
    driver_mock
        .expect_get(DriverId::from("driver001"))
        .return_ok(Some(driver("driver001", "Moussa Sow")));

    let driver_client = DriverClient::new(driver_mock.client());
    let (order_actor, order_client) = dakar_tracking::order_actor::new(8);
    let actor_handle = tokio::spawn(order_actor.run(driver_client.clone()));

    let params = OrderCreate::new("Aminata Fall", "Yoff Virage", "Plateau, Rue 23", VehicleKind::Scooter)
        .with_id("dkr123")
        .with_status(OrderStatus::InTransit)
        .with_driver(DriverAssignment::new("driver001", "Moussa Sow"));
    let order_id = order_client
        .create_order(params)
        .await
        .expect("Order creation failed");
    assert_eq!(order_id.to_string(), "dkr123");

    let order = order_client
        .get(order_id.clone())
        .await
        .unwrap()
        .expect("Order not found");
    assert_eq!(order.driver_name(), "Moussa Sow");
    assert_eq!(order.status, OrderStatus::InTransit);

    driver_mock.verify();

    // Cleanup
    drop(order_client);
    drop(driver_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_assign_driver_accepts_pending_order() {
    let mut driver_mock = MockClient::<Driver>::new();
    driver_mock
        .expect_get(DriverId::from("driver002"))
        .return_ok(Some(driver("driver002", "Fatou Diallo")));
    driver_mock.expect_get(DriverId::from("driver404")).return_ok(None);

    let (order_actor, order_client) = dakar_tracking::order_actor::new(8);
    let actor_handle = tokio::spawn(order_actor.run(DriverClient::new(driver_mock.client())));

    let order_id = order_client
        .create_order(OrderCreate::new("Moussa Diop", "Sacré Coeur 3", "Almadies", VehicleKind::Van))
        .await
        .expect("Order creation failed");
    assert_eq!(order_id.to_string(), "order_1");

    let order = order_client
        .assign_driver(order_id.clone(), DriverAssignment::new("driver002", "Fatou Diallo"))
        .await
        .expect("Assignment failed");
    assert_eq!(order.status, OrderStatus::Accepted);

    let result = order_client
        .assign_driver(order_id.clone(), DriverAssignment::new("driver404", "Nobody"))
        .await;
    assert_eq!(result, Err(OrderError::InvalidDriver("driver404".into())));

    // the failed assignment left the first driver in place
    let order = order_client.get(order_id.clone()).await.unwrap().unwrap();
    assert_eq!(order.driver_name(), "Fatou Diallo");

    let order = order_client
        .unassign_driver(order_id)
        .await
        .expect("Unassign failed");
    assert!(order.driver.is_none());

    driver_mock.verify();
    drop(order_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_terminal_status_is_final() {
    let driver_mock = MockClient::<Driver>::new();
    let (order_actor, order_client) = dakar_tracking::order_actor::new(8);
    let actor_handle = tokio::spawn(order_actor.run(DriverClient::new(driver_mock.client())));

    let order_id = order_client
        .create_order(OrderCreate::new("Aicha Ba", "Liberté 6", "Fann Hock", VehicleKind::Scooter))
        .await
        .unwrap();
    order_client
        .update_status(order_id.clone(), OrderStatus::Delivered)
        .await
        .expect("Status update failed");

    let result = order_client
        .update_status(order_id.clone(), OrderStatus::InTransit)
        .await;
    assert_eq!(
        result,
        Err(OrderError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::InTransit
        })
    );

    let result = order_client
        .create_order(OrderCreate::new("", "Liberté 6", "Fann Hock", VehicleKind::Scooter))
        .await;
    assert!(matches!(result, Err(OrderError::ValidationError(_))));

    drop(order_client);
    actor_handle.await.unwrap();
}

fn order(status: OrderStatus, driver: Option<DriverAssignment>) -> Order {
    Order {
        id: OrderId::from("dkr456"),
        customer_name: "Moussa Diop".into(),
        customer_phone: "+221 77 123 45 67".into(),
        pickup_address: "Sacré Coeur 3".into(),
        delivery_address: "Almadies".into(),
        items: "Thieboudienne x2".into(),
        total_amount: 8_500,
        vehicle: VehicleKind::Van,
        status,
        ordered_at: Utc::now(),
        pickup_location: None,
        delivery_location: None,
        driver,
    }
}

/// Order client over a mocked order actor: updates and actions are answered
/// from expectations, and actor-side errors come back as `OrderError`.
#[tokio::test]
async fn test_order_client_against_mocked_actor() {
    let mut order_mock = MockClient::<Order>::new();
    let assignment = DriverAssignment::new("driver002", "Fatou Diallo");
    order_mock
        .expect_action(OrderId::from("dkr456"))
        .return_ok(order(OrderStatus::Accepted, Some(assignment.clone())));
    order_mock
        .expect_update(OrderId::from("dkr456"))
        .return_ok(order(OrderStatus::InTransit, Some(assignment.clone())));
    order_mock
        .expect_update(OrderId::from("dkr000"))
        .return_err(FrameworkError::NotFound("dkr000".into()));

    let order_client = OrderClient::new(order_mock.client());

    let assigned = order_client
        .assign_driver(OrderId::from("dkr456"), assignment)
        .await
        .expect("Assignment failed");
    assert_eq!(assigned.driver_name(), "Fatou Diallo");
    assert_eq!(order_mock.pending(), 2);

    let moving = order_client
        .update_status(OrderId::from("dkr456"), OrderStatus::InTransit)
        .await
        .expect("Status update failed");
    assert_eq!(moving.status, OrderStatus::InTransit);

    let result = order_client
        .update_status(OrderId::from("dkr000"), OrderStatus::Delivered)
        .await;
    assert_eq!(result, Err(OrderError::NotFound("dkr000".into())));

    order_mock.verify();
}

/// Driver client over a mocked driver actor.
#[tokio::test]
async fn test_update_route_against_mocked_actor() {
    let mut driver_mock = MockClient::<Driver>::new();
    let mut rerouted = driver("driver001", "Moussa Sow");
    rerouted.route.reverse();
    driver_mock
        .expect_update(DriverId::from("driver001"))
        .return_ok(rerouted.clone());

    let driver_client = DriverClient::new(driver_mock.client());
    let updated = driver_client
        .update_route(DriverId::from("driver001"), rerouted.route.clone())
        .await
        .expect("Route update failed");
    assert_eq!(updated, rerouted);

    driver_mock.verify();
}
