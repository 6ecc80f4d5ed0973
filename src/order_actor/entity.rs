//! Entity trait implementation for the Order domain type.
//!
//! The order actor's context is the [`DriverClient`]: creating an order
//! with a driver, or assigning one later, checks that the driver is
//! registered.

use super::actions::OrderAction;
use super::error::OrderError;
use crate::clients::DriverClient;
use crate::framework::ActorEntity;
use crate::model::{DriverAssignment, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

async fn ensure_driver_registered(
    drivers: &DriverClient,
    assignment: &DriverAssignment,
) -> Result<(), OrderError> {
    let found = drivers
        .get_driver(assignment.id.clone())
        .await
        .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;
    match found {
        Some(_) => Ok(()),
        None => Err(OrderError::InvalidDriver(assignment.id.to_string())),
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = DriverClient;
    type Error = OrderError;

    fn requested_id(params: &OrderCreate) -> Option<OrderId> {
        params.id.clone()
    }

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.customer_name.trim().is_empty() {
            return Err(OrderError::ValidationError("customer name is required".into()));
        }
        if params.pickup_address.trim().is_empty() || params.delivery_address.trim().is_empty() {
            return Err(OrderError::ValidationError(
                "pickup and delivery addresses are required".into(),
            ));
        }

        Ok(Self {
            id,
            customer_name: params.customer_name,
            customer_phone: params.customer_phone,
            pickup_address: params.pickup_address,
            delivery_address: params.delivery_address,
            items: params.items,
            total_amount: params.total_amount,
            vehicle: params.vehicle,
            status: params.status,
            ordered_at: params.ordered_at.unwrap_or_else(Utc::now),
            pickup_location: params.pickup_location,
            delivery_location: params.delivery_location,
            driver: params.driver,
        })
    }

    async fn on_create(&mut self, drivers: &DriverClient) -> Result<(), OrderError> {
        if let Some(assignment) = &self.driver {
            debug!(order_id = %self.id, driver_id = %assignment.id, "Validating driver");
            ensure_driver_registered(drivers, assignment).await?;
        }
        Ok(())
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &DriverClient) -> Result<(), OrderError> {
        if let Some(status) = update.status {
            if self.status.is_terminal() && status != self.status {
                return Err(OrderError::InvalidTransition {
                    from: self.status,
                    to: status,
                });
            }
            self.status = status;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        drivers: &DriverClient,
    ) -> Result<Order, OrderError> {
        match action {
            OrderAction::AssignDriver(assignment) => {
                if self.status.is_terminal() {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: OrderStatus::Accepted,
                    });
                }
                ensure_driver_registered(drivers, &assignment).await?;
                self.driver = Some(assignment);
                if self.status == OrderStatus::Pending {
                    self.status = OrderStatus::Accepted;
                }
            }
            OrderAction::Unassign => {
                self.driver = None;
            }
        }
        Ok(self.clone())
    }
}
