//! # Order Client
//!
//! High-level API over the order actor. Driver validation happens inside
//! the actor (see `order_actor::entity`), not here.

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{DriverAssignment, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "create_order called");
        info!("Sending create_order to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Looks up an order, treating absence as an error.
    #[instrument(skip(self))]
    pub async fn get_order_by_id(&self, id: OrderId) -> Result<Order, OrderError> {
        debug!("Sending request");
        match self.get(id.clone()).await? {
            Some(order) => Ok(order),
            None => Err(OrderError::NotFound(id.to_string())),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        let update = OrderUpdate {
            status: Some(status),
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn assign_driver(
        &self,
        id: OrderId,
        assignment: DriverAssignment,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::AssignDriver(assignment))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn unassign_driver(&self, id: OrderId) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Unassign)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(inner) = e.entity_error::<OrderError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::AlreadyExists(id) => OrderError::AlreadyExists(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
