//! Entity trait implementation for the Driver domain type.

use super::error::DriverError;
use crate::framework::ActorEntity;
use crate::model::{Driver, DriverCreate, DriverId, DriverUpdate};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Driver {
    type Id = DriverId;
    type Create = DriverCreate;
    type Update = DriverUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = DriverError;

    fn requested_id(params: &DriverCreate) -> Option<DriverId> {
        params.id.clone()
    }

    /// Routes are stored as given; a short route is only rejected when
    /// someone tries to track along it.
    fn from_create_params(id: DriverId, params: DriverCreate) -> Result<Self, DriverError> {
        if params.name.trim().is_empty() {
            return Err(DriverError::ValidationError("driver name is required".into()));
        }
        Ok(Self {
            id,
            name: params.name,
            vehicle: params.vehicle,
            route: params.route,
        })
    }

    /// # Fields Updated
    /// - `name`: display name
    /// - `route`: replaces the whole waypoint list
    async fn on_update(&mut self, update: DriverUpdate, _ctx: &()) -> Result<(), DriverError> {
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(DriverError::ValidationError("driver name is required".into()));
            }
            self.name = name;
        }
        if let Some(route) = update.route {
            self.route = route;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), DriverError> {
        Ok(())
    }
}
