use crate::clients::actor_client::ActorClient;
use crate::driver_actor::DriverError;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Coordinate, Driver, DriverCreate, DriverId, DriverUpdate};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Driver actor.
#[derive(Clone)]
pub struct DriverClient {
    inner: ResourceClient<Driver>,
}

impl DriverClient {
    pub fn new(inner: ResourceClient<Driver>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn register_driver(&self, params: DriverCreate) -> Result<DriverId, DriverError> {
        debug!(waypoints = params.route.len(), "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get_driver(&self, id: DriverId) -> Result<Option<Driver>, DriverError> {
        self.get(id).await
    }

    #[instrument(skip(self, route))]
    pub async fn update_route(
        &self,
        id: DriverId,
        route: Vec<Coordinate>,
    ) -> Result<Driver, DriverError> {
        debug!(waypoints = route.len(), "Sending request");
        let update = DriverUpdate {
            name: None,
            route: Some(route),
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Driver> for DriverClient {
    type Error = DriverError;

    fn inner(&self) -> &ResourceClient<Driver> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(inner) = e.entity_error::<DriverError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => DriverError::NotFound(id),
            FrameworkError::AlreadyExists(id) => DriverError::AlreadyExists(id),
            other => DriverError::ActorCommunicationError(other.to_string()),
        }
    }
}
