use crate::clients::{DriverClient, OrderClient};
use crate::lifecycle::demo::{self, SeedError};
use crate::model::OrderId;
use crate::tracking::{ActorRepository, TrackingConfig, TrackingService};
use std::sync::Arc;
use tracing::{error, info};

/// Runtime orchestrator for the tracking system.
///
/// `TrackingSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the driver and order actors
/// - **Dependency Wiring**: the order actor runs with a `DriverClient` as its
///   context, and the tracking service reads both through an [`ActorRepository`]
///
/// # Example
///
/// ```ignore
/// let system = TrackingSystem::new(TrackingConfig::default());
/// system.seed_demo_data().await?;
///
/// let (subscription, mut updates) = system
///     .tracking
///     .subscribe_channel(&OrderId::from("dkr123"))
///     .await?;
/// while let Some(update) = updates.recv().await {
///     println!("{} heading {:.0}°", update.position, update.heading);
/// }
///
/// system.shutdown().await?;
/// ```
pub struct TrackingSystem {
    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    /// Client for interacting with the Driver actor
    pub driver_client: DriverClient,

    /// Subscription entry point
    pub tracking: TrackingService,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl TrackingSystem {
    /// Spawns the actors and wires the tracking service on top of them.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: TrackingConfig) -> Self {
        let (driver_actor, driver_client) = crate::driver_actor::new(config.mailbox_size());
        let (order_actor, order_client) = crate::order_actor::new(config.mailbox_size());

        let driver_handle = tokio::spawn(driver_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(driver_client.clone()));

        let repository = ActorRepository::new(order_client.clone(), driver_client.clone());
        let tracking = TrackingService::new(Arc::new(repository), config);

        Self {
            order_client,
            driver_client,
            tracking,
            handles: vec![driver_handle, order_handle],
        }
    }

    /// Loads the Dakar demo drivers and orders (`dkr123`, `dkr456`, `dkr789`).
    pub async fn seed_demo_data(&self) -> Result<Vec<OrderId>, SeedError> {
        demo::seed_demo_data(&self.driver_client, &self.order_client).await
    }

    /// Cancels live subscriptions, then stops the actors.
    ///
    /// # Shutdown Process
    ///
    /// Every subscription is cancelled first. Dropping the clients (including
    /// the clones held by the tracking service's repository) closes the actor
    /// mailboxes; the order actor goes first since it holds a driver client.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        let cancelled = self.tracking.shutdown();
        if cancelled > 0 {
            info!(cancelled, "Stopped running subscriptions");
        }

        drop(self.tracking);
        drop(self.order_client);
        drop(self.driver_client);

        for handle in self.handles.into_iter().rev() {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
