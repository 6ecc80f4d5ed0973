//! # Tracking Service
//!
//! Entry point for live tracking. [`TrackingService::subscribe`] resolves an
//! order to its driver's path through a [`TrackingRepository`], then starts a
//! [`PositionPublisher`] for it.
//!
//! Unlike a fire-and-forget subscription, every precondition failure is
//! reported to the caller as a [`TrackingError`] (and logged at `warn`):
//!
//! 1. the order exists, else [`TrackingError::OrderNotFound`];
//! 2. it has a driver, else [`TrackingError::NoDriverAssigned`];
//! 3. the driver has a route, else [`TrackingError::NoPath`];
//! 4. the route has at least two points, else
//!    [`TrackingError::InsufficientPathData`].

use crate::model::{GeoError, LocationUpdate, Order, OrderId, Path};
use crate::tracking::config::TrackingConfig;
use crate::tracking::error::TrackingError;
use crate::tracking::publisher::{PositionPublisher, TrackedRoute};
use crate::tracking::registry::SubscriptionRegistry;
use crate::tracking::repository::TrackingRepository;
use crate::tracking::subscription::{Subscription, SubscriptionId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

/// Hands out tracking subscriptions. Cheap to clone; clones share the
/// registry and the id sequence.
#[derive(Clone)]
pub struct TrackingService {
    repository: Arc<dyn TrackingRepository>,
    config: TrackingConfig,
    registry: Arc<SubscriptionRegistry>,
    next_id: Arc<AtomicU64>,
}

impl TrackingService {
    pub fn new(repository: Arc<dyn TrackingRepository>, config: TrackingConfig) -> Self {
        Self {
            repository,
            config,
            registry: Arc::new(SubscriptionRegistry::new()),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Starts tracking `order_id`; `callback` receives every update.
    ///
    /// Each call gets its own independent replay of the driver's path, even
    /// for an order that is already being tracked.
    #[instrument(skip(self, callback))]
    pub async fn subscribe<F>(
        &self,
        order_id: &OrderId,
        callback: F,
    ) -> Result<Subscription, TrackingError>
    where
        F: FnMut(LocationUpdate) + Send + 'static,
    {
        let route = match self.resolve_route(order_id).await {
            Ok(route) => route,
            Err(e) => {
                warn!(%order_id, error = %e, "Tracking subscription refused");
                return Err(e);
            }
        };

        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        info!(subscription = %id, driver_id = %route.driver.id, "Subscription accepted");
        let subscription = PositionPublisher::start(id, route, &self.config, callback);
        self.registry.insert(subscription.clone());
        Ok(subscription)
    }

    /// Like [`subscribe`](Self::subscribe), but delivers updates on a channel.
    ///
    /// The receiver yields `None` once the subscription completes or is
    /// cancelled.
    pub async fn subscribe_channel(
        &self,
        order_id: &OrderId,
    ) -> Result<(Subscription, mpsc::UnboundedReceiver<LocationUpdate>), TrackingError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self
            .subscribe(order_id, move |update| {
                // a dropped receiver just means nobody is listening any more
                let _ = tx.send(update);
            })
            .await?;
        Ok((subscription, rx))
    }

    pub async fn get_order_by_id(&self, order_id: &OrderId) -> Result<Order, TrackingError> {
        self.repository
            .find_order(order_id)
            .await?
            .ok_or_else(|| TrackingError::OrderNotFound(order_id.clone()))
    }

    pub fn active_subscriptions(&self, order_id: &OrderId) -> Vec<Subscription> {
        self.registry.active_for(order_id)
    }

    /// Cancels every live subscription for `order_id`.
    pub fn cancel_order(&self, order_id: &OrderId) -> usize {
        let cancelled = self.registry.cancel_order(order_id);
        if cancelled > 0 {
            info!(%order_id, cancelled, "Cancelled order subscriptions");
        }
        cancelled
    }

    /// Cancels every live subscription; returns how many were running.
    pub fn shutdown(&self) -> usize {
        let cancelled = self.registry.cancel_all();
        info!(cancelled, "Tracking service stopped");
        cancelled
    }

    async fn resolve_route(&self, order_id: &OrderId) -> Result<TrackedRoute, TrackingError> {
        let order = self
            .repository
            .find_order(order_id)
            .await?
            .ok_or_else(|| TrackingError::OrderNotFound(order_id.clone()))?;

        let driver = order
            .driver
            .clone()
            .ok_or_else(|| TrackingError::NoDriverAssigned(order_id.clone()))?;

        let points = match self.repository.find_path(&driver.id).await? {
            Some(points) if !points.is_empty() => points,
            _ => return Err(TrackingError::NoPath(driver.id.clone())),
        };

        let path = Path::new(points).map_err(|e| match e {
            GeoError::InsufficientPoints(points) => TrackingError::InsufficientPathData {
                driver: driver.id.clone(),
                points,
            },
        })?;

        Ok(TrackedRoute {
            order_id: order.id,
            driver,
            vehicle: order.vehicle,
            path,
        })
    }
}
