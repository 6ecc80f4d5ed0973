//! # Position Publisher
//!
//! Replays a driver's route as a stream of [`LocationUpdate`]s, one per
//! timer tick.
//!
//! The work is split in two:
//!
//! - [`RouteCursor`] is the pure part. Each call to
//!   [`advance`](RouteCursor::advance) produces the update for the current
//!   waypoint (heading to the next one, sampled speed, ETA) and moves on,
//!   or returns `None` once the last waypoint is reached.
//! - [`PositionPublisher::start`] drives a cursor from a `tokio::time`
//!   interval on its own task and feeds the results to the caller's
//!   callback, honouring cancellation through the shared
//!   [`SubscriptionState`].
//!
//! A path of `N` points therefore yields at most `N - 1` updates. The tick
//! after the last update finds the path exhausted and completes the
//! subscription.

use crate::model::{DriverAssignment, LocationUpdate, OrderId, Path, VehicleKind};
use crate::tracking::config::{EtaStrategy, TrackingConfig};
use crate::tracking::subscription::{Shared, Subscription, SubscriptionId, SubscriptionState};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Everything the publisher needs about one order, resolved up front.
#[derive(Debug, Clone)]
pub struct TrackedRoute {
    pub order_id: OrderId,
    pub driver: DriverAssignment,
    pub vehicle: VehicleKind,
    pub path: Path,
}

/// Walks a [`TrackedRoute`] one waypoint at a time.
pub struct RouteCursor {
    route: TrackedRoute,
    index: usize,
    rng: StdRng,
    minutes_per_point: u32,
    min_speed_kmh: u32,
    max_speed_kmh: u32,
    eta: EtaStrategy,
}

impl RouteCursor {
    pub fn new(route: TrackedRoute, config: &TrackingConfig, rng: StdRng) -> Self {
        Self {
            route,
            index: 0,
            rng,
            minutes_per_point: config.minutes_per_point,
            min_speed_kmh: config.min_speed_kmh,
            max_speed_kmh: config.max_speed_kmh,
            eta: config.eta,
        }
    }

    /// Index of the waypoint the next update will report.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_exhausted(&self) -> bool {
        self.index + 1 >= self.route.path.len()
    }

    /// Builds the update for the current waypoint and moves to the next one.
    ///
    /// Returns `None` without side effects once the last waypoint is reached.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Option<LocationUpdate> {
        if self.is_exhausted() {
            return None;
        }

        let path = &self.route.path;
        let position = path.get(self.index)?;
        let heading = path.segment_heading(self.index)?;
        let speed_kmh = self.sample_speed();
        let estimated_arrival = now + self.time_to_arrival(speed_kmh);

        let update = LocationUpdate {
            order_id: self.route.order_id.clone(),
            position,
            heading,
            speed_kmh,
            last_updated: now,
            driver_id: self.route.driver.id.clone(),
            driver_name: self.route.driver.name.clone(),
            vehicle: self.route.vehicle,
            estimated_arrival,
            sequence: self.index,
        };
        self.index += 1;
        Some(update)
    }

    fn sample_speed(&mut self) -> u32 {
        if self.min_speed_kmh >= self.max_speed_kmh {
            return self.min_speed_kmh;
        }
        self.rng.gen_range(self.min_speed_kmh..self.max_speed_kmh)
    }

    fn time_to_arrival(&self, speed_kmh: u32) -> ChronoDuration {
        match self.eta {
            EtaStrategy::PerWaypoint => {
                let remaining_points = (self.route.path.len() - self.index - 1) as i64;
                ChronoDuration::minutes(remaining_points * i64::from(self.minutes_per_point))
            }
            EtaStrategy::Distance => {
                if speed_kmh == 0 {
                    return ChronoDuration::zero();
                }
                let km = self.route.path.remaining_distance_km(self.index);
                let millis = km / f64::from(speed_kmh) * 3_600_000.0;
                ChronoDuration::milliseconds(millis.round() as i64)
            }
        }
    }
}

/// Marks the subscription cancelled if the publisher task ends without
/// reaching a terminal state (panicking callback, runtime shutdown).
struct TerminalGuard(Arc<Shared>);

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.0.finish(SubscriptionState::Cancelled);
    }
}

/// Spawns position publishers.
pub struct PositionPublisher;

impl PositionPublisher {
    /// Starts replaying `route` and returns the subscription handle.
    ///
    /// The first update arrives one tick interval after this call. The
    /// callback runs on the publisher task, one update at a time, in path
    /// order. Must be called from within a Tokio runtime.
    pub fn start<F>(
        id: SubscriptionId,
        route: TrackedRoute,
        config: &TrackingConfig,
        callback: F,
    ) -> Subscription
    where
        F: FnMut(LocationUpdate) + Send + 'static,
    {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(id.0)),
            None => StdRng::from_entropy(),
        };
        let order_id = route.order_id.clone();
        let shared = Shared::new();
        let cursor = RouteCursor::new(route, config, rng);

        tokio::spawn(Self::run(
            id,
            cursor,
            shared.clone(),
            config.tick_interval(),
            callback,
        ));

        Subscription::new(id, order_id, shared)
    }

    async fn run<F>(
        id: SubscriptionId,
        mut cursor: RouteCursor,
        shared: Arc<Shared>,
        period: std::time::Duration,
        mut callback: F,
    ) where
        F: FnMut(LocationUpdate) + Send + 'static,
    {
        let _guard = TerminalGuard(shared.clone());
        let order_id = cursor.route.order_id.clone();

        if !shared.transition(SubscriptionState::Idle, SubscriptionState::Tracking) {
            debug!(subscription = %id, %order_id, "Cancelled before start");
            return;
        }
        info!(
            subscription = %id,
            %order_id,
            driver_id = %cursor.route.driver.id,
            waypoints = cursor.route.path.len(),
            "Tracking started"
        );

        let mut state = shared.state.subscribe();
        let mut ticks = time::interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticks.tick() => {}
                changed = state.changed() => {
                    if changed.is_err() || state.borrow_and_update().is_terminal() {
                        break;
                    }
                    continue;
                }
            }

            if shared.current().is_terminal() {
                break;
            }

            match cursor.advance(Utc::now()) {
                Some(update) => {
                    // a cancel may have landed since the check above
                    let Some(_emitting) = shared.begin_emit() else {
                        break;
                    };
                    debug!(
                        subscription = %id,
                        %order_id,
                        sequence = update.sequence,
                        heading = update.heading,
                        speed_kmh = update.speed_kmh,
                        "Location update"
                    );
                    callback(update);
                    shared.updates.fetch_add(1, Ordering::SeqCst);
                }
                None => {
                    if shared.finish(SubscriptionState::Completed) {
                        info!(
                            subscription = %id,
                            %order_id,
                            updates = shared.updates.load(Ordering::SeqCst),
                            "Tracking completed"
                        );
                    }
                    break;
                }
            }
        }
    }
}
