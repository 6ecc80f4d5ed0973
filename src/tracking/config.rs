//! Publisher and actor settings, with defaults for every field.

use serde::Deserialize;
use std::time::Duration;

/// How the arrival estimate on each update is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EtaStrategy {
    /// `remaining waypoints × minutes_per_point`, regardless of distance.
    #[default]
    PerWaypoint,
    /// Remaining path distance at the sampled speed.
    Distance,
}

/// Settings for the position publisher.
///
/// Deserializable so it can sit inside a larger application config; every
/// field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Time between two position updates.
    pub tick_interval_ms: u64,
    /// Minutes attributed to each remaining waypoint by [`EtaStrategy::PerWaypoint`].
    pub minutes_per_point: u32,
    /// Lower bound of the sampled speed (inclusive).
    pub min_speed_kmh: u32,
    /// Upper bound of the sampled speed (exclusive).
    pub max_speed_kmh: u32,
    pub eta: EtaStrategy,
    /// Fixed RNG seed; each subscription derives its own stream from it.
    pub seed: Option<u64>,
    /// Mailbox size of the order and driver actors.
    pub channel_buffer: usize,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 5_000,
            minutes_per_point: 5,
            min_speed_kmh: 20,
            max_speed_kmh: 40,
            eta: EtaStrategy::PerWaypoint,
            seed: None,
            channel_buffer: 32,
        }
    }
}

impl TrackingConfig {
    pub fn tick_interval(&self) -> Duration {
        // a zero period would make tokio's interval panic
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Actor mailbox size; tokio channels need room for at least one message.
    pub fn mailbox_size(&self) -> usize {
        self.channel_buffer.max(1)
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_eta(mut self, eta: EtaStrategy) -> Self {
        self.eta = eta;
        self
    }
}
