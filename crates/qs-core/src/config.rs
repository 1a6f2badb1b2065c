//! Simulation configuration.

use crate::{QsError, QsResult, TimeScale};

/// Top-level simulation configuration.
///
/// Typically built in code or loaded from a JSON file by the application
/// crate and handed to `qs_sim::SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Mean job arrivals per simulated second.  `0` disables arrivals.
    pub arrival_rate: f64,

    /// Mean service requirement per job, in ticks.  Samples are uniform in
    /// `[0, 2 * avg_service_time)`.
    pub avg_service_time: f64,

    /// Target machine-pool size.  Must be at least 1.
    pub machine_count: usize,

    /// Multiplier between driver deltas and logical ticks.
    pub time_scale: TimeScale,

    /// RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Capacity of the queue-length history, which is also the display
    /// scaler's window.
    pub queue_history_len: usize,
}

impl SimConfig {
    /// Check every field for values the simulator refuses to start with.
    pub fn validate(&self) -> QsResult<()> {
        if !self.arrival_rate.is_finite() || self.arrival_rate < 0.0 {
            return Err(QsError::InvalidParameter { name: "arrival_rate", value: self.arrival_rate });
        }
        if !self.avg_service_time.is_finite() || self.avg_service_time < 0.0 {
            return Err(QsError::InvalidParameter {
                name:  "avg_service_time",
                value: self.avg_service_time,
            });
        }
        if self.time_scale.is_paused() {
            return Err(QsError::InvalidParameter { name: "time_scale", value: self.time_scale.0 });
        }
        if self.machine_count == 0 {
            return Err(QsError::Config("machine_count must be at least 1".into()));
        }
        if self.queue_history_len == 0 {
            return Err(QsError::Config("queue_history_len must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arrival_rate:      5.0,
            avg_service_time:  10.0,
            machine_count:     5,
            time_scale:        TimeScale::REALTIME,
            seed:              42,
            queue_history_len: 10,
        }
    }
}
