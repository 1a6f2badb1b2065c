//! Owned, read-only views of the simulation for collaborators.

use qs_core::{Job, JobId, Tick, TimeScale};
use qs_pool::Machine;

/// Derived metrics, recomputed from the current state on every call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub queue_length:         usize,
    /// Machines currently holding a job.
    pub running_jobs:         usize,
    pub jobs_completed:       u64,
    pub jobs_created:         u64,
    pub avg_service_time:     f64,
    pub avg_queue_time:       f64,
    /// Heuristic ticks to clear all current work with no new arrivals.
    pub estimated_drain_time: f64,
}

/// Everything a renderer, chart, or remote control plane consumes, captured
/// between ticks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimSnapshot {
    pub tick:                    Tick,
    pub running:                 bool,
    pub time_scale:              TimeScale,
    pub queue:                   Vec<Job>,
    pub oldest_queued:           Option<JobId>,
    pub newest_queued:           Option<JobId>,
    pub machines:                Vec<Machine>,
    pub metrics:                 Metrics,
    pub queue_history:           Vec<usize>,
    pub utilization_history:     Vec<f64>,
    pub needed_machines_history: Vec<u64>,
    pub display_bound:           usize,
}
