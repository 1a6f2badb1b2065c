//! Plain data row types written by output backends.

use qs_core::CompletionRecord;
use qs_sim::TickStats;

/// Summary of one committed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub queue_len:      u64,
    pub running_jobs:   u64,
    pub machines:       u64,
    pub utilization:    f64,
    pub jobs_completed: u64,
    pub display_bound:  u64,
}

impl TickSummaryRow {
    pub fn new(tick: u64, stats: &TickStats) -> Self {
        Self {
            tick,
            queue_len:      stats.queue_len as u64,
            running_jobs:   stats.running_jobs as u64,
            machines:       stats.machines as u64,
            utilization:    stats.utilization,
            jobs_completed: stats.jobs_completed,
            display_bound:  stats.display_bound as u64,
        }
    }
}

/// One finished job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionRow {
    pub job_id:         u64,
    pub machine_id:     u32,
    pub arrival_tick:   u64,
    pub start_tick:     u64,
    pub completed_tick: u64,
    pub service_time:   f64,
    pub queue_time:     u64,
}

impl From<&CompletionRecord> for CompletionRow {
    fn from(rec: &CompletionRecord) -> Self {
        Self {
            job_id:         rec.job.0,
            machine_id:     rec.machine.0,
            arrival_tick:   rec.arrival.0,
            start_tick:     rec.service_start.0,
            completed_tick: rec.completed_at.0,
            service_time:   rec.service_time,
            queue_time:     rec.queue_time(),
        }
    }
}
