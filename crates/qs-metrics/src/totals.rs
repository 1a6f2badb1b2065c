//! Running completion totals.

use qs_core::CompletionRecord;

/// Counters accumulated over every completion since the last reset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsTotals {
    pub jobs_completed:     u64,
    /// Sum of `service_time` over completed jobs, in ticks.
    pub total_service_time: f64,
    /// Sum of queue waits over completed jobs, in ticks.
    pub total_queue_time:   u64,
}

impl MetricsTotals {
    pub fn record(&mut self, completion: &CompletionRecord) {
        self.jobs_completed += 1;
        self.total_service_time += completion.service_time;
        self.total_queue_time += completion.queue_time();
    }

    /// Mean service time per completed job; `0` before the first completion.
    pub fn avg_service_time(&self) -> f64 {
        if self.jobs_completed == 0 {
            return 0.0;
        }
        self.total_service_time / self.jobs_completed as f64
    }

    /// Mean queue wait per completed job; `0` before the first completion.
    pub fn avg_queue_time(&self) -> f64 {
        if self.jobs_completed == 0 {
            return 0.0;
        }
        self.total_queue_time as f64 / self.jobs_completed as f64
    }
}
