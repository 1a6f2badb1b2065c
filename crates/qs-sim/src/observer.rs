//! Observer hook for tracing, charting, and data collection.

use qs_core::{CompletionRecord, Job, MachineId, Tick};
use qs_pool::Assignment;

/// Per-tick summary handed to [`SimObserver::on_tick_end`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickStats {
    pub queue_len:      usize,
    pub running_jobs:   usize,
    pub machines:       usize,
    /// Busy machines as a percentage of live machines.
    pub utilization:    f64,
    pub jobs_completed: u64,
    pub display_bound:  usize,
}

/// Callbacks invoked by [`Sim::tick_with`][crate::Sim::tick_with] at fixed
/// points of the tick algorithm.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  None of them can affect scheduling.
///
/// # Example: completion counter
///
/// ```rust,ignore
/// struct Counter(u64);
///
/// impl SimObserver for Counter {
///     fn on_completion(&mut self, _record: &CompletionRecord) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before any processing for `tick`.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A job finished (step ①).
    fn on_completion(&mut self, _record: &CompletionRecord) {}

    /// A drained machine left the pool (step ②).
    fn on_machine_removed(&mut self, _tick: Tick, _machine: MachineId) {}

    /// A queued job started service (step ③).
    fn on_assignment(&mut self, _assignment: &Assignment) {}

    /// A new job joined the queue (step ④).
    fn on_arrival(&mut self, _job: &Job) {}

    /// Called once the tick has been committed.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
