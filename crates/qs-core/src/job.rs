//! Jobs and completion records.

use crate::{JobId, MachineId, Tick};

/// A unit of work that arrives, waits in the queue, and occupies one machine
/// for `service_time` ticks.
///
/// Everything except the service start is fixed at creation.  The service
/// start is set exactly once, by [`begin_service`][Self::begin_service].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job {
    pub id:           JobId,
    /// Tick at which the job entered the queue.
    pub arrival:      Tick,
    /// Non-negative service requirement, in ticks.
    pub service_time: f64,
    service_start:    Option<Tick>,
}

impl Job {
    /// Create a queued job.  Negative or non-finite service times are
    /// absorbed as zero-length work.
    pub fn new(id: JobId, arrival: Tick, service_time: f64) -> Self {
        let service_time = if service_time.is_finite() { service_time.max(0.0) } else { 0.0 };
        Self { id, arrival, service_time, service_start: None }
    }

    /// The tick service began, or `None` while queued.
    #[inline]
    pub fn service_start(&self) -> Option<Tick> {
        self.service_start
    }

    /// Whole ticks the job occupies a machine: `ceil(service_time)`.
    #[inline]
    pub fn service_ticks(&self) -> u64 {
        self.service_time.ceil() as u64
    }

    /// Record the start of service at `at` and return the completion tick.
    ///
    /// # Panics
    /// Panics in debug mode if service already began or `at` precedes arrival.
    pub fn begin_service(&mut self, at: Tick) -> Tick {
        debug_assert!(
            self.service_start.is_none(),
            "job {} already started service at {:?}",
            self.id,
            self.service_start
        );
        debug_assert!(at >= self.arrival, "job {} started before it arrived", self.id);
        self.service_start = Some(at);
        at.offset(self.service_ticks())
    }

    /// Ticks spent waiting, once service has begun.
    #[inline]
    pub fn queue_time(&self) -> Option<u64> {
        self.service_start.map(|start| start.since(self.arrival))
    }
}

/// What the metrics aggregator and output writers see when a job finishes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletionRecord {
    pub job:           JobId,
    pub machine:       MachineId,
    pub arrival:       Tick,
    pub service_start: Tick,
    pub completed_at:  Tick,
    pub service_time:  f64,
}

impl CompletionRecord {
    /// Build the record for `job`, which must have begun service.
    /// Returns `None` for a job that never started.
    pub fn from_job(job: &Job, machine: MachineId, completed_at: Tick) -> Option<Self> {
        Some(Self {
            job: job.id,
            machine,
            arrival: job.arrival,
            service_start: job.service_start?,
            completed_at,
            service_time: job.service_time,
        })
    }

    /// `service_start - arrival`, in ticks.
    #[inline]
    pub fn queue_time(&self) -> u64 {
        self.service_start.since(self.arrival)
    }
}
