//! A single server in the pool.

use qs_core::{CompletionRecord, Job, MachineId, Tick};

/// Whether a machine may receive new work.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MachineStatus {
    /// Eligible for assignment.
    Active,
    /// Finishing its current job (if any); accepts nothing new.
    Removing,
}

/// A machine and the job it currently owns.
///
/// The job and its completion tick are set and cleared together, so an idle
/// machine never carries a stale completion tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Machine {
    pub id:     MachineId,
    pub status: MachineStatus,
    current:    Option<Job>,
    completion: Option<Tick>,
}

impl Machine {
    pub fn new(id: MachineId) -> Self {
        Self { id, status: MachineStatus::Active, current: None, completion: None }
    }

    #[inline]
    pub fn current_job(&self) -> Option<&Job> {
        self.current.as_ref()
    }

    #[inline]
    pub fn completion_time(&self) -> Option<Tick> {
        self.completion
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == MachineStatus::Active
    }

    /// Active and idle.
    #[inline]
    pub fn accepts_work(&self) -> bool {
        self.is_active() && self.is_idle()
    }

    /// Start `job` at `now`.  Returns the completion tick.
    pub(crate) fn assign(&mut self, mut job: Job, now: Tick) -> Tick {
        debug_assert!(self.accepts_work(), "machine {} cannot accept work", self.id);
        let completion = job.begin_service(now);
        self.current = Some(job);
        self.completion = Some(completion);
        completion
    }

    /// If the current job is due at or before `now`, release it and return
    /// its completion record.  The machine is idle afterwards.
    pub(crate) fn finish_due(&mut self, now: Tick) -> Option<CompletionRecord> {
        match self.completion {
            Some(due) if due <= now => {}
            _ => return None,
        }
        self.completion = None;
        let job = self.current.take()?;
        CompletionRecord::from_job(&job, self.id, now)
    }

    /// Ticks until the current job completes, or `None` when idle.
    pub fn remaining(&self, now: Tick) -> Option<u64> {
        self.completion.map(|due| due.since(now))
    }

    /// Fraction of the current job already served, in `[0, 1]`.
    ///
    /// Renderers use this to place a job along its machine lane.
    pub fn progress(&self, now: Tick) -> Option<f64> {
        let job = self.current.as_ref()?;
        let remaining = self.remaining(now)? as f64;
        if job.service_time <= 0.0 {
            return Some(1.0);
        }
        Some((1.0 - remaining / job.service_time).clamp(0.0, 1.0))
    }
}
