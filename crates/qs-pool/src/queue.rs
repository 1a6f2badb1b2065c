//! `JobQueue`: the single arrival-ordered waiting line.

use std::collections::VecDeque;

use qs_core::{Job, JobId};

/// FIFO queue of jobs awaiting assignment.
///
/// Jobs enter at the tail in creation order and leave from the head; there
/// is no reordering, priority, or removal from the middle.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobQueue {
    inner: VecDeque<Job>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, job: Job) {
        debug_assert!(
            self.inner.back().is_none_or(|last| last.id < job.id),
            "job {} enqueued out of creation order",
            job.id
        );
        self.inner.push_back(job);
    }

    pub fn pop(&mut self) -> Option<Job> {
        self.inner.pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Head-to-tail iteration (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.inner.iter()
    }

    /// Id of the job that will be assigned next.
    pub fn oldest(&self) -> Option<JobId> {
        self.inner.front().map(|j| j.id)
    }

    /// Id of the most recent arrival.
    pub fn newest(&self) -> Option<JobId> {
        self.inner.back().map(|j| j.id)
    }

    /// Sum of `service_time` over every queued job.
    pub fn total_service_time(&self) -> f64 {
        self.inner.iter().map(|j| j.service_time).sum()
    }
}
