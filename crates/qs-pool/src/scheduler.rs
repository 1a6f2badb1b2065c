//! Completion detection and FIFO work-conserving assignment.
//!
//! Both functions operate on one logical tick `now` and are called by the
//! tick orchestrator in a fixed order: completions first (freeing machines),
//! then drained machines are finalized, then assignment.  Running completion
//! detection before assignment lets a machine freed at `now` pick up work in
//! the same tick.

use qs_core::{CompletionRecord, JobId, MachineId, Tick};
use tracing::trace;

use crate::{JobQueue, MachinePool};

/// One queue-head-to-machine hand-off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub job:        JobId,
    pub machine:    MachineId,
    pub start:      Tick,
    pub completion: Tick,
}

/// Release every job whose completion tick is `<= now`.
///
/// Returns one record per finished job, in machine-id order.  Draining
/// machines complete exactly like active ones; nothing is preempted.
pub fn collect_completions(pool: &mut MachinePool, now: Tick) -> Vec<CompletionRecord> {
    let mut done = Vec::new();
    for machine in pool.iter_mut() {
        if let Some(record) = machine.finish_due(now) {
            trace!(
                job = %record.job,
                machine = %record.machine,
                queue_time = record.queue_time(),
                service_time = record.service_time,
                "job completed"
            );
            done.push(record);
        }
    }
    done
}

/// Hand queued jobs to idle active machines in ascending id order until one
/// side runs out.
///
/// Strict FIFO: the queue head always goes to the lowest-id eligible machine.
pub fn assign_fifo(pool: &mut MachinePool, queue: &mut JobQueue, now: Tick) -> Vec<Assignment> {
    let mut assigned = Vec::new();
    for machine in pool.iter_mut().filter(|m| m.accepts_work()) {
        let Some(job) = queue.pop() else { break };
        let job_id = job.id;
        let completion = machine.assign(job, now);
        trace!(job = %job_id, machine = %machine.id, %completion, "job assigned");
        assigned.push(Assignment { job: job_id, machine: machine.id, start: now, completion });
    }
    assigned
}
