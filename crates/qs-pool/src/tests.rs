//! Unit tests for the machine pool and scheduling core.

#[cfg(test)]
mod helpers {
    use qs_core::{Job, JobId, Tick};

    use crate::JobQueue;

    pub fn queue_of(service_times: &[f64], arrival: Tick) -> JobQueue {
        let mut q = JobQueue::new();
        for (i, &s) in service_times.iter().enumerate() {
            q.push(Job::new(JobId(i as u64), arrival, s));
        }
        q
    }
}

#[cfg(test)]
mod machine_tests {
    use qs_core::{Job, JobId, MachineId, Tick};

    use crate::{Machine, MachineStatus};

    #[test]
    fn new_machine_is_idle_and_active() {
        let m = Machine::new(MachineId(3));
        assert!(m.is_idle());
        assert!(m.accepts_work());
        assert_eq!(m.status, MachineStatus::Active);
        assert_eq!(m.completion_time(), None);
    }

    #[test]
    fn job_and_completion_set_and_cleared_together() {
        let mut m = Machine::new(MachineId(0));
        let completion = m.assign(Job::new(JobId(0), Tick(1), 3.0), Tick(2));
        assert_eq!(completion, Tick(5));
        assert_eq!(m.completion_time(), Some(Tick(5)));
        assert!(m.current_job().is_some());

        assert!(m.finish_due(Tick(4)).is_none());
        let rec = m.finish_due(Tick(5)).unwrap();
        assert_eq!(rec.queue_time(), 1);
        assert!(m.is_idle());
        assert_eq!(m.completion_time(), None);
    }

    #[test]
    fn progress_moves_along_lane() {
        let mut m = Machine::new(MachineId(0));
        assert_eq!(m.progress(Tick(0)), None);
        m.assign(Job::new(JobId(0), Tick(0), 4.0), Tick(0));
        assert_eq!(m.progress(Tick(0)), Some(0.0));
        assert_eq!(m.progress(Tick(1)), Some(0.25));
        assert_eq!(m.progress(Tick(4)), Some(1.0));
        assert_eq!(m.remaining(Tick(1)), Some(3));
    }
}

#[cfg(test)]
mod queue_tests {
    use qs_core::{Job, JobId, Tick};

    use crate::JobQueue;

    #[test]
    fn fifo_order_and_endpoints() {
        let mut q = JobQueue::new();
        assert_eq!(q.oldest(), None);
        q.push(Job::new(JobId(1), Tick(0), 2.0));
        q.push(Job::new(JobId(2), Tick(0), 3.0));
        q.push(Job::new(JobId(5), Tick(1), 1.5));
        assert_eq!(q.oldest(), Some(JobId(1)));
        assert_eq!(q.newest(), Some(JobId(5)));
        assert_eq!(q.total_service_time(), 6.5);
        assert_eq!(q.pop().map(|j| j.id), Some(JobId(1)));
        assert_eq!(q.pop().map(|j| j.id), Some(JobId(2)));
        assert_eq!(q.len(), 1);
    }
}

#[cfg(test)]
mod registry_tests {
    use qs_core::{Job, JobId, MachineId, Tick};

    use crate::{MachinePool, MachineStatus, ResizeOutcome};

    #[test]
    fn new_pool_has_sequential_ids() {
        let pool = MachinePool::new(3);
        let ids: Vec<_> = pool.iter().map(|m| m.id).collect();
        assert_eq!(ids, [MachineId(0), MachineId(1), MachineId(2)]);
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn grow_continues_id_sequence() {
        let mut pool = MachinePool::new(2);
        let out = pool.resize(4);
        assert_eq!(out.added, [MachineId(2), MachineId(3)]);
        assert!(out.marked.is_empty());
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn shrink_marks_highest_ids() {
        let mut pool = MachinePool::new(4);
        let out = pool.resize(2);
        assert_eq!(out.marked, [MachineId(2), MachineId(3)]);
        assert_eq!(pool.get(MachineId(3)).unwrap().status, MachineStatus::Removing);
        assert_eq!(pool.get(MachineId(1)).unwrap().status, MachineStatus::Active);
        // Still present until finalized.
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.finalize_removals(), [MachineId(2), MachineId(3)]);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn busy_removing_machine_is_kept() {
        let mut pool = MachinePool::new(2);
        let mut queue = crate::JobQueue::new();
        queue.push(Job::new(JobId(0), Tick(0), 1.0));
        queue.push(Job::new(JobId(1), Tick(0), 5.0));
        crate::assign_fifo(&mut pool, &mut queue, Tick(0));

        pool.resize(1);
        assert!(pool.finalize_removals().is_empty());
        let draining = pool.get(MachineId(1)).unwrap();
        assert_eq!(draining.status, MachineStatus::Removing);
        assert_eq!(draining.current_job().map(|j| j.id), Some(JobId(1)));
    }

    #[test]
    fn regrow_while_draining_adds_fresh_machines() {
        let mut pool = MachinePool::new(3);
        let mut queue = crate::JobQueue::new();
        for i in 0..3 {
            queue.push(Job::new(JobId(i), Tick(0), 10.0));
        }
        crate::assign_fifo(&mut pool, &mut queue, Tick(0));
        pool.resize(1);
        let out = pool.resize(2);
        assert_eq!(out.added, [MachineId(3)]);
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.removing_count(), 2);
    }

    #[test]
    fn resize_to_same_is_noop() {
        let mut pool = MachinePool::new(3);
        assert_eq!(pool.resize(3), ResizeOutcome::default());
    }
}

#[cfg(test)]
mod scheduler_tests {
    use qs_core::{JobId, MachineId, Tick};

    use super::helpers::queue_of;
    use crate::{MachinePool, assign_fifo, collect_completions};

    #[test]
    fn assignment_is_fifo_and_ascending_by_machine() {
        let mut pool = MachinePool::new(2);
        let mut queue = queue_of(&[3.0, 1.0, 2.0], Tick(0));
        let out = assign_fifo(&mut pool, &mut queue, Tick(1));
        assert_eq!(out.len(), 2);
        assert_eq!((out[0].job, out[0].machine), (JobId(0), MachineId(0)));
        assert_eq!((out[1].job, out[1].machine), (JobId(1), MachineId(1)));
        assert_eq!(out[0].completion, Tick(4));
        assert_eq!(queue.oldest(), Some(JobId(2)));
    }

    #[test]
    fn removing_machine_gets_no_work() {
        let mut pool = MachinePool::new(2);
        pool.resize(1);
        let mut queue = queue_of(&[1.0, 1.0], Tick(0));
        let out = assign_fifo(&mut pool, &mut queue, Tick(0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].machine, MachineId(0));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn completion_frees_machine_for_same_tick_assignment() {
        let mut pool = MachinePool::new(1);
        let mut queue = queue_of(&[2.0, 2.0], Tick(0));
        assign_fifo(&mut pool, &mut queue, Tick(0));

        let done = collect_completions(&mut pool, Tick(2));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].job, JobId(0));

        let out = assign_fifo(&mut pool, &mut queue, Tick(2));
        assert_eq!(out[0].job, JobId(1));
        assert_eq!(out[0].start, Tick(2));
    }

    #[test]
    fn nothing_completes_early() {
        let mut pool = MachinePool::new(1);
        let mut queue = queue_of(&[5.0], Tick(0));
        assign_fifo(&mut pool, &mut queue, Tick(0));
        for t in 0..5 {
            assert!(collect_completions(&mut pool, Tick(t)).is_empty());
        }
        assert_eq!(collect_completions(&mut pool, Tick(5)).len(), 1);
    }

    #[test]
    fn total_remaining_sums_in_service_work() {
        let mut pool = MachinePool::new(3);
        let mut queue = queue_of(&[4.0, 6.0], Tick(0));
        assign_fifo(&mut pool, &mut queue, Tick(0));
        assert_eq!(pool.total_remaining(Tick(1)), 3 + 5);
        assert_eq!(pool.busy_count(), 2);
    }

    #[test]
    fn huge_service_times_saturate() {
        let mut pool = MachinePool::new(2);
        let mut queue = queue_of(&[1.5e19, 1.5e19], Tick(0));
        let assigned = assign_fifo(&mut pool, &mut queue, Tick(3));
        assert_eq!(assigned.len(), 2);
        assert_eq!(pool.total_remaining(Tick(3)), u64::MAX);

        let mut pool = MachinePool::new(1);
        let mut queue = queue_of(&[1e20], Tick(0));
        let assigned = assign_fifo(&mut pool, &mut queue, Tick(7));
        assert_eq!(assigned[0].completion, Tick(u64::MAX));
    }
}
