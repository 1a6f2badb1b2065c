//! `MachinePool`: owns every machine and its lifecycle.
//!
//! Machines are stored in ascending `MachineId` order.  New machines always
//! receive a fresh id from a monotonic counter, so appending keeps the order
//! and ids are never reused within a run.

use qs_core::{MachineId, Tick};
use tracing::debug;

use crate::{Machine, MachineStatus};

/// What a [`MachinePool::resize`] call changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResizeOutcome {
    /// Machines appended as `Active`.
    pub added:  Vec<MachineId>,
    /// Machines newly marked `Removing`.
    pub marked: Vec<MachineId>,
}

/// The ordered set of live machines (active and draining).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MachinePool {
    machines: Vec<Machine>,
    next_id:  MachineId,
}

impl MachinePool {
    /// A pool of `count` idle, active machines with ids `0..count`.
    pub fn new(count: usize) -> Self {
        let mut pool = Self::default();
        pool.grow(count);
        pool
    }

    /// Live machines, ascending by id.
    #[inline]
    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn iter(&self) -> impl Iterator<Item = &Machine> {
        self.machines.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Machine> {
        self.machines.iter_mut()
    }

    pub fn get(&self, id: MachineId) -> Option<&Machine> {
        self.machines
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|i| &self.machines[i])
    }

    /// Live machine count, including machines still draining.
    #[inline]
    pub fn len(&self) -> usize {
        self.machines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.machines.iter().filter(|m| m.is_active()).count()
    }

    pub fn removing_count(&self) -> usize {
        self.machines.len() - self.active_count()
    }

    /// Machines currently holding a job.
    pub fn busy_count(&self) -> usize {
        self.machines.iter().filter(|m| !m.is_idle()).count()
    }

    /// Sum of remaining ticks over every in-service job, saturating at
    /// `u64::MAX`.
    pub fn total_remaining(&self, now: Tick) -> u64 {
        self.machines
            .iter()
            .filter_map(|m| m.remaining(now))
            .fold(0, u64::saturating_add)
    }

    /// Bring the number of *active* machines to `target`.
    ///
    /// Growing appends fresh machines.  Shrinking marks the highest-id active
    /// machines `Removing` and leaves their jobs untouched; they disappear
    /// later via [`finalize_removals`][Self::finalize_removals].  Until they
    /// drain, [`len`][Self::len] may exceed `target`.
    pub fn resize(&mut self, target: usize) -> ResizeOutcome {
        let active = self.active_count();
        let mut outcome = ResizeOutcome::default();

        if target > active {
            outcome.added = self.grow(target - active);
        } else if target < active {
            let mut excess = active - target;
            for machine in self.machines.iter_mut().rev() {
                if excess == 0 {
                    break;
                }
                if machine.is_active() {
                    machine.status = MachineStatus::Removing;
                    debug!(machine = %machine.id, busy = !machine.is_idle(), "machine marked removing");
                    outcome.marked.push(machine.id);
                    excess -= 1;
                }
            }
            outcome.marked.reverse();
        }
        outcome
    }

    /// Drop every machine that is both `Removing` and idle.  Returns the ids
    /// removed, ascending.
    pub fn finalize_removals(&mut self) -> Vec<MachineId> {
        let mut removed = Vec::new();
        self.machines.retain(|m| {
            let drop = m.status == MachineStatus::Removing && m.is_idle();
            if drop {
                removed.push(m.id);
            }
            !drop
        });
        for id in &removed {
            debug!(machine = %id, "machine removed");
        }
        removed
    }

    fn grow(&mut self, n: usize) -> Vec<MachineId> {
        let mut added = Vec::with_capacity(n);
        for _ in 0..n {
            let id = self.next_id;
            self.next_id = id.next();
            self.machines.push(Machine::new(id));
            added.push(id);
        }
        if !added.is_empty() {
            debug!(count = n, first = %added[0], "machines added");
        }
        added
    }
}
