//! The `Sim` state store and its tick loop.

use qs_core::{Job, JobId, SimClock, SimConfig, SimRng, TICKS_PER_SECOND, Tick, TimeScale};
use qs_metrics::{
    BoundedHistory, DisplayScaler, MetricsTotals, drain_estimate, needed_machines,
    utilization_percent,
};
use qs_pool::{JobQueue, Machine, MachinePool, assign_fifo, collect_completions};
use tracing::{debug, info, trace};

use crate::{Metrics, NoopObserver, SimError, SimObserver, SimResult, SimSnapshot, TickStats};

// ── SimState ──────────────────────────────────────────────────────────────────

/// Everything that `reset` throws away: clock, queue, pool, totals, and
/// histories.  Rebuilt wholesale from the configuration, never patched.
#[derive(Debug)]
pub struct SimState {
    /// Current tick plus the driver's fractional carry.
    pub clock: SimClock,

    /// Jobs awaiting service, oldest first.
    pub queue: JobQueue,

    /// Live machines (active and draining), ascending by id.
    pub pool: MachinePool,

    /// Completion counters since the last reset.
    pub totals: MetricsTotals,

    /// Id source for both random arrivals and submitted jobs.
    pub generator: crate::JobGenerator,

    /// Recent queue lengths; also the display scaler's window.
    pub queue_history: BoundedHistory<usize>,

    /// Utilization percentage per tick, unbounded.
    pub utilization_history: Vec<f64>,

    /// Capacity advice per tick, unbounded.
    pub needed_machines_history: Vec<u64>,

    /// Adaptive queue-meter bound.
    pub scaler: DisplayScaler,
}

impl SimState {
    fn new(config: &SimConfig, initial_bound: usize) -> Self {
        Self {
            clock:                   SimClock::new(),
            queue:                   JobQueue::new(),
            pool:                    MachinePool::new(config.machine_count),
            totals:                  MetricsTotals::default(),
            generator:               crate::JobGenerator::new(),
            queue_history:           BoundedHistory::new(config.queue_history_len.max(1)),
            utilization_history:     Vec::new(),
            needed_machines_history: Vec::new(),
            scaler:                  DisplayScaler::new(initial_bound),
        }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// One independent simulation.
///
/// `Sim` owns its state exclusively; every mutation goes through a method
/// call, so any number of instances can run side by side.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
#[derive(Debug)]
pub struct Sim {
    /// Live configuration.  Change it through the setters so the pool and
    /// clock stay in step.
    config: SimConfig,

    running: bool,

    rng: SimRng,

    initial_bound: usize,

    state: SimState,
}

impl Sim {
    pub(crate) fn from_parts(config: SimConfig, initial_bound: usize, running: bool) -> Self {
        let state = SimState::new(&config, initial_bound);
        Self {
            rng: SimRng::new(config.seed),
            config,
            running,
            initial_bound,
            state,
        }
    }

    // ── Actions ───────────────────────────────────────────────────────────

    /// Let driver ticks take effect.
    pub fn start(&mut self) {
        if !self.running {
            info!(tick = %self.now(), "simulation started");
        }
        self.running = true;
    }

    /// Make subsequent ticks no-ops.  State is preserved.
    pub fn stop(&mut self) {
        if self.running {
            info!(tick = %self.now(), "simulation stopped");
        }
        self.running = false;
    }

    /// Replace the whole state with a fresh one sized to the configured
    /// machine count, stop, and re-seed the RNG.
    pub fn reset(&mut self) {
        self.state = SimState::new(&self.config, self.initial_bound);
        self.rng = SimRng::new(self.config.seed);
        self.running = false;
        info!(machines = self.config.machine_count, "simulation reset");
    }

    /// Run one tick with no observer.  A no-op while stopped.
    pub fn tick(&mut self) {
        self.tick_with(&mut NoopObserver);
    }

    /// Run one tick, reporting events to `observer`.  A no-op while stopped.
    pub fn tick_with<O: SimObserver>(&mut self, observer: &mut O) {
        if !self.running {
            return;
        }

        let config = &self.config;
        let rng = &mut self.rng;
        let state = &mut self.state;
        let now = state.clock.next_tick();
        observer.on_tick_start(now);

        // ── ① Completion detection ────────────────────────────────────────
        for record in collect_completions(&mut state.pool, now) {
            state.totals.record(&record);
            observer.on_completion(&record);
        }

        // ── ② Shrink finalization ─────────────────────────────────────────
        for machine in state.pool.finalize_removals() {
            observer.on_machine_removed(now, machine);
        }

        // ── ③ Assignment ──────────────────────────────────────────────────
        for assignment in assign_fifo(&mut state.pool, &mut state.queue, now) {
            observer.on_assignment(&assignment);
        }

        // ── ④ Arrival ─────────────────────────────────────────────────────
        if let Some(job) =
            state.generator.maybe_arrive(rng, now, config.arrival_rate, config.avg_service_time)
        {
            trace!(job = %job.id, %now, service_time = job.service_time, "job arrived");
            observer.on_arrival(&job);
            state.queue.push(job);
        }

        // ── ⑤ Metrics / history ───────────────────────────────────────────
        let queue_len = state.queue.len();
        let busy = state.pool.busy_count();
        let machines = state.pool.len();
        let utilization = utilization_percent(busy, machines);
        let outstanding =
            state.queue.total_service_time() + state.pool.total_remaining(now) as f64;

        state.queue_history.push(queue_len);
        state.utilization_history.push(utilization);
        state.needed_machines_history.push(needed_machines(outstanding, machines));

        // ── ⑥ Display scale ───────────────────────────────────────────────
        state.scaler.update(queue_len, &state.queue_history);

        state.clock.advance();

        let stats = TickStats {
            queue_len,
            running_jobs: busy,
            machines,
            utilization,
            jobs_completed: state.totals.jobs_completed,
            display_bound: state.scaler.bound(),
        };
        observer.on_tick_end(now, &stats);
    }

    /// Run up to `n` ticks back to back.  Returns how many actually ran
    /// (zero while stopped).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> u64 {
        if !self.running {
            return 0;
        }
        for _ in 0..n {
            self.tick_with(observer);
        }
        n
    }

    // ── Driver ────────────────────────────────────────────────────────────

    /// Feed an external delta (in frames: one frame is one tick at 1×) into
    /// the clock and run however many whole ticks are now due.
    ///
    /// While stopped, the delta and any carried fraction are discarded.
    pub fn advance(&mut self, delta: f64) -> u64 {
        self.advance_with(delta, &mut NoopObserver)
    }

    pub fn advance_with<O: SimObserver>(&mut self, delta: f64, observer: &mut O) -> u64 {
        if !self.running {
            self.state.clock.discard_carry();
            return 0;
        }
        let due = self.state.clock.accumulate(delta, self.config.time_scale);
        self.run_ticks(due, observer)
    }

    /// [`advance`][Self::advance] with a wall-clock delta in seconds.
    pub fn advance_secs(&mut self, secs: f64) -> u64 {
        self.advance(secs * TICKS_PER_SECOND as f64)
    }

    // ── Configuration ─────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Jobs per simulated second.  Negative or non-finite input disables
    /// arrivals.
    pub fn set_arrival_rate(&mut self, rate: f64) {
        self.config.arrival_rate = non_negative(rate);
        debug!(rate = self.config.arrival_rate, "arrival rate set");
    }

    /// Mean service requirement.  Negative or non-finite input yields
    /// zero-length jobs.
    pub fn set_avg_service_time(&mut self, avg: f64) {
        self.config.avg_service_time = non_negative(avg);
        debug!(avg = self.config.avg_service_time, "average service time set");
    }

    /// Resize the pool without interrupting in-flight work.
    ///
    /// Rejects `0`: at least one machine must remain.
    pub fn set_machine_count(&mut self, count: usize) -> SimResult<()> {
        if count == 0 {
            return Err(SimError::Config("machine count must be at least 1".into()));
        }
        self.config.machine_count = count;
        let outcome = self.state.pool.resize(count);
        info!(
            target_count = count,
            added = outcome.added.len(),
            draining = outcome.marked.len(),
            "machine pool resized"
        );
        Ok(())
    }

    /// Values `<= 0` pause the driver without stopping the simulation.
    pub fn set_time_scale(&mut self, scale: TimeScale) {
        self.config.time_scale = scale;
        debug!(%scale, "time scale set");
    }

    // ── Direct job submission ─────────────────────────────────────────────

    /// Append a job with a fixed service time to the queue tail.
    ///
    /// The job is stamped with the tick at which it is first considered for
    /// assignment (the next tick), so on an idle pool it starts with zero
    /// queue time.
    pub fn submit_job(&mut self, service_time: f64) -> JobId {
        let arrival = self.state.clock.next_tick();
        let job = self.state.generator.create(arrival, service_time);
        let id = job.id;
        trace!(job = %id, %arrival, service_time = job.service_time, "job submitted");
        self.state.queue.push(job);
        id
    }

    // ── Read accessors ────────────────────────────────────────────────────

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The last committed tick.
    #[inline]
    pub fn now(&self) -> Tick {
        self.state.clock.current_tick
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn queue(&self) -> impl Iterator<Item = &Job> {
        self.state.queue.iter()
    }

    pub fn machines(&self) -> &[Machine] {
        self.state.pool.machines()
    }

    pub fn totals(&self) -> &MetricsTotals {
        &self.state.totals
    }

    pub fn queue_history(&self) -> &BoundedHistory<usize> {
        &self.state.queue_history
    }

    pub fn utilization_history(&self) -> &[f64] {
        &self.state.utilization_history
    }

    pub fn needed_machines_history(&self) -> &[u64] {
        &self.state.needed_machines_history
    }

    pub fn display_bound(&self) -> usize {
        self.state.scaler.bound()
    }

    /// Derived metrics for the current state.
    pub fn metrics(&self) -> Metrics {
        let state = &self.state;
        let now = self.now();
        Metrics {
            queue_length:         state.queue.len(),
            running_jobs:         state.pool.busy_count(),
            jobs_completed:       state.totals.jobs_completed,
            jobs_created:         state.generator.created(),
            avg_service_time:     state.totals.avg_service_time(),
            avg_queue_time:       state.totals.avg_queue_time(),
            estimated_drain_time: drain_estimate(
                state.queue.total_service_time(),
                state.pool.total_remaining(now),
                state.pool.len(),
            ),
        }
    }

    /// An owned copy of everything collaborators read.
    pub fn snapshot(&self) -> SimSnapshot {
        let state = &self.state;
        SimSnapshot {
            tick:                    self.now(),
            running:                 self.running,
            time_scale:              self.config.time_scale,
            queue:                   state.queue.iter().cloned().collect(),
            oldest_queued:           state.queue.oldest(),
            newest_queued:           state.queue.newest(),
            machines:                state.pool.machines().to_vec(),
            metrics:                 self.metrics(),
            queue_history:           state.queue_history.to_vec(),
            utilization_history:     state.utilization_history.clone(),
            needed_machines_history: state.needed_machines_history.clone(),
            display_bound:           state.scaler.bound(),
        }
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
