//! Stochastic job arrivals.

use qs_core::{Job, JobId, SimRng, TICKS_PER_SECOND, Tick};

/// Creates jobs with strictly increasing ids.
///
/// Random arrivals and directly submitted jobs share one id sequence, so id
/// order is always creation order.
#[derive(Clone, Debug, Default)]
pub struct JobGenerator {
    next_id: JobId,
}

impl JobGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total jobs created so far.
    #[inline]
    pub fn created(&self) -> u64 {
        self.next_id.0
    }

    /// Create a job arriving at `arrival` with a fixed service time.
    pub fn create(&mut self, arrival: Tick, service_time: f64) -> Job {
        let id = self.next_id;
        self.next_id = id.next();
        Job::new(id, arrival, service_time)
    }

    /// One arrival trial for tick `now`.
    ///
    /// With probability `arrival_rate / TICKS_PER_SECOND` returns a job whose
    /// service time is uniform in `[0, 2 * avg_service_time)`.  A rate `<= 0`
    /// never arrives and consumes no randomness; an average `<= 0` yields
    /// zero-length jobs.
    pub fn maybe_arrive(
        &mut self,
        rng:              &mut SimRng,
        now:              Tick,
        arrival_rate:     f64,
        avg_service_time: f64,
    ) -> Option<Job> {
        if arrival_rate.is_nan() || arrival_rate <= 0.0 {
            return None;
        }
        if !rng.gen_bool(arrival_rate / TICKS_PER_SECOND as f64) {
            return None;
        }
        let upper = 2.0 * avg_service_time;
        let service_time = if upper > 0.0 && upper.is_finite() {
            rng.gen_range(0.0..upper)
        } else {
            0.0
        };
        Some(self.create(now, service_time))
    }
}
