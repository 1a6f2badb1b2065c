//! Pure functions over a single tick's state.

use qs_core::TICKS_PER_SECOND;

/// `busy / total * 100`, or `0` for an empty pool.
pub fn utilization_percent(busy: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    busy as f64 / total as f64 * 100.0
}

/// Rough time (ticks) to clear all current work with no further arrivals.
///
/// Spreads queued service time plus remaining in-service time evenly across
/// `machines`.  This ignores queue discipline and per-job granularity, so it
/// is a heuristic, not a projection.  Returns `0` for an empty pool.
pub fn drain_estimate(queued_service: f64, in_service_remaining: u64, machines: usize) -> f64 {
    if machines == 0 {
        return 0.0;
    }
    (queued_service + in_service_remaining as f64) / machines as f64
}

/// Extra machines needed to clear the outstanding work within one simulated
/// second.  `0` unless the drain estimate already exceeds one second.
pub fn needed_machines(total_remaining: f64, machines: usize) -> u64 {
    let per_second = TICKS_PER_SECOND as f64;
    if drain_estimate(total_remaining, 0, machines) <= per_second {
        return 0;
    }
    let wanted = (total_remaining / per_second).ceil() as u64;
    wanted.saturating_sub(machines as u64)
}
