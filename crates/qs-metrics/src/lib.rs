//! `qs-metrics`: performance accounting for the queuesim simulator.
//!
//! Nothing here influences scheduling.  Totals only grow; averages and the
//! drain estimate are computed on demand from the current state rather than
//! cached, so they can never go stale.
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`totals`]  | `MetricsTotals`: completion counters and sums          |
//! | [`derived`] | utilization, drain estimate, capacity advice           |
//! | [`history`] | `BoundedHistory` ring buffer                           |
//! | [`scaler`]  | `DisplayScaler`: hysteresis bound for queue meters     |

pub mod derived;
pub mod history;
pub mod scaler;
pub mod totals;


pub use derived::{drain_estimate, needed_machines, utilization_percent};
pub use history::BoundedHistory;
pub use scaler::{DisplayScaler, INITIAL_DISPLAY_BOUND, ScaleChange};
pub use totals::MetricsTotals;
