//! `qs-core`: foundational types for the `queuesim` queueing-network simulator.
//!
//! This crate is a dependency of every other `qs-*` crate.  It has no `qs-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `JobId`, `MachineId`                                       |
//! | [`time`]   | `Tick`, `SimClock` (driver accumulator), `TimeScale`       |
//! | [`rng`]    | `SimRng` (seedable simulation RNG)                         |
//! | [`job`]    | `Job`, `CompletionRecord`                                  |
//! | [`config`] | `SimConfig`                                                |
//! | [`error`]  | `QsError`, `QsResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod job;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{QsError, QsResult};
pub use ids::{JobId, MachineId};
pub use job::{CompletionRecord, Job};
pub use rng::SimRng;
pub use time::{SimClock, TICKS_PER_SECOND, Tick, TimeScale};
