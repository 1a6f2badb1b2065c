//! `qs-pool`: the machine pool and the scheduling core.
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`machine`]   | `Machine`, `MachineStatus`                                |
//! | [`registry`]  | `MachinePool`: growth, drain-before-remove shrink         |
//! | [`queue`]     | `JobQueue`: arrival-ordered FIFO                          |
//! | [`scheduler`] | completion detection and FIFO work-conserving assignment  |
//!
//! # Machine lifecycle
//!
//! ```text
//!   resize up ──► Active ──resize down──► Removing ──idle──► (dropped)
//! ```
//!
//! A `Removing` machine keeps its current job until it completes naturally
//! and is never handed new work.  It leaves the pool only through
//! [`MachinePool::finalize_removals`].

pub mod machine;
pub mod queue;
pub mod registry;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use machine::{Machine, MachineStatus};
pub use queue::JobQueue;
pub use registry::{MachinePool, ResizeOutcome};
pub use scheduler::{Assignment, assign_fifo, collect_completions};
