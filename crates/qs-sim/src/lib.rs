//! `qs-sim`: tick orchestrator for the queuesim simulator.
//!
//! # Tick algorithm
//!
//! ```text
//! now = current + 1
//!   ① Completions release every job with completion <= now; record totals.
//!   ② Shrink      drop machines that are Removing and now idle.
//!   ③ Assignment  queue head → lowest-id idle Active machine, repeat.
//!   ④ Arrival     at most one new job, probability arrival_rate / 60.
//!   ⑤ History     queue length, utilization, capacity advice.
//!   ⑥ Display     hysteresis update of the queue-meter bound.
//! current = now
//! ```
//!
//! The order is load-bearing: ① frees machines that ③ can reuse in the same
//! tick, and ② runs before ③ so a draining machine never receives work.
//! The whole sequence runs inside one `&mut self` call, so no reader ever
//! observes a partial tick.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use qs_core::SimConfig;
//! use qs_sim::SimBuilder;
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! sim.start();
//! // From a frame callback: one frame = one tick at 1x.
//! sim.advance(1.0);
//! println!("{:?}", sim.metrics());
//! ```

pub mod builder;
pub mod error;
pub mod generator;
pub mod observer;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use generator::JobGenerator;
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use sim::{Sim, SimState};
pub use snapshot::{Metrics, SimSnapshot};
