//! `qs-output`: history writers for the queuesim simulator.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                 |
//! |-----------|---------|-----------------------------------------------|
//! | *(none)*  | CSV     | `tick_summaries.csv`, `completions.csv`       |
//! | `sqlite`  | SQLite  | `output.db`                                   |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `qs_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use qs_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run_ticks(10_000, &mut obs);
//! obs.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CompletionRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
