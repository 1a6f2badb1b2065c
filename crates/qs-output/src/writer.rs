//! The `OutputWriter` trait implemented by all backend writers.

use crate::{CompletionRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of completion rows.
    fn write_completions(&mut self, rows: &[CompletionRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent, so safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
