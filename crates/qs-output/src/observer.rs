//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use qs_core::{CompletionRecord, Tick};
use qs_sim::{SimObserver, TickStats};
use tracing::warn;

use crate::row::{CompletionRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries and completion rows to any
/// [`OutputWriter`] backend.
///
/// Completions are buffered during a tick and written as one batch when the
/// tick ends.  Errors from the writer are stored internally because
/// `SimObserver` methods have no return value; check them with
/// [`take_error`][Self::take_error] or [`finish`][Self::finish].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:           W,
    summary_interval: u64,
    pending:          Vec<CompletionRow>,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Write a summary row for every tick.
    pub fn new(writer: W) -> Self {
        Self::with_interval(writer, 1)
    }

    /// Write a summary row only on ticks divisible by `interval`.
    /// Completions are always written.  `0` disables summaries.
    pub fn with_interval(writer: W, interval: u64) -> Self {
        Self {
            writer,
            summary_interval: interval,
            pending:          Vec::new(),
            last_error:       None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush buffered rows and close the writer, surfacing the first error
    /// seen during the run.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.flush_pending();
        let result = self.writer.finish();
        self.store_err(result);
        match self.last_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.pending);
        let result = self.writer.write_completions(&rows);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_completion(&mut self, record: &CompletionRecord) {
        self.pending.push(CompletionRow::from(record));
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.flush_pending();
        if self.summary_interval > 0 && tick.0 % self.summary_interval == 0 {
            let row = TickSummaryRow::new(tick.0, stats);
            let result = self.writer.write_tick_summary(&row);
            self.store_err(result);
        }
    }
}
