//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_summaries.csv`
//! - `completions.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CompletionRow, OutputResult, TickSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    summaries:   Writer<File>,
    completions: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "queue_len",
            "running_jobs",
            "machines",
            "utilization",
            "jobs_completed",
            "display_bound",
        ])?;

        let mut completions = Writer::from_path(dir.join("completions.csv"))?;
        completions.write_record([
            "job_id",
            "machine_id",
            "arrival_tick",
            "start_tick",
            "completed_tick",
            "service_time",
            "queue_time",
        ])?;

        Ok(Self { summaries, completions, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_completions(&mut self, rows: &[CompletionRow]) -> OutputResult<()> {
        for row in rows {
            self.completions.write_record(&[
                row.job_id.to_string(),
                row.machine_id.to_string(),
                row.arrival_tick.to_string(),
                row.start_tick.to_string(),
                row.completed_tick.to_string(),
                format!("{:.3}", row.service_time),
                row.queue_time.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.queue_len.to_string(),
            row.running_jobs.to_string(),
            row.machines.to_string(),
            format!("{:.2}", row.utilization),
            row.jobs_completed.to_string(),
            row.display_bound.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.completions.flush()?;
        Ok(())
    }
}
