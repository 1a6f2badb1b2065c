//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `tick_summaries` and `completions`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{CompletionRow, OutputResult, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick           INTEGER PRIMARY KEY,
                 queue_len      INTEGER NOT NULL,
                 running_jobs   INTEGER NOT NULL,
                 machines       INTEGER NOT NULL,
                 utilization    REAL    NOT NULL,
                 jobs_completed INTEGER NOT NULL,
                 display_bound  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS completions (
                 job_id         INTEGER PRIMARY KEY,
                 machine_id     INTEGER NOT NULL,
                 arrival_tick   INTEGER NOT NULL,
                 start_tick     INTEGER NOT NULL,
                 completed_tick INTEGER NOT NULL,
                 service_time   REAL    NOT NULL,
                 queue_time     INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_completions(&mut self, rows: &[CompletionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO completions \
                 (job_id, machine_id, arrival_tick, start_tick, completed_tick, service_time, queue_time) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.job_id as i64,
                    row.machine_id,
                    row.arrival_tick as i64,
                    row.start_tick as i64,
                    row.completed_tick as i64,
                    row.service_time,
                    row.queue_time as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, queue_len, running_jobs, machines, utilization, jobs_completed, display_bound) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.tick as i64,
                row.queue_len as i64,
                row.running_jobs as i64,
                row.machines as i64,
                row.utilization,
                row.jobs_completed as i64,
                row.display_bound as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
