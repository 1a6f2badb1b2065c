//! Integration tests for qs-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{CompletionRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn completion_row(job_id: u64, machine_id: u32) -> CompletionRow {
        CompletionRow {
            job_id,
            machine_id,
            arrival_tick:   3,
            start_tick:     5,
            completed_tick: 12,
            service_time:   6.25,
            queue_time:     2,
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            queue_len:      4,
            running_jobs:   2,
            machines:       3,
            utilization:    200.0 / 3.0,
            jobs_completed: tick,
            display_bound:  50,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("completions.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["tick", "queue_len", "running_jobs", "machines", "utilization", "jobs_completed", "display_bound"]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("completions.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers2,
            ["job_id", "machine_id", "arrival_tick", "start_tick", "completed_tick", "service_time", "queue_time"]
        );
    }

    #[test]
    fn csv_completion_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_completions(&[completion_row(0, 1), completion_row(1, 0)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("completions.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 2);
        assert_eq!(&read_rows[0][0], "0");     // job_id
        assert_eq!(&read_rows[0][1], "1");     // machine_id
        assert_eq!(&read_rows[0][5], "6.250"); // service_time
        assert_eq!(&read_rows[0][6], "2");     // queue_time
        assert_eq!(&read_rows[1][0], "1");
    }

    #[test]
    fn csv_tick_summary_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(9)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        assert_eq!(&read_rows[0][0], "9");     // tick
        assert_eq!(&read_rows[0][4], "66.67"); // utilization
        assert_eq!(&read_rows[0][6], "50");    // display_bound
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_completions_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_completions(&[]).unwrap();
    }

    #[test]
    fn missing_dir_is_error() {
        let dir = tmp();
        let result = CsvWriter::new(&dir.path().join("does/not/exist"));
        assert!(result.is_err());
    }
}

// ── Observer tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use qs_core::SimConfig;
    use qs_sim::{Sim, SimBuilder};
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::{CompletionRow, TickSummaryRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    /// In-memory writer for inspecting exactly what the observer emits.
    #[derive(Default)]
    struct MemWriter {
        completions:  Vec<CompletionRow>,
        summaries:    Vec<TickSummaryRow>,
        batches:      usize,
        finish_calls: usize,
        fail:         bool,
    }

    impl OutputWriter for MemWriter {
        fn write_completions(&mut self, rows: &[CompletionRow]) -> OutputResult<()> {
            if self.fail {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.batches += 1;
            self.completions.extend_from_slice(rows);
            Ok(())
        }

        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finish_calls += 1;
            Ok(())
        }
    }

    fn quiet_sim(machines: usize) -> Sim {
        let config = SimConfig { arrival_rate: 0.0, machine_count: machines, ..SimConfig::default() };
        SimBuilder::new(config).running(true).build().unwrap()
    }

    #[test]
    fn completions_batched_per_tick() {
        let mut sim = quiet_sim(5);
        for _ in 0..3 {
            sim.submit_job(2.0);
        }
        let mut obs = SimOutputObserver::new(MemWriter::default());
        sim.run_ticks(5, &mut obs);
        obs.finish().unwrap();
        let w = obs.into_writer();

        // All three start at T1 and finish together at T3.
        assert_eq!(w.completions.len(), 3);
        assert_eq!(w.batches, 1);
        let first = w.completions[0];
        assert_eq!((first.job_id, first.machine_id), (0, 0));
        assert_eq!((first.arrival_tick, first.start_tick, first.completed_tick), (1, 1, 3));
        assert_eq!(first.queue_time, 0);

        assert_eq!(w.summaries.len(), 5);
        assert_eq!(w.summaries[0].running_jobs, 3);
        assert_eq!(w.summaries[2].running_jobs, 0);
        assert_eq!(w.summaries[4].jobs_completed, 3);
        assert_eq!(w.finish_calls, 1);
    }

    #[test]
    fn summary_interval_skips_ticks() {
        let mut sim = quiet_sim(2);
        let mut obs = SimOutputObserver::with_interval(MemWriter::default(), 2);
        sim.run_ticks(6, &mut obs);
        let w = obs.into_writer();
        let ticks: Vec<u64> = w.summaries.iter().map(|r| r.tick).collect();
        assert_eq!(ticks, [2, 4, 6]);
    }

    #[test]
    fn zero_interval_disables_summaries() {
        let mut sim = quiet_sim(1);
        sim.submit_job(1.0);
        let mut obs = SimOutputObserver::with_interval(MemWriter::default(), 0);
        sim.run_ticks(4, &mut obs);
        let w = obs.into_writer();
        assert!(w.summaries.is_empty());
        assert_eq!(w.completions.len(), 1);
    }

    #[test]
    fn first_error_is_kept() {
        let mut sim = quiet_sim(1);
        sim.submit_job(1.0);
        sim.submit_job(1.0);
        let writer = MemWriter { fail: true, ..MemWriter::default() };
        let mut obs = SimOutputObserver::new(writer);
        sim.run_ticks(6, &mut obs);

        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
        assert!(obs.finish().is_ok());
    }

    #[test]
    fn finish_reports_stored_error() {
        let mut sim = quiet_sim(1);
        sim.submit_job(1.0);
        let writer = MemWriter { fail: true, ..MemWriter::default() };
        let mut obs = SimOutputObserver::new(writer);
        sim.run_ticks(3, &mut obs);
        assert!(obs.finish().is_err());
    }

    #[test]
    fn integration_csv() {
        let dir = TempDir::new().unwrap();
        let mut sim = quiet_sim(2);
        for service in [4.0, 1.5, 3.0] {
            sim.submit_job(service);
        }

        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run_ticks(10, &mut obs);
        obs.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 10);

        let mut rdr = csv::Reader::from_path(dir.path().join("completions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        // Job 1 (1.5 -> 2 ticks on machine 1) finishes first, at T3.
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][4], "3");
        assert_eq!(&rows[1][0], "0");
        assert_eq!(&rows[1][4], "5");
        // Job 2 waits for machine 1 and starts at T3.
        assert_eq!(&rows[2][0], "2");
        assert_eq!(&rows[2][3], "3");
        assert_eq!(&rows[2][6], "2");
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{CompletionRow, TickSummaryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn completion_row(job_id: u64) -> CompletionRow {
        CompletionRow {
            job_id,
            machine_id:     2,
            arrival_tick:   10,
            start_tick:     14,
            completed_tick: 20,
            service_time:   5.5,
            queue_time:     4,
        }
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_completion_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_completions(&[completion_row(0), completion_row(1), completion_row(2)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM completions", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(count, 3);

        let queue_time: i64 = conn.query_row(
            "SELECT queue_time FROM completions WHERE job_id = 1", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(queue_time, 4);
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:           7,
            queue_len:      12,
            running_jobs:   3,
            machines:       4,
            utilization:    75.0,
            jobs_completed: 30,
            display_bound:  100,
        }).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (queue_len, utilization, bound): (i64, f64, i64) = conn.query_row(
            "SELECT queue_len, utilization, display_bound FROM tick_summaries WHERE tick = 7",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        ).unwrap();
        assert_eq!(queue_len, 12);
        assert_eq!(utilization, 75.0);
        assert_eq!(bound, 100);
    }

    #[test]
    fn sqlite_finish_idempotent() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
