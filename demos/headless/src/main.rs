//! headless: drives a queuesim simulation from a fixed-rate frame loop.
//!
//! Runs the default M/G/c-style workload (or a JSON `SimConfig` passed as the
//! first argument) for two simulated minutes of frames, shrinks the pool and
//! speeds the clock up halfway through, writes per-tick summaries and
//! completions as CSV, then prints the final snapshot as JSON.
//!
//! Set `RUST_LOG=qs_sim=debug` to see machine lifecycle events.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use qs_core::{SimConfig, TICKS_PER_SECOND, TimeScale};
use qs_output::{CsvWriter, SimOutputObserver};
use qs_sim::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const RUN_FRAMES:      u64  = 120 * TICKS_PER_SECOND as u64;
const RESIZE_AT_FRAME: u64  = RUN_FRAMES / 2;
const REPORT_EVERY:    u64  = 10 * TICKS_PER_SECOND as u64;
const FAST_SLIDER:     i32  = 50; // 10x
const OUTPUT_DIR:      &str = "output/headless";

fn load_config(path: Option<PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1. Configuration.
    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    info!(
        arrival_rate = config.arrival_rate,
        avg_service_time = config.avg_service_time,
        machines = config.machine_count,
        seed = config.seed,
        "configuration loaded"
    );

    // 2. Build and start.
    let mut sim = SimBuilder::new(config.clone()).build()?;
    sim.start();

    // 3. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut obs = SimOutputObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?);

    // 4. Frame loop.  One frame is one tick at 1x.
    let t0 = Instant::now();
    let mut ticks = 0;
    for frame in 1..=RUN_FRAMES {
        if frame == RESIZE_AT_FRAME {
            let shrunk = config.machine_count.saturating_sub(2).max(1);
            sim.set_machine_count(shrunk)?;
            sim.set_time_scale(TimeScale::from_slider(FAST_SLIDER));
        }

        ticks += sim.advance_with(1.0, &mut obs);

        if frame % REPORT_EVERY == 0 {
            let m = sim.metrics();
            info!(
                tick = %sim.now(),
                queue = m.queue_length,
                running = m.running_jobs,
                completed = m.jobs_completed,
                drain_ticks = format_args!("{:.1}", m.estimated_drain_time),
                "progress"
            );
        }
    }
    sim.stop();
    obs.finish().context("writing output")?;
    let elapsed = t0.elapsed();

    // 5. Summary.
    let m = sim.metrics();
    println!("Simulated {ticks} ticks in {:.3} s", elapsed.as_secs_f64());
    println!("  jobs created     : {}", m.jobs_created);
    println!("  jobs completed   : {}", m.jobs_completed);
    println!("  avg service time : {:.2}", m.avg_service_time);
    println!("  avg queue time   : {:.2} ticks", m.avg_queue_time);
    println!("  est. drain time  : {:.2}", m.estimated_drain_time);
    println!("  output           : {OUTPUT_DIR}/");
    println!();

    println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);

    Ok(())
}
