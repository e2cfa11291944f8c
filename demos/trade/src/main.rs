//! trade — run one PISR scenario file and report latency.
//!
//! ```text
//! trade scenarios/clusters.json --output-dir output/clusters --max-time-secs 20000
//! RUST_LOG=pisr_sim=debug trade scenarios/clusters.json --json-logs
//! ```
//!
//! Writes `visits.csv` and `task_ages.csv` (or `output.db` with
//! `--format sqlite`, which needs the `sqlite` feature) and prints the
//! priority-weighted latency summary.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use pisr_output::{CsvWriter, HistoryObserver, LatencySummary, OutputWriter};
use pisr_scenario::{load_scenario_json, Scenario};
use pisr_sim::Sim;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Sqlite,
}

/// Run a persistent-surveillance trade from a JSON scenario.
#[derive(Parser, Debug)]
#[command(name = "trade", version, about, long_about = None)]
struct Args {
    /// Scenario JSON file.
    scenario: PathBuf,

    /// Output directory; defaults to `output/trade_<trade_id>`.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Set or override the scenario's visit budget.
    #[arg(long)]
    max_visits: Option<u64>,

    /// Override the scenario's simulated-time budget.
    #[arg(long)]
    max_time_secs: Option<f64>,

    /// Compute no-fly impact ratings for Tripath vehicles during setup.
    #[arg(long)]
    impact_ratings: bool,

    /// Emit logs as JSON lines.
    #[arg(long, env = "PISR_JSON_LOGS")]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.json_logs);

    let mut scenario = load_scenario_json(&args.scenario)
        .with_context(|| format!("failed to load {}", args.scenario.display()))?;
    apply_overrides(&mut scenario, &args);

    let out_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("output/trade_{}", scenario.trade_id)));
    std::fs::create_dir_all(&out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut sim = scenario.build().context("invalid scenario")?;

    println!("=== trade {} ===", scenario.trade_id);
    println!("Tasks: {}  |  Vehicles: {}", sim.tasks.len(), sim.vehicles.len());
    for (vehicle, rating) in sim.vehicles.iter().zip(&sim.impact_ratings) {
        if let Some(r) = rating {
            println!("  {} no-fly impact rating: {r:.3}", vehicle.state.id);
        }
    }
    println!();

    let t0 = Instant::now();
    match args.format {
        Format::Csv => {
            let writer = CsvWriter::new(&out_dir, sim.tasks.len())?;
            run_with_writer(&mut sim, writer)?;
        }
        Format::Sqlite => run_sqlite(&mut sim, &out_dir)?,
    }
    let elapsed = t0.elapsed();

    let summary = LatencySummary::from_history(&sim.history.ages, &sim.tasks.priorities());
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  visits    : {}", sim.history.visits.len());
    println!("  end time  : {:.2} s", sim.time);
    println!("  output    : {}", out_dir.display());
    println!();
    print!("{summary}");

    Ok(())
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}

fn apply_overrides(scenario: &mut Scenario, args: &Args) {
    if args.max_visits.is_some() {
        scenario.max_visits = args.max_visits;
    }
    if args.max_time_secs.is_some() {
        scenario.max_time_secs = args.max_time_secs;
    }
    if args.impact_ratings {
        scenario.impact_ratings = true;
    }
}

fn run_with_writer<W: OutputWriter>(sim: &mut Sim, writer: W) -> Result<()> {
    let mut obs = HistoryObserver::new(writer);
    sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        return Err(e).context("failed to write run output");
    }
    Ok(())
}

#[cfg(feature = "sqlite")]
fn run_sqlite(sim: &mut Sim, out_dir: &Path) -> Result<()> {
    let writer = pisr_output::SqliteWriter::new(out_dir)?;
    run_with_writer(sim, writer)
}

#[cfg(not(feature = "sqlite"))]
fn run_sqlite(_sim: &mut Sim, _out_dir: &Path) -> Result<()> {
    anyhow::bail!("SQLite output needs the `sqlite` feature")
}
