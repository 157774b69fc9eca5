//! field — drone relay route discovery on a random grid.
//!
//! Scatters drones over a grid, lets scouts discover start→end relay routes
//! while the drones drift, and relays generated data packages over the routes
//! found.  Writes the six tabular logs plus `summary.json` to the output
//! directory and prints the run summary.
//!
//! ```text
//! field --params params.json --output output/field -v
//! RUST_LOG=relay_routing=debug field --stationary
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use relay_core::RelayParams;
use relay_mobility::{MotionModel, RandomWalk, Stationary};
use relay_output::{CsvWriter, RunSummary, SimOutputObserver};
use relay_sim::SimBuilder;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "field", about = "Drone relay route discovery simulation")]
struct Cli {
    /// JSON parameter file; missing keys take their defaults.
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Directory for the CSV logs and summary.json.
    #[arg(short, long, default_value = "output/field")]
    output: PathBuf,

    /// Override the parameter file's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the parameter file's tick limit.
    #[arg(long)]
    ticks: Option<u64>,

    /// Freeze the drones in place.
    #[arg(long)]
    stationary: bool,

    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn load_params(cli: &Cli) -> Result<RelayParams> {
    let mut params = match &cli.params {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => RelayParams::default(),
    };
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }
    if let Some(ticks) = cli.ticks {
        params.total_ticks = ticks;
    }
    params.validate()?;
    Ok(params)
}

fn run<M: MotionModel>(params: RelayParams, model: M, cli: &Cli) -> Result<RunSummary> {
    let mut sim = SimBuilder::new(params, model).build()?;

    let writer = CsvWriter::new(&cli.output)
        .with_context(|| format!("opening output in {}", cli.output.display()))?;
    let mut obs = SimOutputObserver::new(writer);

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    info!(elapsed_s = t0.elapsed().as_secs_f64(), finished = sim.is_finished(), "run complete");

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    Ok(obs.summary())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let params = load_params(&cli)?;
    println!("=== field — drone relay simulation ===");
    println!(
        "Drones: {}  |  Scouts: {}  |  Data: {} x {}  |  Seed: {}",
        params.drone_count, params.scout_count, params.data_count, params.data_size, params.seed,
    );
    println!();

    let summary = if cli.stationary {
        run(params, Stationary, &cli)?
    } else {
        run(params, RandomWalk, &cli)?
    };

    let path = cli.output.join("summary.json");
    fs::write(&path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("writing {}", path.display()))?;

    println!("{summary}");
    Ok(())
}
