use std::path::PathBuf;

use clap::Parser;

use gofish_bench::config::{BenchmarkConfig, ResolvedOutputs};
use gofish_bench::logging::init_logging;
use gofish_bench::runner::SimulationRunner;

/// Batch simulator for heuristic-only Go Fish tables.
#[derive(Debug, Parser)]
#[command(
    name = "gofish-bench",
    author,
    version,
    about = "Deterministic Go Fish simulation harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games per table size.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed that derives every game seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let count = config.games.count;
    let tables = config.games.opponents.len();

    println!(
        "Loaded configuration '{run_id}' with {tables} table size{} ({count} games each)",
        if tables == 1 { "" } else { "s" }
    );

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let summary = SimulationRunner::new(config, outputs).run()?;

    println!(
        "Simulation complete for '{run_id}': {} games ({} stalled) -> {} rows at {}",
        summary.games_played,
        summary.stalled,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
