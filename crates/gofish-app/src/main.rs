#![deny(warnings)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gofish_app::logging::init_logging;
use gofish_app::prompt::prompt_opponent_count;
use gofish_app::{ConsoleShell, NoPacing, Pacing, SleepPacing};
use gofish_bot::new_game;
use gofish_core::game::engine::{GameConfig, GameEngine};
use gofish_core::game::serialization::GameSnapshot;
use gofish_ui::{AssetManifest, CardAssets};

/// Go Fish against computer opponents in the terminal.
#[derive(Debug, Parser)]
#[command(name = "gofish", author, version, about = "Go Fish: one human against 1-9 AI players")]
struct Cli {
    /// Number of AI opponents (1-9). Prompted for when omitted.
    #[arg(short, long, value_name = "COUNT")]
    opponents: Option<usize>,

    /// Seed for the shuffle and every AI decision.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Cosmetic pause before each AI move, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 1500)]
    think_ms: u64,

    /// Let the heuristic play your seat too.
    #[arg(long)]
    autoplay: bool,

    /// Card image directory to validate before starting (needs back.png).
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Print the final table snapshot as JSON.
    #[arg(long)]
    json_summary: bool,

    /// Log filter directive (overrides GOFISH_LOG).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    if let Some(dir) = cli.assets.as_ref() {
        let assets = CardAssets::load(dir, AssetManifest::current())
            .with_context(|| format!("loading card images from {}", dir.display()))?;
        tracing::info!(
            back = %assets.back().display(),
            missing_faces = assets.missing_faces().len(),
            "card assets ready"
        );
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let opponents = match cli.opponents {
        Some(count) => count,
        None => prompt_opponent_count(&mut input, &mut stdout)?,
    };

    let mut config = GameConfig::with_opponents(opponents);
    config.seed = cli.seed;
    let mut game = new_game(config)?;

    if cli.think_ms == 0 || cli.autoplay {
        play(input, &mut stdout, NoPacing, cli.autoplay, &mut game)?;
    } else {
        play(
            input,
            &mut stdout,
            SleepPacing::from_millis(cli.think_ms),
            false,
            &mut game,
        )?;
    }

    if cli.json_summary {
        writeln!(stdout, "{}", GameSnapshot::to_json(&game)?)?;
    }
    Ok(())
}

fn play<R: BufRead, W: Write, P: Pacing>(
    input: R,
    output: W,
    pacing: P,
    autoplay: bool,
    game: &mut GameEngine,
) -> anyhow::Result<()> {
    let mut shell = ConsoleShell::new(input, output, pacing);
    if autoplay {
        shell = shell.with_autopilot();
    }
    shell.run(game)?;
    Ok(())
}
