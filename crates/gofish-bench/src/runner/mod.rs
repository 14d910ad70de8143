mod summary;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use gofish_bot::{HeuristicPolicy, new_game};
use gofish_core::GameError;
use gofish_core::game::engine::{GameConfig, GameEngine};
use gofish_core::model::player::PlayerId;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{BenchmarkConfig, ResolvedOutputs};

pub use summary::{SummaryTable, TableSizeStats};

/// Plays heuristic-only games (the human seat on autopilot) and streams one
/// JSONL row per game.
pub struct SimulationRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub games_played: usize,
    pub stalled: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub table: SummaryTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRow {
    pub run_id: String,
    pub game_id: String,
    pub opponents: usize,
    pub seed: u64,
    pub turns: usize,
    pub finished: bool,
    pub winners: Vec<String>,
    /// The human seat won outright or tied for the most books.
    pub human_won: bool,
    pub books: Vec<SeatBooks>,
    pub deck_remaining: usize,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatBooks {
    pub name: String,
    pub books: usize,
}

impl SimulationRunner {
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Self {
        Self { config, outputs }
    }

    /// Execute every configured game, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut table = SummaryTable::default();
        let mut rows_written = 0usize;

        for &opponents in &self.config.games.opponents {
            for game_index in 0..self.config.games.count {
                let seed = rng.next_u64();
                let row = self.play_game(game_index, opponents, seed)?;
                table.record(&row);
                serde_json::to_writer(&mut writer, &row)?;
                writer.write_all(b"\n")?;
                rows_written += 1;
            }
        }
        writer.flush()?;

        table.write_markdown(&self.config.run_id, &self.outputs.summary_md)?;

        Ok(RunSummary {
            games_played: table.games(),
            stalled: table.stalled(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            table,
        })
    }

    fn play_game(
        &self,
        game_index: usize,
        opponents: usize,
        seed: u64,
    ) -> Result<GameRow, RunnerError> {
        let started = Instant::now();
        let mut game = new_game(GameConfig::with_opponents(opponents).seed(seed))?;
        let turns = play_to_end(&mut game, self.config.games.turn_cap)?;
        let finished = game.is_game_over();

        let game_id = format!("G{game_index:05}_O{opponents}");
        if !finished {
            event!(
                target: "gofish_bench::runner",
                Level::WARN,
                game_id = %game_id,
                seed,
                turns,
                "turn cap reached before the game ended"
            );
        }

        let books = game
            .standings()
            .into_iter()
            .map(|s| SeatBooks {
                name: s.name,
                books: s.books,
            })
            .collect();

        let snapshot = serde_json::to_string(&game.snapshot())?;
        event!(
            target: "gofish_bench::runner",
            Level::INFO,
            game_id = %game_id,
            seed,
            turns,
            finished,
            snapshot = %snapshot,
            "game complete"
        );

        Ok(GameRow {
            run_id: self.config.run_id.clone(),
            game_id,
            opponents,
            seed,
            turns,
            finished,
            winners: if finished { game.winners() } else { Vec::new() },
            human_won: finished && human_won(&game),
            books,
            deck_remaining: game.deck_len(),
            elapsed_ms: started.elapsed().as_secs_f64() * 1_000.0,
        })
    }
}

/// Alternates autopilot human turns and opponent turns until the game ends
/// or `turn_cap` turns have been taken. Returns the number of turns taken.
pub fn play_to_end(game: &mut GameEngine, turn_cap: usize) -> Result<usize, GameError> {
    let autopilot = HeuristicPolicy::new();
    let mut turns = 0;
    while !game.is_game_over() && turns < turn_cap {
        if game.is_human_turn() {
            let Some(request) = game.suggest_request(&autopilot) else {
                break;
            };
            game.submit_human_request(request.rank, request.target)?;
        } else {
            game.advance_opponent_turn()?;
        }
        turns += 1;
    }
    Ok(turns)
}

/// Matches the winners against the human seat's configured name.
pub fn human_won(game: &GameEngine) -> bool {
    game.player(PlayerId::HUMAN)
        .map(|human| game.winners().iter().any(|name| name == human.name()))
        .unwrap_or(false)
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {0}")]
    Game(#[from] GameError),
}
