use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::GameRow;

/// Running totals for one table size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSizeStats {
    pub games: usize,
    pub finished: usize,
    pub stalled: usize,
    pub human_wins: usize,
    pub ties: usize,
    total_turns: usize,
    total_deck_remaining: usize,
    total_elapsed_ms: f64,
}

impl TableSizeStats {
    fn record(&mut self, row: &GameRow) {
        self.games += 1;
        self.total_turns += row.turns;
        self.total_deck_remaining += row.deck_remaining;
        self.total_elapsed_ms += row.elapsed_ms;
        if !row.finished {
            self.stalled += 1;
            return;
        }
        self.finished += 1;
        if row.winners.len() > 1 {
            self.ties += 1;
        }
        if row.human_won {
            self.human_wins += 1;
        }
    }

    pub fn avg_turns(&self) -> f64 {
        ratio(self.total_turns as f64, self.games)
    }

    pub fn avg_deck_remaining(&self) -> f64 {
        ratio(self.total_deck_remaining as f64, self.games)
    }

    pub fn avg_elapsed_ms(&self) -> f64 {
        ratio(self.total_elapsed_ms, self.games)
    }

    /// Share of finished games the human seat won or tied for.
    pub fn human_win_rate(&self) -> f64 {
        ratio(self.human_wins as f64, self.finished)
    }

    pub fn tie_rate(&self) -> f64 {
        ratio(self.ties as f64, self.finished)
    }
}

fn ratio(total: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}

/// Aggregates game rows by opponent count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    by_opponents: BTreeMap<usize, TableSizeStats>,
}

impl SummaryTable {
    pub fn record(&mut self, row: &GameRow) {
        self.by_opponents
            .entry(row.opponents)
            .or_default()
            .record(row);
    }

    pub fn games(&self) -> usize {
        self.by_opponents.values().map(|s| s.games).sum()
    }

    pub fn stalled(&self) -> usize {
        self.by_opponents.values().map(|s| s.stalled).sum()
    }

    pub fn table_size(&self, opponents: usize) -> Option<&TableSizeStats> {
        self.by_opponents.get(&opponents)
    }

    pub fn render_markdown(&self, run_id: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Go Fish Simulation Summary: {run_id}\n\n"));
        out.push_str(&format!(
            "{} games played, {} stopped at the turn cap\n\n",
            self.games(),
            self.stalled()
        ));
        out.push_str("| Opponents | Games | Avg turns | Human win % | Tie % | Avg deck left | Stalled | Avg ms/game |\n");
        out.push_str("|-----------|-------|-----------|-------------|-------|---------------|---------|-------------|\n");

        for (opponents, stats) in &self.by_opponents {
            out.push_str(&format!(
                "| {opponents} | {games} | {turns:.1} | {win:.1}% | {tie:.1}% | {deck:.2} | {stalled} | {ms:.2} |\n",
                games = stats.games,
                turns = stats.avg_turns(),
                win = stats.human_win_rate() * 100.0,
                tie = stats.tie_rate() * 100.0,
                deck = stats.avg_deck_remaining(),
                stalled = stats.stalled,
                ms = stats.avg_elapsed_ms(),
            ));
        }
        out
    }

    pub fn write_markdown(&self, run_id: &str, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path.as_ref(), self.render_markdown(run_id))
    }
}
