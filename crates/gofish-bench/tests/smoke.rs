use std::fs;
use std::path::Path;

use gofish_bench::config::BenchmarkConfig;
use gofish_bench::runner::{GameRow, SimulationRunner};
use tempfile::tempdir;

fn load_config(output_dir: &Path) -> BenchmarkConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
games:
  seed: 4242
  count: 3
  opponents: [1, 5]
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("games.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

/// Rows with the wall-clock timing zeroed out.
fn normalized_rows(path: &Path) -> Vec<GameRow> {
    fs::read_to_string(path)
        .expect("jsonl readable")
        .lines()
        .map(|line| {
            let mut row: GameRow = serde_json::from_str(line).expect("row decodes");
            row.elapsed_ms = 0.0;
            row
        })
        .collect()
}

#[test]
fn simulation_writes_one_row_per_game() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path());
    let outputs = config.resolved_outputs();

    let summary = SimulationRunner::new(config, outputs)
        .run()
        .expect("simulation completes");

    assert_eq!(summary.games_played, 6);
    assert_eq!(summary.rows_written, 6);
    assert_eq!(summary.stalled, 0);

    let rows = normalized_rows(&summary.jsonl_path);
    assert_eq!(rows.len(), 6);
    assert_eq!(rows.iter().filter(|r| r.opponents == 1).count(), 3);
    assert_eq!(rows.iter().filter(|r| r.opponents == 5).count(), 3);
    for row in &rows {
        assert!(row.finished, "{} stalled", row.game_id);
        assert!(!row.winners.is_empty());
        assert_eq!(row.human_won, row.winners.iter().any(|w| w == "You"));
        assert_eq!(row.books.len(), row.opponents + 1);
        let total: usize = row.books.iter().map(|b| b.books).sum();
        assert!(total <= 13);
        let best = row.books.iter().map(|b| b.books).max().unwrap();
        for winner in &row.winners {
            let seat = row.books.iter().find(|b| &b.name == winner).unwrap();
            assert_eq!(seat.books, best);
        }
    }

    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    assert!(markdown.contains("# Go Fish Simulation Summary: test_smoke"));
    assert!(markdown.contains("| 1 | 3 |"));
    assert!(markdown.contains("| 5 | 3 |"));
}

#[test]
fn seeded_runs_are_reproducible() {
    let first_dir = tempdir().expect("temp dir");
    let second_dir = tempdir().expect("temp dir");

    let mut paths = Vec::new();
    for dir in [first_dir.path(), second_dir.path()] {
        let config = load_config(dir);
        let outputs = config.resolved_outputs();
        let summary = SimulationRunner::new(config, outputs)
            .run()
            .expect("simulation completes");
        paths.push(summary.jsonl_path);
    }

    assert_eq!(normalized_rows(&paths[0]), normalized_rows(&paths[1]));
}
