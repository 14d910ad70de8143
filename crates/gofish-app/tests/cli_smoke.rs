use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn gofish() -> Command {
    Command::cargo_bin("gofish").expect("binary built")
}

#[test]
fn autoplay_game_runs_to_completion() {
    gofish()
        .args(["--opponents", "2", "--seed", "7", "--autoplay", "--think-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ask for a rank, or go fish"))
        .stdout(predicate::str::contains("Starting Go Fish (You vs 2 AI players)!"))
        .stdout(predicate::str::contains("Game Over!"))
        .stdout(predicate::str::contains("AI 2 completed books:"));
}

#[test]
fn json_summary_reports_final_table() {
    let output = gofish()
        .args([
            "--opponents",
            "3",
            "--seed",
            "11",
            "--autoplay",
            "--json-summary",
        ])
        .output()
        .expect("process runs");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.rfind("\n{").expect("snapshot printed") + 1;
    let snapshot: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(snapshot["seed"], 11);
    assert_eq!(snapshot["state"], "GameOver");
    assert_eq!(snapshot["seats"].as_array().unwrap().len(), 4);
}

#[test]
fn opponent_prompt_rejects_out_of_range_counts() {
    gofish()
        .args(["--think-ms", "0"])
        .write_stdin("0\nten\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Please enter a number between 1 and 9."))
        .stdout(predicate::str::contains("Invalid input. Please enter a number."))
        .stderr(predicate::str::contains("input closed"));
}

#[test]
fn missing_card_back_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a_spades.png"), b"png").unwrap();
    gofish()
        .args(["--opponents", "1", "--autoplay", "--assets"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("back image"));
}
