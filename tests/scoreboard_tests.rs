//! Integration tests for the player scoreboard.
//!
//! Tests cover:
//! - Scores surviving a save and reload
//! - Leaderboard ranking
//! - Reading scores written by older versions

use celebrity_quiz::core::scoreboard::{load_scoreboard, save_scoreboard};
use celebrity_quiz::models::score::Scoreboard;
use chrono::Utc;
use tempfile::TempDir;

// ========== PERSISTENCE TESTS ==========

#[test]
fn test_scores_survive_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scores.json");

    let mut board = load_scoreboard(&path).unwrap();
    board.record_game("amira", Utc::now());
    board.record_correct("amira", 15, Utc::now());
    save_scoreboard(&board, &path).unwrap();

    let mut board = load_scoreboard(&path).unwrap();
    board.record_game("amira", Utc::now());
    board.record_correct("amira", 10, Utc::now());
    save_scoreboard(&board, &path).unwrap();

    let score = load_scoreboard(&path).unwrap().get("amira").cloned().unwrap();
    assert_eq!(score.total_points, 25);
    assert_eq!(score.correct_answers, 2);
    assert_eq!(score.quizzes_played, 2);
}

#[test]
fn test_reads_minimal_entries() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scores.json");
    std::fs::write(
        &path,
        r#"{"players": {"42": {"username": "karim", "total_points": 40}}}"#,
    )
    .unwrap();

    let board = load_scoreboard(&path).unwrap();
    let score = board.get("42").unwrap();
    assert_eq!(score.username, "karim");
    assert_eq!(score.correct_answers, 0);
    assert!(score.last_played.is_none());
}

#[test]
fn test_malformed_scores_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scores.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(load_scoreboard(&path).is_err());
}

// ========== LEADERBOARD TESTS ==========

#[test]
fn test_leaderboard_limit() {
    let mut board = Scoreboard::default();
    let now = Utc::now();
    for (player, points) in [("amira", 20), ("karim", 50), ("layla", 35), ("omar", 5)] {
        board.record_correct(player, points, now);
    }

    let top: Vec<(&str, u64)> = board
        .leaderboard(2)
        .into_iter()
        .map(|s| (s.username.as_str(), s.total_points))
        .collect();
    assert_eq!(top, vec![("karim", 50), ("layla", 35)]);
    assert!(Scoreboard::default().leaderboard(10).is_empty());
}
