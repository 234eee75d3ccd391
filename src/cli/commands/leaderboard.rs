//! Leaderboard command implementation.

use crate::cli::args::OutputFormat;
use crate::core::scoreboard::load_scoreboard;
use crate::models::config::Config;
use crate::models::score::PlayerScore;
use anyhow::{Context, Result};
use colored::Colorize;

/// Show the top players by points.
pub fn execute_leaderboard(config: &Config, limit: usize, format: OutputFormat) -> Result<()> {
    let board = load_scoreboard(&config.scores_path).with_context(|| {
        format!(
            "Failed to load scores from {}",
            config.scores_path.display()
        )
    })?;
    let top = board.leaderboard(limit);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&top)?),
        OutputFormat::Table => print_table(&top),
    }

    Ok(())
}

fn print_table(top: &[&PlayerScore]) {
    if top.is_empty() {
        println!("{}", "No scores recorded yet!".yellow());
        return;
    }

    println!("{}", "Leaderboard".bold().cyan());
    println!();
    println!(
        "{:<5} {:<24} {:>8} {:>8} {:>6}",
        "#".bold(),
        "Player".bold(),
        "Points".bold(),
        "Correct".bold(),
        "Games".bold()
    );
    println!("{}", "-".repeat(55));

    for (rank, score) in top.iter().enumerate() {
        let place = match rank {
            0 => "1".yellow().bold(),
            1 => "2".white().bold(),
            2 => "3".red().bold(),
            _ => (rank + 1).to_string().normal(),
        };
        println!(
            "{:<5} {:<24} {:>8} {:>8} {:>6}",
            place,
            score.username,
            score.total_points,
            score.correct_answers,
            score.quizzes_played
        );
    }
}
