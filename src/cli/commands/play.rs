//! Play command implementation.
//!
//! Runs quiz rounds in the terminal. Each line typed on stdin is a guess;
//! `skip` gives up on the current round. No celebrity comes up twice in a
//! game, and points are added to the player's saved score.

use super::open_catalog;
use crate::core::catalog::Catalog;
use crate::core::matcher::{match_explanation, MatcherConfig, NameMatcher};
use crate::core::scoreboard::{load_scoreboard, save_scoreboard};
use crate::core::session::{GuessOutcome, SessionRegistry};
use crate::models::celebrity::CelebrityRecord;
use crate::models::config::Config;
use crate::models::score::Scoreboard;
use crate::services::wikipedia::{WikipediaClient, WikipediaConfig};
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Channel id used for the terminal game.
const CHANNEL: &str = "terminal";

/// Options for the play command.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub rounds: u32,
    pub timeout: Duration,
    pub images: bool,
}

impl PlayOptions {
    /// Options from the configuration, with command line overrides.
    pub fn from_config(
        config: &Config,
        rounds: Option<u32>,
        timeout: Option<u64>,
        no_image: bool,
    ) -> Self {
        Self {
            rounds: rounds.unwrap_or(config.quiz.rounds),
            timeout: Duration::from_secs(timeout.unwrap_or(config.quiz.timeout_secs)),
            images: !no_image,
        }
    }
}

/// Play quiz rounds until the round count is reached or stdin closes.
pub async fn execute_play(config: &Config, options: PlayOptions) -> Result<()> {
    let catalog = open_catalog(config)?;
    if catalog.is_empty() {
        return Err(crate::Error::EmptyCatalog.into());
    }

    let matcher = NameMatcher::with_config(
        MatcherConfig::from_profile(config.matching.profile)
            .with_alias_policy(config.matching.alias_policy),
    );
    let client = if options.images {
        Some(WikipediaClient::new(WikipediaConfig::from(&config.wikipedia))?)
    } else {
        None
    };

    let player = whoami::username();
    let mut scores = load_scoreboard(&config.scores_path).unwrap_or_else(|e| {
        tracing::warn!("Starting with an empty scoreboard: {}", e);
        Scoreboard::default()
    });
    let mut registry = SessionRegistry::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut total_points = 0u32;
    let mut used: HashSet<String> = HashSet::new();

    let banner = format!(
        "Celebrity Quiz: {} rounds, {}s each. Type 'skip' to pass.",
        options.rounds,
        options.timeout.as_secs()
    );
    println!("{}", banner.bold().cyan());
    scores.record_game(&player, Utc::now());

    'rounds: for round in 1..=options.rounds {
        registry.cleanup_stale(Instant::now());

        let Some(celebrity) = pick_celebrity(&catalog, &used) else {
            println!();
            println!("{}", "No more celebrities left for this game.".yellow());
            break;
        };
        used.insert(celebrity.name.clone());

        println!();
        println!("{}", format!("Round {}/{}", round, options.rounds).bold());
        if let Some(ref client) = client {
            show_image(client, &celebrity).await;
        }
        if let Some(ref category) = celebrity.category {
            println!("{} {}", "Hint:".yellow(), category);
        }
        println!("Who is this?");

        registry.start(CHANNEL, celebrity.clone(), options.timeout, Instant::now())?;

        loop {
            let remaining = registry
                .get(CHANNEL)
                .map(|session| session.remaining(Instant::now()))
                .unwrap_or_default();
            if remaining.is_zero() {
                time_up(&mut registry, &celebrity)?;
                break;
            }

            let line = match tokio::time::timeout(remaining, lines.next_line()).await {
                Err(_) => {
                    time_up(&mut registry, &celebrity)?;
                    break;
                }
                Ok(line) => line?,
            };

            let Some(line) = line else {
                registry.finish(CHANNEL)?.cancel();
                reveal(&celebrity);
                break 'rounds;
            };

            let answer = line.trim();
            if answer.is_empty() {
                continue;
            }
            if answer.eq_ignore_ascii_case("skip") {
                registry.finish(CHANNEL)?.cancel();
                println!("{}", "Skipped.".yellow());
                reveal(&celebrity);
                break;
            }

            let outcome =
                registry.submit_guess(CHANNEL, &player, answer, &matcher, config, Instant::now())?;

            match outcome {
                GuessOutcome::Correct {
                    points,
                    elapsed,
                    result,
                } => {
                    total_points += points;
                    scores.record_correct(&player, points, Utc::now());
                    save_scores(config, &scores);
                    println!(
                        "{} {} ({}) +{} points in {:.1}s",
                        "Correct!".green().bold(),
                        celebrity.answer_line(),
                        match_explanation(result.score()),
                        points,
                        elapsed.as_secs_f32()
                    );
                    break;
                }
                GuessOutcome::Incorrect(result) if !result.suggestions.is_empty() => {
                    println!("{}", "Close, but not quite right. Try again!".yellow());
                }
                GuessOutcome::Incorrect(_) => {
                    println!("{}", "Not quite. Try again!".red());
                }
                GuessOutcome::Closed => {
                    println!("{}", "Time's up!".red().bold());
                    reveal(&celebrity);
                    break;
                }
            }
        }
    }

    save_scores(config, &scores);

    let stats = registry.stats();
    println!();
    println!("{}", "Game over".bold().cyan());
    println!(
        "{}: {} points, {}/{} rounds answered, {} guesses",
        player, total_points, stats.rounds_answered, stats.rounds_started, stats.guesses
    );
    if let Some(score) = scores.get(&player) {
        println!(
            "Total: {} points, {} correct answers over {} games",
            score.total_points, score.correct_answers, score.quizzes_played
        );
    }

    Ok(())
}

/// Pick a random celebrity not used yet in this game.
fn pick_celebrity(catalog: &Catalog, used: &HashSet<String>) -> Option<CelebrityRecord> {
    catalog
        .random_excluding(&mut rand::thread_rng(), used)
        .cloned()
}

/// Save the scoreboard, warning instead of ending the game on failure.
fn save_scores(config: &Config, scores: &Scoreboard) {
    if let Err(e) = save_scoreboard(scores, &config.scores_path) {
        tracing::warn!("Failed to save scores: {}", e);
    }
}

/// Close the round as timed out and show the answer.
fn time_up(registry: &mut SessionRegistry, celebrity: &CelebrityRecord) -> Result<()> {
    let mut session = registry.finish(CHANNEL)?;
    session.expire(Instant::now());
    println!("{}", "Time's up!".red().bold());
    reveal(celebrity);
    Ok(())
}

/// Print the answer with its description and page.
fn reveal(celebrity: &CelebrityRecord) {
    println!("The answer was {}", celebrity.answer_line().bold());
    if let Some(ref description) = celebrity.description {
        println!("  {}", description.dimmed());
    }
    if let Some(ref url) = celebrity.wikipedia_url {
        println!("  {}", url.dimmed());
    }
}

/// Look up and print the celebrity's image URL.
async fn show_image(client: &WikipediaClient, celebrity: &CelebrityRecord) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Fetching image...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let image = client.get_celebrity_image(&page_title(celebrity)).await;
    spinner.finish_and_clear();

    match image {
        Ok(Some(url)) => println!("{} {}", "Image:".bold(), url),
        Ok(None) => println!("{}", "(no image available)".dimmed()),
        Err(e) => {
            tracing::warn!("Image lookup failed for {}: {}", celebrity.name, e);
            println!("{}", "(image lookup failed)".dimmed());
        }
    }
}

/// Wikipedia page title for a celebrity: the last segment of its page URL,
/// or its name.
fn page_title(celebrity: &CelebrityRecord) -> String {
    celebrity
        .wikipedia_url
        .as_deref()
        .and_then(|url| url.rsplit("/wiki/").next().filter(|t| !t.is_empty() && *t != url))
        .and_then(|title| urlencoding::decode(title).ok())
        .map(|title| title.replace('_', " "))
        .unwrap_or_else(|| celebrity.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_title_from_url() {
        let mut record = CelebrityRecord::new("Omar Sharif");
        assert_eq!(page_title(&record), "Omar Sharif");

        record.wikipedia_url = Some("https://en.wikipedia.org/wiki/Umm_Kulthum".to_string());
        assert_eq!(page_title(&record), "Umm Kulthum");

        record.wikipedia_url = Some("https://example.com/omar".to_string());
        assert_eq!(page_title(&record), "Omar Sharif");
    }

    #[test]
    fn test_play_options_overrides() {
        let config = Config::default();
        let options = PlayOptions::from_config(&config, Some(3), None, true);
        assert_eq!(options.rounds, 3);
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert!(!options.images);
    }

    #[test]
    fn test_pick_skips_used_celebrities() {
        let catalog = Catalog::new(vec![
            CelebrityRecord::new("Fairuz"),
            CelebrityRecord::new("Sabah"),
        ])
        .unwrap();

        let mut used = HashSet::new();
        used.insert("Fairuz".to_string());
        for _ in 0..10 {
            assert_eq!(pick_celebrity(&catalog, &used).unwrap().name, "Sabah");
        }

        used.insert("Sabah".to_string());
        assert!(pick_celebrity(&catalog, &used).is_none());
    }
}
