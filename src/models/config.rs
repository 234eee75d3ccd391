//! Configuration model.
//!
//! Values come from `~/.config/celebrity_quiz/config.toml` (or an explicit
//! path), then environment variables override individual fields:
//! - `FUZZY_THRESHOLD`, `FUZZY_SUGGESTION_THRESHOLD`
//! - `QUIZ_TIMEOUT`, `MAX_QUESTIONS`, `POINTS_CORRECT`, `POINTS_QUICK_BONUS`
//! - `WIKIPEDIA_USER_AGENT`, `WIKIPEDIA_RATE_LIMIT` (seconds)
//! - `CELEBRITIES_FILE`, `SCORES_FILE`

use crate::models::matching::{AliasPolicy, MatchProfile};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Answer matching configuration.
    pub matching: MatchingConfig,
    /// Quiz round configuration.
    pub quiz: QuizConfig,
    /// Wikipedia configuration.
    pub wikipedia: WikipediaSettings,
    /// Celebrity catalog file.
    pub catalog_path: PathBuf,
    /// Player scoreboard file.
    pub scores_path: PathBuf,
}

/// Answer matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Score at which callers treat an answer as correct overall.
    pub threshold: u8,
    /// Score at which near misses get hints.
    pub suggestion_threshold: u8,
    /// Rule preset.
    pub profile: MatchProfile,
    /// Single-word alias handling.
    pub alias_policy: AliasPolicy,
}

/// Quiz round configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Round timeout in seconds.
    pub timeout_secs: u64,
    /// Points for a correct answer.
    pub points_correct: u32,
    /// Extra points for a quick answer.
    pub points_quick_bonus: u32,
    /// Answers within this many seconds earn the bonus.
    pub quick_bonus_secs: u64,
    /// Rounds per game.
    pub rounds: u32,
}

/// Wikipedia configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikipediaSettings {
    /// API endpoint.
    pub base_url: String,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Minimum delay between requests in milliseconds.
    pub rate_limit_ms: u64,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig::default(),
            quiz: QuizConfig::default(),
            wikipedia: WikipediaSettings::default(),
            catalog_path: PathBuf::from("data").join("celebrities.json"),
            scores_path: config_dir().join("scores.json"),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: 80,
            suggestion_threshold: 60,
            profile: MatchProfile::Standard,
            alias_policy: AliasPolicy::ShortCircuit,
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            points_correct: 10,
            points_quick_bonus: 5,
            quick_bonus_secs: 10,
            rounds: 10,
        }
    }
}

impl Default for WikipediaSettings {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org/w/api.php".to_string(),
            user_agent: "CelebrityQuiz/1.0".to_string(),
            rate_limit_ms: 100,
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Apply environment variable overrides.
    ///
    /// Unparseable numeric values are ignored.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
            value.and_then(|v| v.trim().parse().ok())
        }

        if let Some(v) = parsed(lookup("FUZZY_THRESHOLD")) {
            self.matching.threshold = v;
        }
        if let Some(v) = parsed(lookup("FUZZY_SUGGESTION_THRESHOLD")) {
            self.matching.suggestion_threshold = v;
        }
        if let Some(v) = parsed(lookup("QUIZ_TIMEOUT")) {
            self.quiz.timeout_secs = v;
        }
        if let Some(v) = parsed(lookup("MAX_QUESTIONS")) {
            self.quiz.rounds = v;
        }
        if let Some(v) = parsed(lookup("POINTS_CORRECT")) {
            self.quiz.points_correct = v;
        }
        if let Some(v) = parsed(lookup("POINTS_QUICK_BONUS")) {
            self.quiz.points_quick_bonus = v;
        }
        if let Some(v) = lookup("WIKIPEDIA_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            self.wikipedia.user_agent = v;
        }
        if let Some(secs) = parsed::<f64>(lookup("WIKIPEDIA_RATE_LIMIT")) {
            if secs.is_finite() && secs >= 0.0 {
                self.wikipedia.rate_limit_ms = (secs * 1000.0).round() as u64;
            }
        }
        if let Some(v) = lookup("CELEBRITIES_FILE").filter(|v| !v.trim().is_empty()) {
            self.catalog_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("SCORES_FILE").filter(|v| !v.trim().is_empty()) {
            self.scores_path = PathBuf::from(v);
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.matching.threshold > 100 {
            return Err(crate::Error::InvalidConfig(format!(
                "matching.threshold must be 0-100, got {}",
                self.matching.threshold
            )));
        }
        if self.matching.suggestion_threshold > self.matching.threshold {
            return Err(crate::Error::InvalidConfig(format!(
                "matching.suggestion_threshold ({}) must not exceed matching.threshold ({})",
                self.matching.suggestion_threshold, self.matching.threshold
            )));
        }
        if self.quiz.timeout_secs == 0 {
            return Err(crate::Error::InvalidConfig(
                "quiz.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("celebrity_quiz")
}

/// Load configuration from the default location, then apply the environment.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_dir().join("config.toml"))
}

/// Load configuration from a file, then apply the environment.
///
/// A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        tracing::debug!("No config file at {}, using defaults", path.display());
        Config::default()
    };

    config.apply_env();
    config.validate()?;
    Ok(config)
}
