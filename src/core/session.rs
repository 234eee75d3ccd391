//! Quiz rounds.
//!
//! A [`QuizSession`] owns one round: the celebrity, who guessed what, and how
//! the round ended. An answer wins when the engine accepts it and it scores
//! at least `matching.threshold`. The first winning answer closes the round;
//! later guesses are not evaluated. [`SessionRegistry`] keeps at most one active round per
//! channel.

use crate::core::matcher::NameMatcher;
use crate::models::celebrity::CelebrityRecord;
use crate::models::config::{Config, QuizConfig};
use crate::models::matching::SuggestionResult;
use crate::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Grace period after the timeout before a round counts as stale.
const STALE_GRACE: Duration = Duration::from_secs(60);

/// One player's activity in a round.
#[derive(Debug, Clone)]
pub struct Participant {
    pub attempts: u32,
    pub last_answer: String,
    pub last_score: u8,
}

/// How a round ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundOutcome {
    Answered {
        player: String,
        answer: String,
        points: u32,
        elapsed: Duration,
    },
    TimedOut,
    Cancelled,
}

/// Result of submitting a guess.
#[derive(Debug, Clone, PartialEq)]
pub enum GuessOutcome {
    /// The guess won the round.
    Correct {
        points: u32,
        elapsed: Duration,
        result: SuggestionResult,
    },
    /// Wrong; the player may keep guessing.
    Incorrect(SuggestionResult),
    /// The round already ended; the guess was ignored.
    Closed,
}

/// One quiz round.
#[derive(Debug)]
pub struct QuizSession {
    id: Uuid,
    channel: String,
    celebrity: CelebrityRecord,
    started: Instant,
    started_at: DateTime<Utc>,
    timeout: Duration,
    participants: HashMap<String, Participant>,
    outcome: Option<RoundOutcome>,
}

impl QuizSession {
    /// Start a round now.
    pub fn new(
        channel: impl Into<String>,
        celebrity: CelebrityRecord,
        timeout: Duration,
    ) -> Self {
        Self::started_at(channel, celebrity, timeout, Instant::now())
    }

    /// Start a round at a given instant.
    pub fn started_at(
        channel: impl Into<String>,
        celebrity: CelebrityRecord,
        timeout: Duration,
        started: Instant,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: channel.into(),
            celebrity,
            started,
            started_at: Utc::now(),
            timeout,
            participants: HashMap::new(),
            outcome: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn celebrity(&self) -> &CelebrityRecord {
        &self.celebrity
    }

    pub fn start_instant(&self) -> Instant {
        self.started
    }

    /// Wall-clock start time.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn participants(&self) -> &HashMap<String, Participant> {
        &self.participants
    }

    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    /// Whether the round still accepts guesses at `now`.
    pub fn is_open(&self, now: Instant) -> bool {
        self.outcome.is_none() && !self.is_expired(now)
    }

    /// Whether the timeout has passed at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.timeout
    }

    /// Time left at `now`.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.timeout.saturating_sub(now.saturating_duration_since(self.started))
    }

    /// Evaluate a guess.
    ///
    /// Every guess is evaluated until one is correct; wrong guesses never lock
    /// a player out.
    pub fn submit_guess(
        &mut self,
        player: &str,
        answer: &str,
        matcher: &NameMatcher,
        config: &Config,
        now: Instant,
    ) -> GuessOutcome {
        if self.outcome.is_some() {
            return GuessOutcome::Closed;
        }
        if self.is_expired(now) {
            self.outcome = Some(RoundOutcome::TimedOut);
            return GuessOutcome::Closed;
        }

        let answer = answer.trim();
        let result = matcher.judge_answer(
            answer,
            &self.celebrity,
            config.matching.threshold,
            config.matching.suggestion_threshold,
        );

        let participant = self
            .participants
            .entry(player.to_string())
            .or_insert_with(|| Participant {
                attempts: 0,
                last_answer: String::new(),
                last_score: 0,
            });
        participant.attempts += 1;
        participant.last_answer = answer.to_string();
        participant.last_score = result.score();

        if !result.is_correct() {
            tracing::debug!(
                "Wrong answer from {}: {:?} ({})",
                player,
                answer,
                result.score()
            );
            return GuessOutcome::Incorrect(result);
        }

        let elapsed = now.saturating_duration_since(self.started);
        let points = calculate_points(&config.quiz, elapsed);
        tracing::info!(
            "{} answered {} correctly in {:.1}s",
            player,
            self.celebrity.name,
            elapsed.as_secs_f32()
        );
        self.outcome = Some(RoundOutcome::Answered {
            player: player.to_string(),
            answer: answer.to_string(),
            points,
            elapsed,
        });

        GuessOutcome::Correct {
            points,
            elapsed,
            result,
        }
    }

    /// Close the round as timed out if it is still open and expired.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.outcome.is_none() && self.is_expired(now) {
            self.outcome = Some(RoundOutcome::TimedOut);
            return true;
        }
        false
    }

    /// Close the round without a winner.
    pub fn cancel(&mut self) {
        if self.outcome.is_none() {
            self.outcome = Some(RoundOutcome::Cancelled);
        }
    }
}

/// Points for a correct answer after `elapsed`.
pub fn calculate_points(config: &QuizConfig, elapsed: Duration) -> u32 {
    let mut points = config.points_correct;
    if elapsed <= Duration::from_secs(config.quick_bonus_secs) {
        points += config.points_quick_bonus;
    }
    points
}

/// Registry statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub rounds_started: u64,
    pub rounds_answered: u64,
    pub guesses: u64,
    pub active: usize,
}

/// Active rounds keyed by channel.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    active: HashMap<String, QuizSession>,
    stats: SessionStats,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a round in a channel that has none running.
    pub fn start(
        &mut self,
        channel: &str,
        celebrity: CelebrityRecord,
        timeout: Duration,
        now: Instant,
    ) -> Result<&mut QuizSession> {
        if self.active.contains_key(channel) {
            tracing::warn!("Refusing to start a second quiz in channel {}", channel);
            return Err(crate::Error::QuizAlreadyActive(channel.to_string()));
        }

        tracing::info!(
            "Starting quiz in channel {} for {}",
            channel,
            celebrity.name
        );
        self.stats.rounds_started += 1;
        let session = QuizSession::started_at(channel, celebrity, timeout, now);
        Ok(self.active.entry(channel.to_string()).or_insert(session))
    }

    pub fn get(&self, channel: &str) -> Option<&QuizSession> {
        self.active.get(channel)
    }

    pub fn is_active(&self, channel: &str) -> bool {
        self.active.contains_key(channel)
    }

    /// Route a guess to the channel's round, finishing it when it closes.
    pub fn submit_guess(
        &mut self,
        channel: &str,
        player: &str,
        answer: &str,
        matcher: &NameMatcher,
        config: &Config,
        now: Instant,
    ) -> Result<GuessOutcome> {
        let session = self
            .active
            .get_mut(channel)
            .ok_or_else(|| crate::Error::NoActiveQuiz(channel.to_string()))?;

        let outcome = session.submit_guess(player, answer, matcher, config, now);
        match &outcome {
            GuessOutcome::Correct { .. } => {
                self.stats.guesses += 1;
                self.stats.rounds_answered += 1;
                self.active.remove(channel);
            }
            GuessOutcome::Incorrect(_) => {
                self.stats.guesses += 1;
            }
            GuessOutcome::Closed => {
                self.active.remove(channel);
            }
        }
        Ok(outcome)
    }

    /// Remove a channel's round, returning it.
    pub fn finish(&mut self, channel: &str) -> Result<QuizSession> {
        self.active
            .remove(channel)
            .ok_or_else(|| crate::Error::NoActiveQuiz(channel.to_string()))
    }

    /// Drop rounds older than their timeout plus a grace period.
    pub fn cleanup_stale(&mut self, now: Instant) -> usize {
        let before = self.active.len();
        self.active.retain(|channel, session| {
            let age = now.saturating_duration_since(session.start_instant());
            let stale = age > session.timeout + STALE_GRACE;
            if stale {
                tracing::warn!("Cleaning up stale quiz in channel {}", channel);
            }
            !stale
        });
        let cleaned = before - self.active.len();
        if cleaned > 0 {
            tracing::info!("Cleaned up {} stale quiz sessions", cleaned);
        }
        cleaned
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            active: self.active.len(),
            ..self.stats
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn test_points_quick_bonus() {
        let config = QuizConfig::default();
        assert_eq!(calculate_points(&config, Duration::from_secs(3)), 15);
        assert_eq!(calculate_points(&config, Duration::from_secs(10)), 15);
        assert_eq!(calculate_points(&config, Duration::from_secs(11)), 10);
    }

    #[test]
    fn test_first_correct_answer_wins() {
        let start = Instant::now();
        let mut session = QuizSession::started_at(
            "general",
            CelebrityRecord::new("Fairuz").with_alias("Fairouz"),
            Duration::from_secs(30),
            start,
        );
        let matcher = NameMatcher::new();
        let config = config();

        let at = |secs| start + Duration::from_secs(secs);

        let wrong = session.submit_guess("amira", "Sabah", &matcher, &config, at(2));
        assert!(matches!(wrong, GuessOutcome::Incorrect(_)));

        let right = session.submit_guess("amira", "fairouz", &matcher, &config, at(12));
        assert!(matches!(right, GuessOutcome::Correct { points: 10, .. }));

        let late = session.submit_guess("karim", "Fairuz", &matcher, &config, at(13));
        assert_eq!(late, GuessOutcome::Closed);

        assert_eq!(session.participants()["amira"].attempts, 2);
        assert!(!session.participants().contains_key("karim"));
    }

    #[test]
    fn test_expired_round_is_closed() {
        let start = Instant::now();
        let mut session = QuizSession::started_at(
            "general",
            CelebrityRecord::new("Fairuz"),
            Duration::from_secs(30),
            start,
        );
        let outcome = session.submit_guess(
            "amira",
            "Fairuz",
            &NameMatcher::new(),
            &config(),
            start + Duration::from_secs(31),
        );
        assert_eq!(outcome, GuessOutcome::Closed);
        assert_eq!(session.outcome(), Some(&RoundOutcome::TimedOut));
    }

    #[test]
    fn test_threshold_decides_the_round() {
        let start = Instant::now();
        let record = CelebrityRecord::new("Mohamed Salah");
        let matcher = NameMatcher::new();
        let mut config = config();
        config.matching.threshold = 95;

        let mut session =
            QuizSession::started_at("general", record, Duration::from_secs(30), start);
        let close = session.submit_guess("amira", "Mohamed Slah", &matcher, &config, start);
        match close {
            GuessOutcome::Incorrect(result) => assert_eq!(result.score(), 93),
            other => panic!("expected an incorrect guess, got {:?}", other),
        }
        assert!(session.outcome().is_none());
    }
}
