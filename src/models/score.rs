//! Player scoreboard data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Running totals for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    /// Display name
    pub username: String,
    /// Points across all games
    #[serde(default)]
    pub total_points: u64,
    /// Rounds won
    #[serde(default)]
    pub correct_answers: u32,
    /// Games joined
    #[serde(default)]
    pub quizzes_played: u32,
    /// Last time the player scored or joined a game
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played: Option<DateTime<Utc>>,
}

impl PlayerScore {
    fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            total_points: 0,
            correct_answers: 0,
            quizzes_played: 0,
            last_played: None,
        }
    }
}

/// Scores keyed by player id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    #[serde(default)]
    pub players: HashMap<String, PlayerScore>,
}

impl Scoreboard {
    /// Credit a won round.
    pub fn record_correct(&mut self, player: &str, points: u32, now: DateTime<Utc>) {
        let entry = self.entry(player);
        entry.total_points += u64::from(points);
        entry.correct_answers += 1;
        entry.last_played = Some(now);
    }

    /// Count a game the player took part in.
    pub fn record_game(&mut self, player: &str, now: DateTime<Utc>) {
        let entry = self.entry(player);
        entry.quizzes_played += 1;
        entry.last_played = Some(now);
    }

    pub fn get(&self, player: &str) -> Option<&PlayerScore> {
        self.players.get(player)
    }

    /// Top players by points; ties go to more correct answers, then by name.
    pub fn leaderboard(&self, limit: usize) -> Vec<&PlayerScore> {
        let mut ranked: Vec<&PlayerScore> = self.players.values().collect();
        ranked.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then(b.correct_answers.cmp(&a.correct_answers))
                .then_with(|| a.username.cmp(&b.username))
        });
        ranked.truncate(limit);
        ranked
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn entry(&mut self, player: &str) -> &mut PlayerScore {
        self.players
            .entry(player.to_string())
            .or_insert_with(|| PlayerScore::new(player))
    }
}
