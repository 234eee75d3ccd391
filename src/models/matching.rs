//! Match verdict models.

use serde::{Deserialize, Serialize};

/// Verdict of matching one answer against one celebrity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Final verdict.
    pub is_correct: bool,
    /// Confidence, 0-100.
    pub score: u8,
    /// The name or alias that produced the score.
    pub matched_label: Option<String>,
}

impl MatchResult {
    /// A correct verdict.
    pub fn correct(score: u8, label: impl Into<String>) -> Self {
        Self {
            is_correct: true,
            score,
            matched_label: Some(label.into()),
        }
    }

    /// An incorrect verdict with score 0 and no label.
    pub fn rejected() -> Self {
        Self {
            is_correct: false,
            score: 0,
            matched_label: None,
        }
    }

    /// An incorrect verdict that still names the closest candidate.
    pub fn near_miss(score: u8, label: impl Into<String>) -> Self {
        Self {
            is_correct: false,
            score,
            matched_label: Some(label.into()),
        }
    }
}

/// A match verdict plus hints for near misses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResult {
    #[serde(flatten)]
    pub result: MatchResult,
    /// Candidate labels to hint at; empty when correct or too far off.
    pub suggestions: Vec<String>,
}

impl SuggestionResult {
    pub fn is_correct(&self) -> bool {
        self.result.is_correct
    }

    pub fn score(&self) -> u8 {
        self.result.score
    }
}

/// Named matcher rule presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchProfile {
    /// Lenient fuzzy search with word-overlap fallback.
    #[default]
    Standard,
    /// Longer minimum input, tighter fuzzy search, no word-overlap fallback.
    Strict,
}

impl std::fmt::Display for MatchProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchProfile::Standard => write!(f, "standard"),
            MatchProfile::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for MatchProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(MatchProfile::Standard),
            "strict" => Ok(MatchProfile::Strict),
            other => Err(format!("unknown match profile: {}", other)),
        }
    }
}

/// What to do when the answer equals a single-word alias of a multi-word celebrity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasPolicy {
    /// Reject the answer outright.
    #[default]
    ShortCircuit,
    /// Skip that alias and keep evaluating.
    Continue,
}
