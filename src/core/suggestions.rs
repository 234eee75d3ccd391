//! Near-miss hints on top of the match engine.

use crate::core::matcher::NameMatcher;
use crate::models::celebrity::CelebrityRecord;
use crate::models::matching::{MatchResult, SuggestionResult};

/// Most aliases offered as hints.
const MAX_ALIAS_SUGGESTIONS: usize = 2;

impl NameMatcher {
    /// Match an answer and, for an incorrect answer scoring at least
    /// `suggestion_threshold`, list hints: the matched label, up to two
    /// aliases, then the Arabic name.
    pub fn match_with_suggestions(
        &self,
        user_input: &str,
        celebrity: &CelebrityRecord,
        suggestion_threshold: u8,
    ) -> SuggestionResult {
        let result = self.match_celebrity_name(user_input, celebrity);
        with_hints(result, celebrity, suggestion_threshold)
    }

    /// Like [`NameMatcher::match_with_suggestions`], but an answer the engine
    /// accepts with a score under `threshold` is downgraded to a near miss.
    pub fn judge_answer(
        &self,
        user_input: &str,
        celebrity: &CelebrityRecord,
        threshold: u8,
        suggestion_threshold: u8,
    ) -> SuggestionResult {
        let mut result = self.match_celebrity_name(user_input, celebrity);
        if result.is_correct && result.score < threshold {
            tracing::debug!(
                "Score {} is below the threshold {}",
                result.score,
                threshold
            );
            result.is_correct = false;
        }
        with_hints(result, celebrity, suggestion_threshold)
    }
}

fn with_hints(
    result: MatchResult,
    celebrity: &CelebrityRecord,
    suggestion_threshold: u8,
) -> SuggestionResult {
    let mut suggestions = Vec::new();
    if !result.is_correct && result.score >= suggestion_threshold {
        suggestions.extend(result.matched_label.iter().cloned());
        suggestions.extend(celebrity.aliases.iter().take(MAX_ALIAS_SUGGESTIONS).cloned());
        suggestions.extend(celebrity.arabic_name.iter().cloned());
    }

    SuggestionResult { result, suggestions }
}
