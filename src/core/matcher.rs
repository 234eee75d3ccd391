//! Answer matching engine.
//!
//! Decides whether a free-text answer names a given celebrity. Rules are tried
//! in order and the first one that fires decides:
//! 1. Exact canonical name
//! 2. Exact alias, subject to the word-count rule
//! 3. Exact Arabic name
//! 4. Minimum input length
//! 5. Single-word input only matches single-word names
//! 6. Approximate search over all names
//! 7. Word overlap
//! 8. No match
//!
//! Everything here is pure: the engine holds only its configuration and can be
//! shared freely between concurrent rounds.

use crate::core::normalizer::{normalize, tokens, word_count};
use crate::models::celebrity::CelebrityRecord;
use crate::models::matching::{AliasPolicy, MatchProfile, MatchResult};
use std::collections::HashSet;

/// Rule knobs for the match engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Normalized answers shorter than this (in characters) are rejected.
    pub min_input_len: usize,
    /// Largest edit distance, as a fraction of the longer string, that still
    /// counts as an approximate hit.
    pub fuzzy_tolerance: f64,
    /// Approximate hits at or above this score are accepted.
    pub fuzzy_accept: u8,
    /// Whether the word-overlap fallback runs.
    pub word_overlap: bool,
    /// Score given to word-overlap matches.
    pub word_overlap_score: u8,
    /// Single-word alias handling for multi-word celebrities.
    pub alias_policy: AliasPolicy,
}

impl MatcherConfig {
    /// Build the configuration for a named preset.
    pub fn from_profile(profile: MatchProfile) -> Self {
        match profile {
            MatchProfile::Standard => Self {
                min_input_len: 3,
                fuzzy_tolerance: 0.4,
                fuzzy_accept: 70,
                word_overlap: true,
                word_overlap_score: 85,
                alias_policy: AliasPolicy::ShortCircuit,
            },
            MatchProfile::Strict => Self {
                min_input_len: 4,
                fuzzy_tolerance: 0.3,
                fuzzy_accept: 80,
                word_overlap: false,
                word_overlap_score: 85,
                alias_policy: AliasPolicy::ShortCircuit,
            },
        }
    }

    /// Override the alias policy.
    pub fn with_alias_policy(mut self, alias_policy: AliasPolicy) -> Self {
        self.alias_policy = alias_policy;
        self
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self::from_profile(MatchProfile::Standard)
    }
}

/// A name the answer is compared against in the approximate stages.
struct Candidate<'a> {
    /// Label reported back when this candidate wins.
    label: String,
    /// Text compared against the normalized answer.
    text: String,
    /// Normalized form of the originating name.
    normalized: &'a str,
}

/// Answer matching engine.
#[derive(Debug, Clone, Default)]
pub struct NameMatcher {
    config: MatcherConfig,
}

impl NameMatcher {
    /// Create a matcher with the standard preset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with custom configuration.
    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Create a matcher for a named preset.
    pub fn with_profile(profile: MatchProfile) -> Self {
        Self::with_config(MatcherConfig::from_profile(profile))
    }

    /// Current configuration.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Match an answer against a celebrity.
    pub fn match_celebrity_name(
        &self,
        user_input: &str,
        celebrity: &CelebrityRecord,
    ) -> MatchResult {
        let input = normalize(user_input);
        if input.is_empty() {
            tracing::debug!("Empty answer for {:?}", celebrity.name);
            return MatchResult::rejected();
        }
        let canonical = normalize(&celebrity.name);

        tracing::debug!(
            "Matching {:?} (normalized {:?}) against {:?} (normalized {:?})",
            user_input,
            input,
            celebrity.name,
            canonical
        );

        if input == canonical {
            tracing::debug!("Exact canonical match");
            return MatchResult::correct(100, &celebrity.name);
        }

        let aliases: Vec<String> = celebrity.aliases.iter().map(|a| normalize(a)).collect();
        let canonical_words = word_count(&canonical);
        let mut skipped = vec![false; aliases.len()];

        let named_aliases = celebrity.aliases.iter().zip(&aliases).enumerate();
        for (index, (alias, normalized_alias)) in named_aliases {
            if input != *normalized_alias {
                continue;
            }
            if canonical_words <= 1 || word_count(normalized_alias) > 1 {
                tracing::debug!("Alias match: {}", alias);
                return MatchResult::correct(100, alias);
            }
            match self.config.alias_policy {
                AliasPolicy::ShortCircuit => {
                    tracing::debug!("Single-word alias {:?} rejected for multi-word name", alias);
                    return MatchResult::rejected();
                }
                AliasPolicy::Continue => {
                    tracing::debug!("Single-word alias {:?} skipped for multi-word name", alias);
                    skipped[index] = true;
                }
            }
        }

        let arabic = celebrity.arabic_name.as_deref().map(|a| (a, normalize(a)));
        if let Some((arabic_name, normalized_arabic)) = &arabic {
            if input == *normalized_arabic {
                tracing::debug!("Arabic name match");
                return MatchResult::correct(100, *arabic_name);
            }
        }

        if input.chars().count() < self.config.min_input_len {
            tracing::debug!("Answer too short for approximate matching");
            return MatchResult::rejected();
        }

        let mut candidates: Vec<Candidate<'_>> = Vec::new();
        candidates.push(Candidate {
            label: celebrity.name.clone(),
            text: celebrity.name.to_lowercase(),
            normalized: &canonical,
        });
        let kept_aliases = celebrity
            .aliases
            .iter()
            .zip(&aliases)
            .zip(&skipped)
            .filter(|(_, skip)| !**skip)
            .map(|(pair, _)| pair);
        for (alias, normalized_alias) in kept_aliases {
            candidates.push(Candidate {
                label: alias.clone(),
                text: alias.to_lowercase(),
                normalized: normalized_alias,
            });
        }
        if let Some((arabic_name, normalized_arabic)) = &arabic {
            candidates.push(Candidate {
                label: arabic_name.to_string(),
                text: arabic_name.to_lowercase(),
                normalized: normalized_arabic,
            });
        }
        let normalized_forms: Vec<Candidate<'_>> = candidates
            .iter()
            .map(|c| Candidate {
                label: c.normalized.to_string(),
                text: c.normalized.to_string(),
                normalized: c.normalized,
            })
            .collect();
        candidates.extend(normalized_forms);

        let input_words = tokens(&input);
        if input_words.len() == 1 {
            let word = input_words[0];
            for candidate in &candidates {
                let candidate_words = tokens(candidate.normalized);
                if candidate_words.len() == 1 && candidate_words[0] == word {
                    tracing::debug!("Single-word match: {}", candidate.label);
                    return MatchResult::correct(100, candidate.label.clone());
                }
            }
            tracing::debug!("Single-word answer does not name a single-word celebrity");
            return MatchResult::rejected();
        }

        let best = self.best_approximate(&input, &candidates);
        if let Some((score, candidate)) = best {
            if score >= self.config.fuzzy_accept {
                tracing::debug!("Approximate match {} with score {}", candidate.label, score);
                return MatchResult::correct(score, candidate.label.clone());
            }
        }

        if self.config.word_overlap {
            if let Some(candidate) = word_overlap(&input_words, &candidates) {
                tracing::debug!("Word overlap match: {}", candidate.label);
                return MatchResult::correct(
                    self.config.word_overlap_score,
                    candidate.label.clone(),
                );
            }
        }

        match best {
            Some((score, candidate)) => {
                tracing::debug!("Near miss {} with score {}", candidate.label, score);
                MatchResult::near_miss(score, candidate.label.clone())
            }
            None => {
                tracing::debug!("No match");
                MatchResult::rejected()
            }
        }
    }

    /// Whether the answer scores at or above `threshold`.
    pub fn is_correct_answer(
        &self,
        user_input: &str,
        celebrity: &CelebrityRecord,
        threshold: u8,
    ) -> bool {
        self.match_celebrity_name(user_input, celebrity).score >= threshold
    }

    /// Best approximate candidate inside the tolerance; earlier candidates win ties.
    fn best_approximate<'c, 'a>(
        &self,
        input: &str,
        candidates: &'c [Candidate<'a>],
    ) -> Option<(u8, &'c Candidate<'a>)> {
        let mut best: Option<(u8, &Candidate<'a>)> = None;
        for candidate in candidates {
            let tolerance = self.config.fuzzy_tolerance;
            let Some(score) = approximate_score(input, &candidate.text, tolerance) else {
                continue;
            };
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, candidate));
            }
        }
        best
    }
}

/// First candidate sharing at least half of the smaller word set with the answer.
fn word_overlap<'c, 'a>(
    input_words: &[&str],
    candidates: &'c [Candidate<'a>],
) -> Option<&'c Candidate<'a>> {
    let input_set: HashSet<&str> = input_words.iter().copied().collect();
    candidates.iter().find(|candidate| {
        let candidate_set: HashSet<&str> = tokens(candidate.normalized).into_iter().collect();
        let shared = input_set.intersection(&candidate_set).count();
        let smaller = input_set.len().min(candidate_set.len());
        shared > 0 && shared * 2 >= smaller
    })
}

/// Approximate similarity score (0-100) of two strings, or `None` when they are
/// further apart than `tolerance`.
///
/// Compares both the strings as written and with their words sorted, so a
/// swapped "first last" order is not penalised.
pub fn approximate_score(input: &str, candidate: &str, tolerance: f64) -> Option<u8> {
    let direct = similarity(input, candidate);
    let reordered = similarity(&sorted_words(input), &sorted_words(candidate));
    let (distance, longest) = if reordered.0 * direct.1 < direct.0 * reordered.1 {
        reordered
    } else {
        direct
    };

    if longest == 0 {
        return Some(100);
    }
    if distance as f64 > tolerance * longest as f64 {
        return None;
    }

    let score = 100.0 * (longest - distance) as f64 / longest as f64;
    Some(score.round() as u8)
}

/// Levenshtein distance and the longer length, in characters.
fn similarity(a: &str, b: &str) -> (usize, usize) {
    let distance = strsim::levenshtein(a, b);
    let longest = a.chars().count().max(b.chars().count());
    (distance, longest)
}

fn sorted_words(text: &str) -> String {
    let mut words: Vec<&str> = text.split_whitespace().collect();
    words.sort_unstable();
    words.join(" ")
}

/// Character similarity of two words: `(len(longer) - distance) / len(longer)`.
pub fn word_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (distance, longest) = similarity(a, b);
    (longest - distance) as f64 / longest as f64
}

/// Human-readable description of a score.
pub fn match_explanation(score: u8) -> &'static str {
    match score {
        100..=u8::MAX => "Perfect match!",
        90..=99 => "Very close match!",
        80..=89 => "Good match with minor differences.",
        70..=79 => "Close match, but not quite right.",
        60..=69 => "Partial match, but not quite right.",
        _ => "No match found.",
    }
}

/// Capitalize the first letter of each word and lowercase the rest.
pub fn display_name(user_input: &str) -> String {
    user_input
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salah() -> CelebrityRecord {
        CelebrityRecord::new("Mohamed Salah")
            .with_alias("Salah")
            .with_alias("Mo Salah")
            .with_arabic_name("محمد صلاح")
    }

    #[test]
    fn test_exact_canonical() {
        let result = NameMatcher::new().match_celebrity_name("Mohamed Salah", &salah());
        assert_eq!(result, MatchResult::correct(100, "Mohamed Salah"));
    }

    #[test]
    fn test_variant_spelling_is_exact() {
        let result = NameMatcher::new().match_celebrity_name("MOHAMMED SALAH", &salah());
        assert!(result.is_correct);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_empty_answer_never_matches_empty_labels() {
        let record = CelebrityRecord::new("Fairuz").with_alias("");
        let result = NameMatcher::new().match_celebrity_name("", &record);
        assert_eq!(result, MatchResult::rejected());

        let diacritic_only = CelebrityRecord::new("\u{064E}");
        let result = NameMatcher::new().match_celebrity_name("", &diacritic_only);
        assert_eq!(result, MatchResult::rejected());
    }

    #[test]
    fn test_multi_word_alias_accepted() {
        let result = NameMatcher::new().match_celebrity_name("mo salah", &salah());
        assert_eq!(result, MatchResult::correct(100, "Mo Salah"));
    }

    #[test]
    fn test_single_word_alias_rejected_for_multi_word_name() {
        let result = NameMatcher::new().match_celebrity_name("Salah", &salah());
        assert_eq!(result, MatchResult::rejected());
    }

    #[test]
    fn test_alias_policy_continue_reaches_later_rules() {
        // The Arabic name normalizes to the same single word as the alias.
        let record = CelebrityRecord::new("Umm Kulthum")
            .with_alias("Kwkb")
            .with_arabic_name("كوكب");

        let short_circuit = NameMatcher::new().match_celebrity_name("kwkb", &record);
        assert_eq!(short_circuit, MatchResult::rejected());

        let matcher = NameMatcher::with_config(
            MatcherConfig::default().with_alias_policy(AliasPolicy::Continue),
        );
        let result = matcher.match_celebrity_name("kwkb", &record);
        assert_eq!(result, MatchResult::correct(100, "كوكب"));
    }

    #[test]
    fn test_alias_policy_continue_still_blocks_skipped_alias() {
        let matcher = NameMatcher::with_config(
            MatcherConfig::default().with_alias_policy(AliasPolicy::Continue),
        );
        let result = matcher.match_celebrity_name("Salah", &salah());
        assert!(!result.is_correct);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_arabic_name_match() {
        let result = NameMatcher::new().match_celebrity_name("محمد صلاح", &salah());
        assert_eq!(result, MatchResult::correct(100, "محمد صلاح"));
    }

    #[test]
    fn test_too_short() {
        let record = CelebrityRecord::new("Mo Ng");
        let result = NameMatcher::new().match_celebrity_name("mo", &record);
        assert_eq!(result, MatchResult::rejected());
    }

    #[test]
    fn test_single_word_single_name() {
        let record = CelebrityRecord::new("Fairuz").with_alias("Fairouz");
        let result = NameMatcher::new().match_celebrity_name("FAIROUZ", &record);
        assert_eq!(result, MatchResult::correct(100, "Fairouz"));
    }

    #[test]
    fn test_typo_accepted() {
        let result = NameMatcher::new().match_celebrity_name("Mohamed Slah", &salah());
        assert!(result.is_correct);
        assert!(result.score >= 70);
    }

    #[test]
    fn test_approximate_score() {
        assert_eq!(
            approximate_score("omar sarif", "omar sarif", 0.4),
            Some(100)
        );
        assert_eq!(
            approximate_score("sarif omar", "omar sarif", 0.4),
            Some(100)
        );
        assert_eq!(approximate_score("zzzzzz", "omar sarif", 0.4), None);
        assert_eq!(approximate_score("", "", 0.4), Some(100));
    }

    #[test]
    fn test_word_similarity() {
        assert_eq!(word_similarity("salah", "salah"), 1.0);
        assert_eq!(word_similarity("", "salah"), 0.0);
        assert!((word_similarity("salah", "slah") - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_match_explanation() {
        assert_eq!(match_explanation(100), "Perfect match!");
        assert_eq!(match_explanation(95), "Very close match!");
        assert_eq!(match_explanation(80), "Good match with minor differences.");
        assert_eq!(match_explanation(72), "Close match, but not quite right.");
        assert_eq!(match_explanation(60), "Partial match, but not quite right.");
        assert_eq!(match_explanation(0), "No match found.");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("omar SHARIF"), "Omar Sharif");
        assert_eq!(display_name(""), "");
    }
}
