//! Integration tests for answer matching.
//!
//! Tests cover:
//! - Exact, alias and Arabic matches
//! - Word-count and length guards
//! - Approximate matching, word overlap and presets
//! - Suggestions and determinism

use celebrity_quiz::core::matcher::{MatcherConfig, NameMatcher};
use celebrity_quiz::models::celebrity::CelebrityRecord;
use celebrity_quiz::models::matching::{AliasPolicy, MatchProfile, MatchResult};

fn salah() -> CelebrityRecord {
    CelebrityRecord::new("Mohamed Salah")
        .with_alias("Salah")
        .with_alias("Mo Salah")
        .with_arabic_name("محمد صلاح")
}

fn nadia() -> CelebrityRecord {
    CelebrityRecord::new("Nadia Lutfi")
        .with_alias("Paula Mohamed Shafiq")
        .with_alias("Bolla")
        .with_alias("Nana")
        .with_arabic_name("نادية لطفي")
}

// ========== EXACT MATCH TESTS ==========

#[test]
fn test_canonical_name_always_matches() {
    let matcher = NameMatcher::new();
    let records = [
        salah(),
        nadia(),
        CelebrityRecord::new("Fairuz"),
        CelebrityRecord::new("Omar Sharif"),
    ];
    for record in records {
        let result = matcher.match_celebrity_name(&record.name, &record);
        assert!(result.is_correct, "{} did not match itself", record.name);
        assert_eq!(result.score, 100);
    }
}

#[test]
fn test_case_and_variant_invariance() {
    let record = CelebrityRecord::new("Mohamed Salah");
    let result = NameMatcher::new().match_celebrity_name("MOHAMMED SALAH", &record);
    assert_eq!(result, MatchResult::correct(100, "Mohamed Salah"));
}

#[test]
fn test_arabic_answer() {
    let result = NameMatcher::new().match_celebrity_name("محمد صلاح", &salah());
    assert!(result.is_correct);
    assert_eq!(result.matched_label.as_deref(), Some("محمد صلاح"));
}

// ========== GUARD TESTS ==========

#[test]
fn test_single_word_alias_for_multi_word_name() {
    let result = NameMatcher::new().match_celebrity_name("Salah", &salah());
    assert_eq!(result, MatchResult::rejected());
}

#[test]
fn test_single_word_alias_for_single_word_name() {
    let record = CelebrityRecord::new("Fairuz").with_alias("Fairouz");
    let result = NameMatcher::new().match_celebrity_name("Fairouz", &record);
    assert_eq!(result, MatchResult::correct(100, "Fairouz"));
}

#[test]
fn test_minimum_length() {
    let result = NameMatcher::new().match_celebrity_name("Mo", &salah());
    assert_eq!(result, MatchResult::rejected());
}

#[test]
fn test_first_name_never_matches_full_name() {
    let record = CelebrityRecord::new("Omar Sharif");
    let result = NameMatcher::new().match_celebrity_name("Omar", &record);
    assert!(!result.is_correct);
    assert_eq!(result.score, 0);
}

#[test]
fn test_empty_answer() {
    let result = NameMatcher::new().match_celebrity_name("", &salah());
    assert_eq!(result, MatchResult::rejected());
}

#[test]
fn test_blank_answer_against_empty_alias() {
    let record = CelebrityRecord::new("Fairuz").with_alias("");
    let matcher = NameMatcher::new();
    for answer in ["", "   ", "\u{064E}"] {
        let result = matcher.match_celebrity_name(answer, &record);
        assert_eq!(result, MatchResult::rejected(), "{:?} was accepted", answer);
    }
}

// ========== APPROXIMATE MATCH TESTS ==========

#[test]
fn test_single_typo_accepted() {
    let record = CelebrityRecord::new("Mohamed Salah");
    let result = NameMatcher::new().match_celebrity_name("Mohamed Slah", &record);
    assert!(result.is_correct);
    assert!(result.score >= 70);
}

#[test]
fn test_strict_profile_needs_higher_score() {
    let record = CelebrityRecord::new("Mohamed Salah");

    let standard = NameMatcher::new().match_celebrity_name("Mohamed Sl", &record);
    assert!(standard.is_correct);
    assert_eq!(standard.score, 79);

    let strict =
        NameMatcher::with_profile(MatchProfile::Strict).match_celebrity_name("Mohamed Sl", &record);
    assert!(!strict.is_correct);
    assert_eq!(strict.score, 79);
}

#[test]
fn test_word_overlap_only_in_standard() {
    let record = CelebrityRecord::new("Adel Emam");

    let standard = NameMatcher::new().match_celebrity_name("Adel Imam Mohamed", &record);
    assert_eq!(standard, MatchResult::correct(85, "Adel Emam"));

    let strict = NameMatcher::with_profile(MatchProfile::Strict)
        .match_celebrity_name("Adel Imam Mohamed", &record);
    assert_eq!(strict, MatchResult::rejected());
}

#[test]
fn test_is_correct_answer_threshold() {
    let record = CelebrityRecord::new("Mohamed Salah");
    let matcher = NameMatcher::new();
    assert!(matcher.is_correct_answer("Mohamed Sl", &record, 79));
    assert!(!matcher.is_correct_answer("Mohamed Sl", &record, 80));
}

#[test]
fn test_continue_policy_does_not_accept_skipped_alias() {
    let matcher =
        NameMatcher::with_config(MatcherConfig::default().with_alias_policy(AliasPolicy::Continue));
    let result = matcher.match_celebrity_name("Salah", &salah());
    assert!(!result.is_correct);
}

// ========== SUGGESTION TESTS ==========

#[test]
fn test_suggestion_threshold_boundary() {
    let matcher = NameMatcher::new();

    let at = matcher.match_with_suggestions("nodio lotfu", &nadia(), 64);
    assert!(!at.is_correct());
    assert_eq!(at.score(), 64);
    assert!(!at.suggestions.is_empty());
    assert_eq!(at.suggestions[0], "Nadia Lutfi");

    let above = matcher.match_with_suggestions("nodio lotfu", &nadia(), 65);
    assert_eq!(above.score(), 64);
    assert!(above.suggestions.is_empty());
}

#[test]
fn test_suggestions_include_arabic_name_last() {
    let result = NameMatcher::new().match_with_suggestions("nodio lotfu", &nadia(), 60);
    assert_eq!(result.suggestions.len(), 4);
    assert_eq!(
        result.suggestions.last().map(String::as_str),
        Some("نادية لطفي")
    );
}

#[test]
fn test_deterministic() {
    let matcher = NameMatcher::new();
    let first = matcher.match_with_suggestions("nodio lotfu", &nadia(), 60);
    let second = matcher.match_with_suggestions("nodio lotfu", &nadia(), 60);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
