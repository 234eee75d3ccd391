//! Check command implementation.

use super::open_catalog;
use crate::cli::args::OutputFormat;
use crate::core::matcher::{match_explanation, MatcherConfig, NameMatcher};
use crate::core::normalizer::normalize;
use crate::models::celebrity::CelebrityRecord;
use crate::models::config::Config;
use crate::models::matching::{AliasPolicy, MatchProfile, SuggestionResult};
use anyhow::Result;
use colored::Colorize;

/// Options for the check command.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub format: OutputFormat,
    pub profile: Option<MatchProfile>,
    pub alias_policy: Option<AliasPolicy>,
    pub threshold: Option<u8>,
    pub suggestion_threshold: Option<u8>,
}

/// Execute check command.
///
/// The celebrity is looked up in the catalog; when it is not there, a bare
/// record with just that name is used. The verdict applies the configured
/// threshold the same way quiz rounds do.
pub fn execute_check(
    config: &Config,
    answer: &str,
    celebrity: &str,
    options: &CheckOptions,
) -> Result<()> {
    let record = match open_catalog(config) {
        Ok(catalog) => catalog
            .require(celebrity)
            .cloned()
            .map_err(anyhow::Error::from),
        Err(e) => Err(e),
    };
    let record = record.unwrap_or_else(|e| {
        tracing::warn!("{:#}; matching against the name only", e);
        CelebrityRecord::new(celebrity)
    });

    let profile = options.profile.unwrap_or(config.matching.profile);
    let alias_policy = options.alias_policy.unwrap_or(config.matching.alias_policy);
    let threshold = options.threshold.unwrap_or(config.matching.threshold);
    let suggestion_threshold = options
        .suggestion_threshold
        .unwrap_or(config.matching.suggestion_threshold);

    let matcher = NameMatcher::with_config(
        MatcherConfig::from_profile(profile).with_alias_policy(alias_policy),
    );
    let result = matcher.judge_answer(answer, &record, threshold, suggestion_threshold);

    match options.format {
        OutputFormat::Json => print_json(answer, &record, &result, threshold)?,
        OutputFormat::Table => print_table(answer, &record, &result, profile, threshold),
    }

    Ok(())
}

/// Print the verdict as JSON.
fn print_json(
    answer: &str,
    record: &CelebrityRecord,
    result: &SuggestionResult,
    threshold: u8,
) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        answer: &'a str,
        normalized_answer: String,
        celebrity: &'a str,
        normalized_celebrity: String,
        threshold: u8,
        #[serde(flatten)]
        result: &'a SuggestionResult,
        explanation: &'static str,
    }

    let output = JsonOutput {
        answer,
        normalized_answer: normalize(answer),
        celebrity: &record.name,
        normalized_celebrity: normalize(&record.name),
        threshold,
        result,
        explanation: match_explanation(result.score()),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print the verdict as a table.
fn print_table(
    answer: &str,
    record: &CelebrityRecord,
    result: &SuggestionResult,
    profile: MatchProfile,
    threshold: u8,
) {
    let verdict = if result.is_correct() {
        "CORRECT".green().bold()
    } else {
        "INCORRECT".red().bold()
    };

    println!(
        "{:<12} {} {} {}",
        "Answer:".bold(),
        answer,
        "->".dimmed(),
        normalize(answer)
    );
    println!(
        "{:<12} {} {} {}",
        "Celebrity:".bold(),
        record.name,
        "->".dimmed(),
        normalize(&record.name)
    );
    println!("{:<12} {}", "Profile:".bold(), profile);
    println!("{:<12} {}", "Threshold:".bold(), threshold);
    println!("{}", "-".repeat(60));
    println!("{:<12} {}", "Verdict:".bold(), verdict);
    println!("{:<12} {}", "Score:".bold(), result.score());
    println!(
        "{:<12} {}",
        "Matched:".bold(),
        result.result.matched_label.as_deref().unwrap_or("-")
    );
    println!(
        "{:<12} {}",
        "Note:".bold(),
        match_explanation(result.score())
    );

    if !result.suggestions.is_empty() {
        println!(
            "{:<12} {}",
            "Suggestions:".bold(),
            result.suggestions.join(", ").yellow()
        );
    }
}
