//! Search command implementation.

use super::{open_catalog, truncate};
use crate::cli::args::OutputFormat;
use crate::core::catalog::CatalogMatch;
use crate::models::config::Config;
use anyhow::Result;
use colored::Colorize;

/// Execute search command.
pub fn execute_search(
    config: &Config,
    query: &str,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let catalog = open_catalog(config)?;
    let results = catalog.fuzzy_matches(query, limit, 0);

    match format {
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Table => print_table(query, &results),
    }

    Ok(())
}

/// Print results as JSON.
fn print_json(results: &[CatalogMatch<'_>]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct MatchJson<'a> {
        name: &'a str,
        aliases: &'a [String],
        arabic_name: Option<&'a str>,
        score: u8,
    }

    let output: Vec<MatchJson<'_>> = results
        .iter()
        .map(|m| MatchJson {
            name: &m.celebrity.name,
            aliases: &m.celebrity.aliases,
            arabic_name: m.celebrity.arabic_name.as_deref(),
            score: m.score,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as table.
fn print_table(query: &str, results: &[CatalogMatch<'_>]) {
    if results.is_empty() {
        println!("{}", format!("No celebrities match {:?}.", query).yellow());
        return;
    }

    println!(
        "{}",
        format!("Found {} results:", results.len()).bold().cyan()
    );
    println!();
    println!(
        " {:>4} | {:>5} | {:<30} | {}",
        "#",
        "Score",
        "Name",
        "Arabic"
    );
    println!("{}", "-".repeat(60));

    for (i, m) in results.iter().enumerate() {
        println!(
            " {:>4} | {:>5} | {:<30} | {}",
            i + 1,
            m.score,
            truncate(&m.celebrity.name, 30),
            m.celebrity.arabic_name.as_deref().unwrap_or("")
        );
    }
}
