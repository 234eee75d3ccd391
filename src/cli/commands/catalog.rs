//! Catalog command implementation.

use super::{open_catalog, truncate};
use crate::core::catalog::add_to_catalog_file;
use crate::models::celebrity::CelebrityRecord;
use crate::models::config::Config;
use crate::services::wikipedia::{WikipediaClient, WikipediaConfig};
use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Fields for a new catalog record, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct NewCelebrity {
    pub name: String,
    pub aliases: Vec<String>,
    pub arabic_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub wikipedia_url: Option<String>,
}

impl NewCelebrity {
    /// Build the record, trimming fields and dropping blank ones.
    pub fn into_record(self) -> CelebrityRecord {
        fn present(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let mut record = CelebrityRecord::new(self.name.trim());
        record.aliases = self
            .aliases
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(String::from)
            .collect();
        record.arabic_name = present(self.arabic_name);
        record.category = present(self.category);
        record.description = present(self.description);
        record.wikipedia_url = present(self.wikipedia_url);
        record
    }
}

/// List all celebrities.
pub fn list(config: &Config) -> Result<()> {
    let catalog = open_catalog(config)?;

    println!(
        "{}",
        format!("Celebrities ({}):", catalog.len()).bold().cyan()
    );
    println!();
    println!(
        "{:<30} {:<12} {:<40} {}",
        "Name".bold(),
        "Category".bold(),
        "Aliases".bold(),
        "Arabic".bold()
    );
    println!("{}", "-".repeat(100));

    for celebrity in catalog.celebrities() {
        println!(
            "{:<30} {:<12} {:<40} {}",
            truncate(&celebrity.name, 30),
            celebrity.category.as_deref().unwrap_or("-"),
            truncate(&celebrity.aliases.join(", "), 40),
            celebrity.arabic_name.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

/// Validate the catalog and report names shared by several celebrities.
pub fn validate(config: &Config) -> Result<()> {
    let catalog = open_catalog(config)?;

    if catalog.is_empty() {
        return Err(crate::Error::EmptyCatalog.into());
    }

    println!(
        "{} {} celebrities in {}",
        "[OK]".green(),
        catalog.len(),
        config.catalog_path.display()
    );

    let missing_arabic = catalog
        .celebrities()
        .iter()
        .filter(|c| c.arabic_name.is_none())
        .count();
    if missing_arabic > 0 {
        println!(
            "{} {} celebrities have no Arabic name",
            "[WARN]".yellow(),
            missing_arabic
        );
    }

    let collisions = catalog.collisions();
    if collisions.is_empty() {
        println!("{} No ambiguous names", "[OK]".green());
        return Ok(());
    }

    println!(
        "{} {} ambiguous names:",
        "[WARN]".yellow(),
        collisions.len()
    );
    for collision in &collisions {
        println!(
            "  {} {} {}",
            collision.normalized.bold(),
            "->".yellow(),
            collision.celebrities.join(", ")
        );
    }

    Ok(())
}

/// Add a celebrity to the catalog file.
///
/// Unless `lookup` is off, a missing description or page URL is filled in
/// from Wikipedia; a failed lookup only warns.
pub async fn add(config: &Config, new: NewCelebrity, lookup: bool) -> Result<()> {
    let mut record = new.into_record();

    if lookup && (record.description.is_none() || record.wikipedia_url.is_none()) {
        fill_from_wikipedia(config, &mut record).await?;
    }

    let catalog = add_to_catalog_file(&config.catalog_path, record.clone())?;

    println!(
        "{} Added {} ({} celebrities in {})",
        "[OK]".green(),
        record.answer_line().bold(),
        catalog.len(),
        config.catalog_path.display()
    );
    let aliases = if record.aliases.is_empty() {
        "-".to_string()
    } else {
        record.aliases.join(", ")
    };
    println!("  {:<10} {}", "Aliases:".bold(), aliases);
    println!(
        "  {:<10} {}",
        "Category:".bold(),
        record.category.as_deref().unwrap_or("-")
    );
    if let Some(ref url) = record.wikipedia_url {
        println!("  {:<10} {}", "Page:".bold(), url);
    }

    Ok(())
}

/// Copy the description and page URL from the celebrity's Wikipedia profile.
async fn fill_from_wikipedia(config: &Config, record: &mut CelebrityRecord) -> Result<()> {
    let client = WikipediaClient::new(WikipediaConfig::from(&config.wikipedia))?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Searching for {} on Wikipedia...", record.name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let profile = client.get_celebrity_profile(&record.name).await;
    spinner.finish_and_clear();

    match profile {
        Ok(profile) => {
            if record.description.is_none() && !profile.description.is_empty() {
                record.description = Some(profile.description);
            }
            if record.wikipedia_url.is_none() {
                record.wikipedia_url = Some(profile.wikipedia_url);
            }
        }
        Err(e) => {
            tracing::warn!("Wikipedia lookup failed for {}: {}", record.name, e);
            println!(
                "{} No Wikipedia profile for {}; adding without one",
                "[WARN]".yellow(),
                record.name
            );
        }
    }

    Ok(())
}
