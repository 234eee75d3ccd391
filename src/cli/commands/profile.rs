//! Profile command implementation.

use crate::models::config::Config;
use crate::services::wikipedia::{clean_description, SearchHit, WikipediaClient, WikipediaConfig};
use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Number of search hits listed when no page has the exact title.
const SEARCH_LIMIT: u32 = 5;

/// Look up and print a Wikipedia profile.
///
/// When no page has that exact title, similar pages are listed instead.
pub async fn execute_profile(config: &Config, name: &str) -> Result<()> {
    let client = WikipediaClient::new(WikipediaConfig::from(&config.wikipedia))?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Looking up {}...", name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let profile = client.get_celebrity_profile(name).await;
    let profile = match profile {
        Err(crate::Error::PageNotFound(_)) => {
            spinner.set_message(format!("Searching for {}...", name));
            let hits = client.search_celebrities(name, SEARCH_LIMIT).await;
            spinner.finish_and_clear();
            return print_hits(name, &hits?);
        }
        other => {
            spinner.finish_and_clear();
            other?
        }
    };

    println!("{}", profile.name.bold().cyan());
    println!();
    if !profile.description.is_empty() {
        println!("{}", profile.description);
        println!();
    }
    println!("{:<8} {}", "Page:".bold(), profile.wikipedia_url);
    if let Some(ref image) = profile.image_url {
        println!("{:<8} {}", "Image:".bold(), image);
    }

    Ok(())
}

/// Print search hits for a title with no page of its own.
fn print_hits(name: &str, hits: &[SearchHit]) -> Result<()> {
    if hits.is_empty() {
        anyhow::bail!("No Wikipedia page found for {:?}", name);
    }

    println!(
        "{}",
        format!("No page titled {:?}. Did you mean:", name).yellow()
    );
    for hit in hits {
        println!(
            "  {} {}",
            hit.name.bold(),
            clean_description(&hit.description).dimmed()
        );
    }
    Ok(())
}
