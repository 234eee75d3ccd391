//! Celebrity Quiz CLI
//!
//! Guess the celebrity in the picture, with answers matched across Arabic and
//! Latin spellings.

use celebrity_quiz::cli::{
    args::{CatalogAction, Cli, Commands},
    commands::{
        catalog::{self, NewCelebrity},
        check::{self, CheckOptions},
        leaderboard, normalize,
        play::{self, PlayOptions},
        profile, search,
    },
};
use celebrity_quiz::models::config::{self, Config};
use celebrity_quiz::preflight;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let mut config = match cli.config {
        Some(ref path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    if let Some(ref catalog) = cli.catalog {
        config.catalog_path = catalog.clone();
    }

    // Run the appropriate command
    match cli.command {
        Commands::Check {
            answer,
            celebrity,
            format,
            profile,
            alias_policy,
            threshold,
            suggestion_threshold,
        } => {
            let options = CheckOptions {
                format,
                profile: profile.map(Into::into),
                alias_policy: alias_policy.map(Into::into),
                threshold,
                suggestion_threshold,
            };
            check::execute_check(&config, &answer, &celebrity, &options)?;
        }

        Commands::Normalize { text } => {
            normalize::execute_normalize(&text);
        }

        Commands::Search { query, limit, format } => {
            search::execute_search(&config, &query, limit, format)?;
        }

        Commands::Catalog { action } => match action {
            CatalogAction::List => catalog::list(&config)?,
            CatalogAction::Validate => catalog::validate(&config)?,
            CatalogAction::Add {
                name,
                aliases,
                arabic_name,
                category,
                description,
                wikipedia_url,
                no_lookup,
            } => {
                let new = NewCelebrity {
                    name,
                    aliases,
                    arabic_name,
                    category,
                    description,
                    wikipedia_url,
                };
                catalog::add(&config, new, !no_lookup).await?;
            }
        },

        Commands::Leaderboard { limit, format } => {
            leaderboard::execute_leaderboard(&config, limit, format)?;
        }

        Commands::Profile { name } => {
            profile::execute_profile(&config, &name).await?;
        }

        Commands::Play {
            rounds,
            timeout,
            no_image,
        } => {
            // Run preflight checks unless skipped
            if !cli.skip_preflight {
                run_preflight_checks(&config, !no_image).await?;
            }

            let options = PlayOptions::from_config(&config, rounds, timeout, no_image);
            play::execute_play(&config, options).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
///
/// `--verbose` wins; otherwise `LOG_LEVEL` picks the level, defaulting to info.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("celebrity_quiz=debug")
    } else {
        let level = std::env::var("LOG_LEVEL")
            .ok()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "info".to_string());
        EnvFilter::try_new(format!("celebrity_quiz={}", level))
            .unwrap_or_else(|_| EnvFilter::new("celebrity_quiz=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &Config, online: bool) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config, online).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
