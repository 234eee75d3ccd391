//! Command line argument definitions.

use crate::models::matching::{AliasPolicy, MatchProfile};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Celebrity Quiz - Guess who is in the picture
#[derive(Parser, Debug)]
#[command(name = "celebrity-quiz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config.toml (default: ~/.config/celebrity_quiz/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to celebrities.json (overrides config and CELEBRITIES_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check an answer against a celebrity
    Check {
        /// The answer to check
        #[arg(value_name = "ANSWER")]
        answer: String,

        /// Celebrity name as it appears in the catalog
        #[arg(short, long, value_name = "NAME")]
        celebrity: String,

        /// Output format: table, json
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Matching preset (default: from config)
        #[arg(long, value_enum)]
        profile: Option<ProfileArg>,

        /// Single-word alias handling (default: from config)
        #[arg(long, value_enum)]
        alias_policy: Option<AliasPolicyArg>,

        /// Score an accepted answer must reach (default: from config)
        #[arg(long, value_name = "SCORE")]
        threshold: Option<u8>,

        /// Score at which near misses get hints (default: from config)
        #[arg(long, value_name = "SCORE")]
        suggestion_threshold: Option<u8>,
    },

    /// Print the normalized form of names
    Normalize {
        /// Names to normalize
        #[arg(value_name = "TEXT", required = true)]
        text: Vec<String>,
    },

    /// Search the catalog
    Search {
        /// Name, alias or Arabic name to look for
        #[arg(value_name = "QUERY")]
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Output format: table, json
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Inspect the celebrity catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Look up a celebrity profile on Wikipedia
    Profile {
        /// Page title
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Show the top players
    Leaderboard {
        /// Number of players to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Output format: table, json
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Play quiz rounds in the terminal
    Play {
        /// Number of rounds (default: from config)
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Seconds per round (default: from config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Do not look up images on Wikipedia
        #[arg(long)]
        no_image: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogAction {
    /// List all celebrities
    List,

    /// Validate the catalog and report ambiguous names
    Validate,

    /// Add a celebrity to the catalog
    Add {
        /// Canonical name
        #[arg(value_name = "NAME")]
        name: String,

        /// Alternate accepted names (repeat or comma-separate)
        #[arg(short, long = "alias", value_name = "ALIAS", value_delimiter = ',')]
        aliases: Vec<String>,

        /// Arabic-script name
        #[arg(long, value_name = "NAME")]
        arabic_name: Option<String>,

        /// Category hint, e.g. actor or singer
        #[arg(long)]
        category: Option<String>,

        /// Description shown after the round
        #[arg(long)]
        description: Option<String>,

        /// Wikipedia page URL
        #[arg(long, value_name = "URL")]
        wikipedia_url: Option<String>,

        /// Do not fill in the description and page from Wikipedia
        #[arg(long)]
        no_lookup: bool,
    },
}

/// Output format for commands that print results.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileArg {
    Standard,
    Strict,
}

impl From<ProfileArg> for MatchProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Standard => MatchProfile::Standard,
            ProfileArg::Strict => MatchProfile::Strict,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AliasPolicyArg {
    ShortCircuit,
    Continue,
}

impl From<AliasPolicyArg> for AliasPolicy {
    fn from(arg: AliasPolicyArg) -> Self {
        match arg {
            AliasPolicyArg::ShortCircuit => AliasPolicy::ShortCircuit,
            AliasPolicyArg::Continue => AliasPolicy::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "celebrity-quiz",
            "check",
            "Mo Salah",
            "--celebrity",
            "Mohamed Salah",
            "--profile",
            "strict",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Check {
                answer,
                celebrity,
                format,
                profile,
                ..
            } => {
                assert_eq!(answer, "Mo Salah");
                assert_eq!(celebrity, "Mohamed Salah");
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(profile.map(MatchProfile::from), Some(MatchProfile::Strict));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "celebrity-quiz",
            "play",
            "--no-image",
            "--catalog",
            "stars.json",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.catalog, Some(PathBuf::from("stars.json")));
        assert!(matches!(cli.command, Commands::Play { no_image: true, .. }));
    }

    #[test]
    fn test_parse_catalog_add() {
        let cli = Cli::try_parse_from([
            "celebrity-quiz",
            "catalog",
            "add",
            "Sabah",
            "--alias",
            "Sabbouha,Jeanette Feghali",
            "--arabic-name",
            "صباح",
            "--no-lookup",
        ])
        .unwrap();

        match cli.command {
            Commands::Catalog {
                action:
                    CatalogAction::Add {
                        name,
                        aliases,
                        arabic_name,
                        no_lookup,
                        ..
                    },
            } => {
                assert_eq!(name, "Sabah");
                assert_eq!(aliases, vec!["Sabbouha", "Jeanette Feghali"]);
                assert_eq!(arabic_name.as_deref(), Some("صباح"));
                assert!(no_lookup);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_leaderboard_defaults() {
        let cli = Cli::try_parse_from(["celebrity-quiz", "leaderboard"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Leaderboard {
                limit: 10,
                format: OutputFormat::Table
            }
        ));
    }

    #[test]
    fn test_normalize_requires_text() {
        let result = Cli::try_parse_from(["celebrity-quiz", "normalize"]);
        assert!(result.is_err());
    }
}
