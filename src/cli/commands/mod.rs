//! CLI command implementations.

pub mod catalog;
pub mod check;
pub mod leaderboard;
pub mod normalize;
pub mod play;
pub mod profile;
pub mod search;

use crate::core::catalog::{load_catalog, Catalog};
use crate::models::config::Config;
use anyhow::Context;

/// Load the catalog named by the configuration.
pub(crate) fn open_catalog(config: &Config) -> anyhow::Result<Catalog> {
    load_catalog(&config.catalog_path).with_context(|| {
        format!(
            "Failed to load catalog from {}",
            config.catalog_path.display()
        )
    })
}

/// Shorten `text` to `max` characters, marking the cut with "...".
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
