//! Scoreboard persistence.
//!
//! Player totals live in `scores.json` next to the config file unless
//! `scores_path` points elsewhere.

use crate::models::score::Scoreboard;
use crate::Result;
use std::fs;
use std::path::Path;

/// Load the scoreboard; a missing file is an empty board.
pub fn load_scoreboard(path: &Path) -> Result<Scoreboard> {
    if !path.exists() {
        tracing::debug!("No scoreboard at {}, starting empty", path.display());
        return Ok(Scoreboard::default());
    }

    let content = fs::read_to_string(path)?;
    let board: Scoreboard = serde_json::from_str(&content)?;
    Ok(board)
}

/// Save the scoreboard, keeping the previous file as a backup.
pub fn save_scoreboard(board: &Scoreboard, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    if path.exists() {
        let backup_path = path.with_extension("json.backup");
        fs::copy(path, &backup_path)?;
    }

    let content = serde_json::to_string_pretty(board)?;
    fs::write(path, content)?;

    tracing::info!("Scoreboard saved to: {}", path.display());
    Ok(())
}
