//! Normalize command implementation.

use crate::core::normalizer;
use colored::Colorize;

/// Print the normalized form of each name.
pub fn execute_normalize(texts: &[String]) {
    for text in texts {
        let normalized = normalizer::normalize(text);
        if normalized.is_empty() {
            println!("{} {} {}", text, "->".dimmed(), "(empty)".yellow());
        } else {
            println!("{} {} {}", text, "->".dimmed(), normalized.green());
        }
    }
}
