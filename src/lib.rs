//! Celebrity Quiz Library
//!
//! Arabic-aware fuzzy matching of celebrity names for an image-guessing quiz,
//! with the catalog, round bookkeeping and Wikipedia lookups around it.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;

pub use error::{Error, Result};
