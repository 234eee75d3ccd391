//! Core business logic modules.

pub mod catalog;
pub mod matcher;
pub mod normalizer;
pub mod scoreboard;
pub mod session;
pub mod suggestions;
