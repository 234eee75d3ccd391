//! Data models.

pub mod celebrity;
pub mod config;
pub mod matching;
pub mod score;
