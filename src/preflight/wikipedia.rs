//! Wikipedia API preflight check.

use super::CheckResult;
use crate::models::config::WikipediaSettings;
use crate::services::wikipedia::{WikipediaClient, WikipediaConfig};

/// Check if the Wikipedia API is reachable.
pub async fn check(settings: &WikipediaSettings) -> CheckResult {
    match WikipediaClient::new(WikipediaConfig::from(settings)) {
        Ok(client) => match client.health_check().await {
            Ok(true) => CheckResult::ok("Wikipedia API", "connected"),
            _ => CheckResult::fail(
                "Wikipedia API",
                "connection failed",
                "Check your network connection, or pass --no-image / --skip-preflight",
            ),
        },
        Err(e) => CheckResult::fail(
            "Wikipedia API",
            &format!("client setup failed: {}", e),
            "Check wikipedia.user_agent in your config",
        ),
    }
}
