//! Wikipedia API client.
//!
//! Looks up celebrity photos and short profiles through the MediaWiki
//! `action=query` API. Requests are spaced by a minimum delay.

use crate::models::config::WikipediaSettings;
use crate::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Longest description kept, in characters.
const MAX_DESCRIPTION_LEN: usize = 300;

static HTML_TAG: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"<[^>]*>").ok());

/// Wikipedia client configuration.
#[derive(Debug, Clone)]
pub struct WikipediaConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Minimum delay between requests.
    pub rate_limit: Duration,
    pub timeout: Duration,
}

impl From<&WikipediaSettings> for WikipediaConfig {
    fn from(settings: &WikipediaSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            user_agent: settings.user_agent.clone(),
            rate_limit: Duration::from_millis(settings.rate_limit_ms),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self::from(&WikipediaSettings::default())
    }
}

/// Wikipedia API client.
pub struct WikipediaClient {
    config: WikipediaConfig,
    client: reqwest::Client,
    last_request: Mutex<Option<Instant>>,
}

/// Query response envelope.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub query: Option<QueryPages>,
}

/// Pages keyed by page id ("-1" for missing pages).
#[derive(Debug, Deserialize)]
pub struct QueryPages {
    #[serde(default)]
    pub pages: BTreeMap<String, PageData>,
}

/// A single page.
#[derive(Debug, Deserialize)]
pub struct PageData {
    pub title: Option<String>,
    pub extract: Option<String>,
    pub thumbnail: Option<ImageSource>,
    pub original: Option<ImageSource>,
}

/// Image reference.
#[derive(Debug, Deserialize)]
pub struct ImageSource {
    pub source: String,
}

/// Search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// Celebrity profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CelebrityProfile {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub wikipedia_url: String,
}

impl WikipediaClient {
    /// Create a new client.
    pub fn new(config: WikipediaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            config,
            client,
            last_request: Mutex::new(None),
        })
    }

    /// Wait until the minimum delay since the previous request has passed.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let since = previous.elapsed();
            if since < self.config.rate_limit {
                tokio::time::sleep(self.config.rate_limit - since).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Send a query and decode the envelope.
    async fn query(&self, params: &[(&str, String)]) -> Result<QueryResponse> {
        self.rate_limit().await;

        let resp = self
            .client
            .get(&self.config.base_url)
            .query(params)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(crate::Error::WikipediaError(format!(
                "request failed with status {}",
                resp.status()
            )));
        }

        Ok(resp.json().await?)
    }

    /// Check that the API answers.
    pub async fn health_check(&self) -> Result<bool> {
        let params = [
            ("action", "query".to_string()),
            ("meta", "siteinfo".to_string()),
            ("format", "json".to_string()),
        ];
        match self.query(&params).await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::debug!("Wikipedia health check failed: {}", e);
                Ok(false)
            }
        }
    }

    /// Search pages, returning titles, first sentences and thumbnails.
    pub async fn search_celebrities(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>> {
        let params = [
            ("action", "query".to_string()),
            ("generator", "search".to_string()),
            ("gsrnamespace", "0".to_string()),
            ("gsrlimit", limit.to_string()),
            ("gsrsearch", query.to_string()),
            ("prop", "pageimages|extracts".to_string()),
            ("pilimit", "max".to_string()),
            ("exintro", "1".to_string()),
            ("exsentences", "1".to_string()),
            ("exlimit", "max".to_string()),
            ("pithumbsize", "300".to_string()),
            ("format", "json".to_string()),
        ];

        tracing::debug!("Searching Wikipedia for {:?}", query);
        let resp = self.query(&params).await?;
        Ok(parse_search_results(resp))
    }

    /// Image URL for a page title, preferring the original over the thumbnail.
    pub async fn get_celebrity_image(&self, title: &str) -> Result<Option<String>> {
        let params = [
            ("action", "query".to_string()),
            ("prop", "pageimages".to_string()),
            ("piprop", "original|thumbnail".to_string()),
            ("pithumbsize", "500".to_string()),
            ("titles", title.to_string()),
            ("format", "json".to_string()),
        ];

        let resp = self.query(&params).await?;
        Ok(parse_image_result(resp))
    }

    /// Profile for a page title.
    pub async fn get_celebrity_profile(&self, title: &str) -> Result<CelebrityProfile> {
        let params = [
            ("action", "query".to_string()),
            ("prop", "extracts|pageimages".to_string()),
            ("exintro", "1".to_string()),
            ("exsentences", "3".to_string()),
            ("piprop", "original".to_string()),
            ("titles", title.to_string()),
            ("format", "json".to_string()),
        ];

        let resp = self.query(&params).await?;
        parse_profile(resp).ok_or_else(|| crate::Error::PageNotFound(title.to_string()))
    }
}

/// Collect search hits, skipping missing pages.
pub fn parse_search_results(resp: QueryResponse) -> Vec<SearchHit> {
    let Some(query) = resp.query else {
        return Vec::new();
    };

    query
        .pages
        .into_iter()
        .filter(|(id, _)| id != "-1")
        .map(|(_, page)| SearchHit {
            name: page.title.unwrap_or_default(),
            description: page.extract.unwrap_or_default(),
            image_url: page.thumbnail.or(page.original).map(|i| i.source),
        })
        .collect()
}

/// Image URL of the first page.
pub fn parse_image_result(resp: QueryResponse) -> Option<String> {
    let page = resp.query?.pages.into_iter().next()?.1;
    page.original.or(page.thumbnail).map(|i| i.source)
}

/// Profile of the first page, or `None` when it does not exist.
pub fn parse_profile(resp: QueryResponse) -> Option<CelebrityProfile> {
    let (id, page) = resp.query?.pages.into_iter().next()?;
    if id == "-1" {
        return None;
    }

    let name = page.title?;
    Some(CelebrityProfile {
        description: clean_description(page.extract.as_deref().unwrap_or_default()),
        image_url: page.original.map(|i| i.source),
        wikipedia_url: page_url(&name),
        name,
    })
}

/// Public URL of a page title.
pub fn page_url(title: &str) -> String {
    format!(
        "https://en.wikipedia.org/wiki/{}",
        urlencoding::encode(&title.replace(' ', "_"))
    )
}

/// Strip HTML tags, collapse whitespace and cap the length.
pub fn clean_description(description: &str) -> String {
    let text = match HTML_TAG.as_ref() {
        Some(re) => re.replace_all(description, ""),
        None => description.into(),
    };
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.chars().count() > MAX_DESCRIPTION_LEN {
        let truncated: String = text.chars().take(MAX_DESCRIPTION_LEN - 3).collect();
        format!("{}...", truncated)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> QueryResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_clean_description() {
        let cleaned =
            clean_description("<p>This is a <b>test</b>   description with HTML tags.</p>");
        assert_eq!(cleaned, "This is a test description with HTML tags.");
    }

    #[test]
    fn test_clean_description_truncates() {
        let long = "word ".repeat(100);
        let cleaned = clean_description(&long);
        assert_eq!(cleaned.chars().count(), 300);
        assert!(cleaned.ends_with("..."));
    }

    #[test]
    fn test_parse_search_results_skips_missing() {
        let resp = response(
            r#"{"query": {"pages": {
                "-1": {"title": "Missing"},
                "123": {"title": "Fairuz", "extract": "Lebanese singer.",
                        "thumbnail": {"source": "https://upload.example/thumb.jpg"}}
            }}}"#,
        );
        let hits = parse_search_results(resp);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Fairuz");
        assert_eq!(
            hits[0].image_url.as_deref(),
            Some("https://upload.example/thumb.jpg")
        );
    }

    #[test]
    fn test_parse_image_prefers_original() {
        let resp = response(
            r#"{"query": {"pages": {"42": {"title": "Omar Sharif",
                "thumbnail": {"source": "thumb.jpg"},
                "original": {"source": "original.jpg"}}}}}"#,
        );
        assert_eq!(parse_image_result(resp).as_deref(), Some("original.jpg"));
    }

    #[test]
    fn test_parse_profile_missing_page() {
        let resp = response(r#"{"query": {"pages": {"-1": {"title": "Nobody"}}}}"#);
        assert!(parse_profile(resp).is_none());
        assert!(parse_profile(response("{}")).is_none());
    }

    #[test]
    fn test_parse_profile() {
        let resp = response(
            r#"{"query": {"pages": {"7": {"title": "Omar Sharif",
                "extract": "<p>Egyptian <b>actor</b>.</p>"}}}}"#,
        );
        let profile = parse_profile(resp).unwrap();
        assert_eq!(profile.description, "Egyptian actor.");
        assert_eq!(
            profile.wikipedia_url,
            "https://en.wikipedia.org/wiki/Omar_Sharif"
        );
        assert!(profile.image_url.is_none());
    }
}
