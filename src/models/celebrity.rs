//! Celebrity record model.

use serde::{Deserialize, Serialize};

/// A celebrity that can be the answer to a quiz round.
///
/// Records are read-only input to the matcher: a round loads one and holds it
/// unchanged until the round ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelebrityRecord {
    /// Reference display/answer name (Latin script, never empty).
    pub name: String,
    /// Alternate accepted names, in suggestion priority order.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Arabic-script form of the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arabic_name: Option<String>,
    /// Free text shown after the round; not used for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Wikipedia page, shown when nobody answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikipedia_url: Option<String>,
    /// Category hint (e.g. "actor", "singer").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CelebrityRecord {
    /// Create a record with only a canonical name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            arabic_name: None,
            description: None,
            wikipedia_url: None,
            category: None,
        }
    }

    /// Add an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the Arabic-script name.
    pub fn with_arabic_name(mut self, arabic_name: impl Into<String>) -> Self {
        self.arabic_name = Some(arabic_name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// All accepted labels: canonical name, aliases, then Arabic name.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .chain(self.arabic_name.as_deref())
    }

    /// Answer line shown at the end of a round, e.g. "Fairuz (فيروز)".
    pub fn answer_line(&self) -> String {
        match self.arabic_name.as_deref() {
            Some(arabic) if !arabic.trim().is_empty() => format!("{} ({})", self.name, arabic),
            _ => self.name.clone(),
        }
    }
}

/// Catalog file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub celebrities: Vec<CelebrityRecord>,
}
