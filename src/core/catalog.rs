//! Celebrity catalog.
//!
//! Loads the celebrity list from `celebrities.json` and ranks records
//! against free-text queries.

use crate::core::matcher::approximate_score;
use crate::core::normalizer::normalize;
use crate::models::celebrity::{CatalogFile, CelebrityRecord};
use crate::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Tolerance used when ranking records for a query.
const SEARCH_TOLERANCE: f64 = 0.6;

/// A ranked catalog hit.
#[derive(Debug, Clone)]
pub struct CatalogMatch<'a> {
    pub celebrity: &'a CelebrityRecord,
    /// Similarity score, 0-100.
    pub score: u8,
}

/// Two records that share a normalized name or alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// The shared normalized form.
    pub normalized: String,
    /// Canonical names of the records involved.
    pub celebrities: Vec<String>,
}

/// In-memory celebrity catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    celebrities: Vec<CelebrityRecord>,
}

impl Catalog {
    /// Build a catalog from records, rejecting names or aliases that
    /// normalize to nothing.
    pub fn new(celebrities: Vec<CelebrityRecord>) -> Result<Self> {
        for (index, celebrity) in celebrities.iter().enumerate() {
            validate_record(celebrity).map_err(|e| {
                crate::Error::InvalidCatalog(format!("record #{}: {}", index + 1, e))
            })?;
        }
        Ok(Self { celebrities })
    }

    /// Append a record, rejecting invalid records and names already present.
    pub fn add(&mut self, celebrity: CelebrityRecord) -> Result<()> {
        validate_record(&celebrity).map_err(crate::Error::InvalidCatalog)?;
        if self.find(&celebrity.name).is_some() {
            return Err(crate::Error::DuplicateCelebrity(celebrity.name));
        }
        tracing::info!("Adding {} to the catalog", celebrity.name);
        self.celebrities.push(celebrity);
        Ok(())
    }

    /// All records in file order.
    pub fn celebrities(&self) -> &[CelebrityRecord] {
        &self.celebrities
    }

    pub fn len(&self) -> usize {
        self.celebrities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.celebrities.is_empty()
    }

    /// Pick a random record.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&CelebrityRecord> {
        self.celebrities.choose(rng)
    }

    /// Pick a random record whose name is not in `used`.
    pub fn random_excluding<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        used: &HashSet<String>,
    ) -> Option<&CelebrityRecord> {
        let remaining: Vec<&CelebrityRecord> = self
            .celebrities
            .iter()
            .filter(|c| !used.contains(&c.name))
            .collect();
        remaining.choose(rng).copied()
    }

    /// Find a record whose canonical name normalizes like `name`.
    pub fn find(&self, name: &str) -> Option<&CelebrityRecord> {
        let wanted = normalize(name);
        self.celebrities.iter().find(|c| normalize(&c.name) == wanted)
    }

    /// Like [`Catalog::find`], failing with `CelebrityNotFound`.
    pub fn require(&self, name: &str) -> Result<&CelebrityRecord> {
        self.find(name)
            .ok_or_else(|| crate::Error::CelebrityNotFound(name.to_string()))
    }

    /// Best-ranked record for a query.
    pub fn best_match(&self, query: &str) -> Option<CatalogMatch<'_>> {
        self.fuzzy_matches(query, 1, 0).into_iter().next()
    }

    /// Records ranked by similarity to `query`, best first.
    ///
    /// Each record scores by its best name, alias, or Arabic name. Records below
    /// `threshold` are dropped; ties keep catalog order.
    pub fn fuzzy_matches(&self, query: &str, limit: usize, threshold: u8) -> Vec<CatalogMatch<'_>> {
        let wanted = normalize(query);
        if wanted.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<CatalogMatch<'_>> = self
            .celebrities
            .iter()
            .filter_map(|celebrity| {
                celebrity
                    .labels()
                    .filter_map(|label| {
                        approximate_score(&wanted, &normalize(label), SEARCH_TOLERANCE)
                    })
                    .max()
                    .map(|score| CatalogMatch { celebrity, score })
            })
            .filter(|m| m.score >= threshold)
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(limit);
        matches
    }

    /// Normalized names or aliases that more than one record answers to.
    pub fn collisions(&self) -> Vec<Collision> {
        let mut owners: HashMap<String, Vec<String>> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for celebrity in &self.celebrities {
            let mut seen: Vec<String> = Vec::new();
            for label in celebrity.labels() {
                let normalized = normalize(label);
                if normalized.is_empty() || seen.contains(&normalized) {
                    continue;
                }
                seen.push(normalized.clone());
                let entry = owners.entry(normalized.clone()).or_insert_with(|| {
                    order.push(normalized.clone());
                    Vec::new()
                });
                entry.push(celebrity.name.clone());
            }
        }

        order
            .into_iter()
            .filter_map(|normalized| {
                let celebrities = owners.remove(&normalized)?;
                (celebrities.len() > 1).then_some(Collision {
                    normalized,
                    celebrities,
                })
            })
            .collect()
    }
}

/// Check that a record's name and aliases survive normalization.
fn validate_record(celebrity: &CelebrityRecord) -> std::result::Result<(), String> {
    if normalize(&celebrity.name).is_empty() {
        return Err(format!(
            "name {:?} is empty after normalization",
            celebrity.name
        ));
    }
    if let Some(alias) = celebrity.aliases.iter().find(|a| normalize(a).is_empty()) {
        return Err(format!(
            "{} has an alias {:?} that is empty after normalization",
            celebrity.name, alias
        ));
    }
    Ok(())
}

/// Load the catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(crate::Error::CatalogNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let file: CatalogFile = serde_json::from_str(&content)
        .map_err(|e| {
            crate::Error::InvalidCatalog(format!("{}: {}", path.display(), e))
        })?;

    let catalog = Catalog::new(file.celebrities)?;
    tracing::info!(
        "Loaded {} celebrities from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Save the catalog as pretty-printed JSON.
pub fn save_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = CatalogFile {
        celebrities: catalog.celebrities.clone(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    std::fs::write(path, json)?;
    tracing::info!("Saved {} celebrities to {}", catalog.len(), path.display());
    Ok(())
}

/// Add a record to the catalog file, creating the file when missing.
pub fn add_to_catalog_file(path: &Path, celebrity: CelebrityRecord) -> Result<Catalog> {
    let mut catalog = if path.exists() {
        load_catalog(path)?
    } else {
        Catalog::default()
    };
    catalog.add(celebrity)?;
    save_catalog(&catalog, path)?;
    Ok(catalog)
}
