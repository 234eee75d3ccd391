//! Celebrity catalog preflight check.

use super::CheckResult;
use crate::core::catalog::load_catalog;
use std::path::Path;

/// Check that the catalog loads and has at least one record.
pub fn check(path: &Path) -> CheckResult {
    match load_catalog(path) {
        Ok(catalog) if catalog.is_empty() => CheckResult::fail(
            "Catalog",
            "no celebrities",
            "Add entries to the \"celebrities\" array",
        ),
        Ok(catalog) => {
            let collisions = catalog.collisions().len();
            if collisions > 0 {
                tracing::warn!("{} names are shared by more than one celebrity", collisions);
            }
            CheckResult::ok("Catalog", &format!("{} celebrities", catalog.len()))
        }
        Err(crate::Error::CatalogNotFound(p)) => CheckResult::fail(
            "Catalog",
            &format!("not found at {}", p),
            "Set CELEBRITIES_FILE or pass --catalog",
        ),
        Err(e) => CheckResult::fail("Catalog", &e.to_string(), "Fix the catalog JSON"),
    }
}
