//! Immutable rule catalogs for the analysis engines
//!
//! Catalogs are built once at process start and shared read-only across
//! concurrent analyses. Candidate and signature order is declaration order
//! and is part of the data contract: on tied match scores the first entry
//! wins, so reordering a catalog is a behavioral change.

mod brands;
mod categories;
mod harmful_table;
mod health_risks;

pub use brands::{BrandCandidate, BrandCatalog};
pub use categories::{CategorySignature, SignatureCatalog};
pub use harmful_table::{HarmfulRow, HarmfulTable};
pub use health_risks::{HealthRiskTable, HARMFUL_SUBSTANCES};

use crate::config::LabelscanConfig;

/// All rule data consumed by the analysis engines
///
/// Construct with [`Catalogs::with_defaults`] for the built-in rules, or
/// [`Catalogs::from_config`] to also load the optional harmful-ingredient
/// workbook from disk.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub brands: BrandCatalog,
    pub signatures: SignatureCatalog,
    pub health_risks: HealthRiskTable,
    pub harmful_table: HarmfulTable,
}

impl Catalogs {
    /// Built-in rules with an empty harmful-ingredient table
    pub fn with_defaults() -> Self {
        Self {
            brands: BrandCatalog::with_defaults(),
            signatures: SignatureCatalog::with_defaults(),
            health_risks: HealthRiskTable::with_defaults(),
            harmful_table: HarmfulTable::empty(),
        }
    }

    /// Built-in rules plus the harmful-ingredient table from configuration
    ///
    /// A missing or unreadable workbook is tolerated: the classifier then
    /// degrades to condition-based rules only.
    pub fn from_config(config: &LabelscanConfig) -> Self {
        Self {
            harmful_table: HarmfulTable::load(&config.harmful_table),
            ..Self::with_defaults()
        }
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::with_defaults()
    }
}
