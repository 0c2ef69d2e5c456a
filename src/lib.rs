//! labelscan - OCR-powered ingredient label analysis
//!
//! This library turns a photographed product label into a structured
//! ingredient-safety report. It extracts text from the image via an external
//! OCR engine, isolates and tokenizes the ingredient list, flags ingredients
//! that are generically harmful or conflict with the caller's declared health
//! conditions, fuzzy-matches the label against a product catalog to identify
//! the brand, and classifies the product category from ingredient signatures.
//!
//! # Core Concepts
//!
//! - **OCR Engine**: Pluggable image-to-text collaborator (Tesseract by
//!   default) behind the [`ocr::OcrEngine`] trait
//! - **Catalogs**: Immutable rule data (brand candidates, category
//!   signatures, health-risk tables) built once at startup and shared
//!   read-only across analyses
//! - **Analysis Engines**: Three independent classifiers (safety, brand,
//!   category) that run concurrently over the same ingredient list
//! - **Pipeline**: The orchestrator that sequences extraction, parsing,
//!   classification, and report assembly
//!
//! # Example Usage
//!
//! ```ignore
//! use labelscan::catalog::Catalogs;
//! use labelscan::ocr::TesseractEngine;
//! use labelscan::pipeline::AnalysisPipeline;
//! use labelscan::LabelscanConfig;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! async fn analyze_label(image: &Path) -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LabelscanConfig::default();
//!     let pipeline = AnalysisPipeline::from_config(&config);
//!
//!     let report = pipeline.analyze(image, &[]).await?;
//!
//!     println!("Brand: {} ({:.1}%)", report.brand.brand, report.brand.confidence);
//!     println!("Category: {}", report.category.category);
//!     println!("Flagged ingredients: {}", report.findings.len());
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`ocr`]: OCR engine trait and the Tesseract subprocess implementation
//! - [`analysis`]: Ingredient parsing and the three classification engines
//! - [`catalog`]: Immutable brand/category/health-risk rule data
//! - [`knowledge`]: Best-effort ingredient definition lookups
//! - [`pipeline`]: Orchestration and report assembly

// Public modules
pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod knowledge;
pub mod ocr;
pub mod pipeline;
pub mod report;
pub mod util;

// Re-export key types for convenient access
pub use analysis::ingredients::IngredientParser;
pub use analysis::types::{BrandMatch, CategoryMatch, HealthCondition, SafetyFinding, SafetyRating};
pub use analysis::{BrandMatcher, CategoryDetector, SafetyClassifier};
pub use catalog::Catalogs;
pub use config::{ConfigError, LabelscanConfig};
pub use knowledge::{KnowledgeLookup, WikipediaLookup, DEFINITION_NOT_FOUND};
pub use ocr::{OcrEngine, OcrError, OcrOutput, TesseractEngine};
pub use pipeline::{AnalysisError, AnalysisPipeline};
pub use report::{AnalysisReport, AnalysisStatus};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_labelscan() {
        assert_eq!(NAME, "labelscan");
    }
}
