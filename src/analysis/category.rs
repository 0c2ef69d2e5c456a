//! Product-category detection from ingredient signatures

use crate::analysis::types::CategoryMatch;
use crate::catalog::{Catalogs, CategorySignature};
use std::sync::Arc;
use tracing::debug;

/// Classifies product type by counting signature indicators present in the
/// detected ingredient list
///
/// Ties keep the first signature in catalog declaration order, mirroring the
/// brand matcher's tie-break.
#[derive(Debug, Clone)]
pub struct CategoryDetector {
    catalogs: Arc<Catalogs>,
}

impl CategoryDetector {
    pub fn new(catalogs: Arc<Catalogs>) -> Self {
        Self { catalogs }
    }

    /// Detects the product category for the detected ingredients
    ///
    /// Confidence is `(indicators present / total indicators) * weight`,
    /// clamped to at most 1.0. Returns the UNKNOWN sentinel when no
    /// signature has any indicator present.
    pub fn detect(&self, ingredients: &[String]) -> CategoryMatch {
        let detected: Vec<String> = ingredients.iter().map(|i| i.to_lowercase()).collect();

        let mut best: Option<&CategorySignature> = None;
        let mut best_confidence = 0.0;

        for signature in self.catalogs.signatures.entries() {
            let matches = signature
                .indicators
                .iter()
                .filter(|indicator| detected.iter().any(|ing| ing.contains(indicator.as_str())))
                .count();

            if matches > 0 {
                let confidence =
                    (matches as f64 / signature.indicators.len() as f64) * signature.weight;

                if confidence > best_confidence {
                    best_confidence = confidence;
                    best = Some(signature);
                }
            }
        }

        match best {
            Some(signature) => {
                debug!(
                    category = %signature.category,
                    confidence = best_confidence,
                    "Category detected"
                );
                CategoryMatch {
                    category: signature.category.clone(),
                    confidence: best_confidence.min(1.0),
                }
            }
            None => CategoryMatch::unknown(),
        }
    }
}
