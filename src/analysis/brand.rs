//! Brand identification by fuzzy ingredient matching

use crate::analysis::types::BrandMatch;
use crate::catalog::{BrandCandidate, Catalogs};
use std::sync::Arc;
use tracing::debug;

/// Minimum similarity for a detected ingredient to count as a match for a
/// candidate's key ingredient
const FUZZY_THRESHOLD: f64 = 0.8;

/// Matches a detected ingredient list against the product catalog
///
/// Every candidate across every category competes; the best match score
/// wins, and ties keep the first candidate in catalog declaration order.
#[derive(Debug, Clone)]
pub struct BrandMatcher {
    catalogs: Arc<Catalogs>,
}

impl BrandMatcher {
    pub fn new(catalogs: Arc<Catalogs>) -> Self {
        Self { catalogs }
    }

    /// Identifies the most likely product for the detected ingredients
    ///
    /// Returns the Unknown/Generic Product sentinel when no candidate
    /// scores above zero (including for an empty ingredient list).
    pub fn identify(&self, ingredients: &[String]) -> BrandMatch {
        let detected: Vec<String> = ingredients.iter().map(|i| i.to_lowercase()).collect();

        let mut best: Option<&BrandCandidate> = None;
        let mut best_score = 0.0;

        for candidate in self.catalogs.brands.candidates() {
            let score = match_score(&detected, &candidate.key_ingredients);
            if score > best_score {
                best_score = score;
                best = Some(candidate);
            }
        }

        match best {
            Some(candidate) => {
                debug!(
                    brand = %candidate.brand,
                    product = %candidate.name,
                    score = best_score,
                    "Brand identified"
                );
                BrandMatch {
                    brand: candidate.brand.clone(),
                    product_name: candidate.name.clone(),
                    confidence: best_score * 100.0,
                }
            }
            None => BrandMatch::unknown(),
        }
    }
}

/// Fraction of `required` key ingredients with at least one fuzzy match
/// among the detected ingredients
fn match_score(detected: &[String], required: &[String]) -> f64 {
    if required.is_empty() {
        return 0.0;
    }

    let matches = required
        .iter()
        .filter(|req| {
            let req_lower = req.to_lowercase();
            detected
                .iter()
                .any(|d| similarity(&req_lower, d) >= FUZZY_THRESHOLD)
        })
        .count();

    matches as f64 / required.len() as f64
}

/// Normalized string-similarity ratio in [0, 1]
fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}
