//! Safety classification of label text against harmful-ingredient and
//! health-condition rules

use crate::analysis::types::{HealthCondition, SafetyFinding, SafetyRating};
use crate::catalog::{Catalogs, HARMFUL_SUBSTANCES};
use crate::knowledge::DEFINITION_NOT_FOUND;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Flags ingredients that are generically harmful or restricted for the
/// caller's declared health conditions
///
/// The classifier works over raw label text (substring search,
/// case-insensitive) rather than the tokenized list, so rules match even
/// when OCR noise corrupts token boundaries.
#[derive(Debug, Clone)]
pub struct SafetyClassifier {
    catalogs: Arc<Catalogs>,
}

impl SafetyClassifier {
    pub fn new(catalogs: Arc<Catalogs>) -> Self {
        Self { catalogs }
    }

    /// Scans raw text for unsafe ingredients
    ///
    /// Two rule sources contribute findings:
    /// 1. The external harmful-ingredient table (when loaded); effect text
    ///    comes from the table, falling back to "Found in database".
    /// 2. Restriction rules for each selected condition, with effect
    ///    "Avoid due to <condition>".
    ///
    /// Findings are deduplicated by (ingredient, effect) and returned in
    /// first-emission order. Definitions are set to the not-found
    /// placeholder; enrichment happens in the pipeline.
    pub fn check_safety(
        &self,
        raw_text: &str,
        conditions: &[HealthCondition],
    ) -> Vec<SafetyFinding> {
        let raw_lower = raw_text.to_lowercase();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut findings = Vec::new();

        for row in self.catalogs.harmful_table.rows() {
            let ingredient = row.ingredient.to_lowercase();
            if raw_lower.contains(&ingredient) {
                let effect = if row.effect.is_empty() {
                    "Found in database".to_string()
                } else {
                    row.effect.clone()
                };
                self.push_finding(&mut findings, &mut seen, ingredient, effect);
            }
        }

        for condition in conditions {
            for restricted in self.catalogs.health_risks.restricted(*condition) {
                if raw_lower.contains(restricted.as_str()) {
                    let effect = format!("Avoid due to {}", condition);
                    self.push_finding(&mut findings, &mut seen, restricted.clone(), effect);
                }
            }
        }

        debug!(
            findings = findings.len(),
            conditions = conditions.len(),
            "Safety check complete"
        );

        findings
    }

    /// Rates a single ingredient
    ///
    /// HARMFUL if it matches the fixed harmful-substance list, else MODERATE
    /// if any condition restricts it, else SAFE. Total over all inputs.
    pub fn rate(&self, ingredient: &str) -> SafetyRating {
        let lower = ingredient.to_lowercase();

        if HARMFUL_SUBSTANCES.iter().any(|h| lower.contains(h)) {
            return SafetyRating::Harmful;
        }

        let restricted_anywhere = self
            .catalogs
            .health_risks
            .entries()
            .iter()
            .any(|(_, list)| list.iter().any(|r| lower.contains(r.as_str())));

        if restricted_anywhere {
            SafetyRating::Moderate
        } else {
            SafetyRating::Safe
        }
    }

    fn push_finding(
        &self,
        findings: &mut Vec<SafetyFinding>,
        seen: &mut HashSet<(String, String)>,
        ingredient: String,
        effect: String,
    ) {
        if seen.insert((ingredient.clone(), effect.clone())) {
            let rating = self.rate(&ingredient);
            findings.push(SafetyFinding {
                ingredient,
                effect,
                rating,
                definition: DEFINITION_NOT_FOUND.to_string(),
            });
        }
    }
}
