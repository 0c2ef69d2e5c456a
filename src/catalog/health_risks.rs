//! Static health-risk rules: per-condition restricted substances and the
//! generic harmful-substance list

use crate::analysis::types::HealthCondition;

/// Substances rated HARMFUL regardless of declared conditions
pub const HARMFUL_SUBSTANCES: [&str; 5] = ["aspartame", "trans fat", "sodium nitrate", "bht", "bpa"];

/// Mapping from health condition to restricted-substance substrings
///
/// Substrings are lowercase and matched case-insensitively against raw label
/// text and ingredient names.
#[derive(Debug, Clone)]
pub struct HealthRiskTable {
    entries: Vec<(HealthCondition, Vec<String>)>,
}

impl HealthRiskTable {
    /// Built-in restriction rules
    pub fn with_defaults() -> Self {
        let entries = vec![
            (
                HealthCondition::Diabetes,
                to_owned(&["sugar", "high fructose corn syrup", "aspartame", "maltodextrin"]),
            ),
            (
                HealthCondition::HighBloodPressure,
                to_owned(&["salt", "sodium", "msg", "sodium nitrate"]),
            ),
            (
                HealthCondition::ThyroidIssues,
                to_owned(&["soy", "fluoride", "bromate"]),
            ),
            (
                HealthCondition::HeartDisease,
                to_owned(&["trans fat", "palm oil", "cholesterol"]),
            ),
            (
                HealthCondition::KidneyDisease,
                to_owned(&["phosphate", "potassium chloride"]),
            ),
            (
                HealthCondition::CancerRisks,
                to_owned(&["aspartame", "sodium nitrate", "bht", "bpa"]),
            ),
        ];

        Self { entries }
    }

    /// Restricted substances for one condition
    pub fn restricted(&self, condition: HealthCondition) -> &[String] {
        self.entries
            .iter()
            .find(|(c, _)| *c == condition)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    /// All (condition, restricted-substances) pairs
    pub fn entries(&self) -> &[(HealthCondition, Vec<String>)] {
        &self.entries
    }
}

impl Default for HealthRiskTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
