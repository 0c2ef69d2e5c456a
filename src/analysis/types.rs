use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Health conditions a caller can declare for an analysis
///
/// Each condition maps to a list of restricted substances in the health-risk
/// catalog. The serialized form is the human-readable label (for example
/// `"High Blood Pressure"`), matching what the request boundary supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthCondition {
    #[serde(rename = "Diabetes")]
    Diabetes,
    #[serde(rename = "High Blood Pressure")]
    HighBloodPressure,
    #[serde(rename = "Thyroid Issues")]
    ThyroidIssues,
    #[serde(rename = "Heart Disease")]
    HeartDisease,
    #[serde(rename = "Kidney Disease")]
    KidneyDisease,
    #[serde(rename = "Cancer Risks")]
    CancerRisks,
}

impl HealthCondition {
    /// All known conditions, in catalog order
    pub const ALL: [HealthCondition; 6] = [
        HealthCondition::Diabetes,
        HealthCondition::HighBloodPressure,
        HealthCondition::ThyroidIssues,
        HealthCondition::HeartDisease,
        HealthCondition::KidneyDisease,
        HealthCondition::CancerRisks,
    ];

    /// Human-readable label, as used at the request boundary
    pub fn label(&self) -> &'static str {
        match self {
            HealthCondition::Diabetes => "Diabetes",
            HealthCondition::HighBloodPressure => "High Blood Pressure",
            HealthCondition::ThyroidIssues => "Thyroid Issues",
            HealthCondition::HeartDisease => "Heart Disease",
            HealthCondition::KidneyDisease => "Kidney Disease",
            HealthCondition::CancerRisks => "Cancer Risks",
        }
    }
}

impl fmt::Display for HealthCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HealthCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        HealthCondition::ALL
            .iter()
            .find(|c| c.label().to_lowercase() == normalized)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Unknown health condition: {}. Valid options: {}",
                    s,
                    HealthCondition::ALL
                        .iter()
                        .map(|c| c.label())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// Safety tier for a single ingredient
///
/// Tiers are ordered: `Harmful > Moderate > Safe`. The classifier checks them
/// in that priority order, so a substance on both the harmful list and a
/// condition's restricted list rates as harmful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SafetyRating {
    Safe,
    Moderate,
    Harmful,
}

impl fmt::Display for SafetyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SafetyRating::Harmful => "HARMFUL",
            SafetyRating::Moderate => "MODERATE",
            SafetyRating::Safe => "SAFE",
        };
        f.write_str(label)
    }
}

/// A single flagged ingredient in the safety report
///
/// Findings are deduplicated by (ingredient, effect): the same ingredient may
/// appear more than once when different rules flagged it with different
/// effect text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyFinding {
    /// Lowercased ingredient or restricted-substance name
    pub ingredient: String,
    /// Why the ingredient was flagged
    pub effect: String,
    /// Severity tier
    pub rating: SafetyRating,
    /// Best-effort encyclopedia definition, or a placeholder when
    /// unavailable
    pub definition: String,
}

/// Result of brand identification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandMatch {
    /// Brand name, or "Unknown" when nothing matched
    pub brand: String,
    /// Product name, or "Generic Product" when nothing matched
    pub product_name: String,
    /// Match confidence in [0, 100]
    pub confidence: f64,
}

impl BrandMatch {
    /// The defined no-match sentinel
    pub fn unknown() -> Self {
        Self {
            brand: "Unknown".to_string(),
            product_name: "Generic Product".to_string(),
            confidence: 0.0,
        }
    }

    /// True if this is the no-match sentinel
    pub fn is_unknown(&self) -> bool {
        self.confidence == 0.0 && self.brand == "Unknown"
    }
}

/// Result of category detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMatch {
    /// Category label, or "UNKNOWN" when no signature matched
    pub category: String,
    /// Match confidence clamped to [0, 1]
    pub confidence: f64,
}

impl CategoryMatch {
    /// The defined no-match sentinel
    pub fn unknown() -> Self {
        Self {
            category: "UNKNOWN".to_string(),
            confidence: 0.0,
        }
    }

    /// True if this is the no-match sentinel
    pub fn is_unknown(&self) -> bool {
        self.category == "UNKNOWN"
    }
}
