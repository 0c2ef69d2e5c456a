//! The structured result produced for the boundary layer to serialize

use crate::analysis::types::{BrandMatch, CategoryMatch, HealthCondition, SafetyFinding};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome class of an analysis
///
/// `Degraded` means OCR yielded no usable text: the report carries sentinels
/// and zero confidence instead of fabricated data. Hard failures never
/// produce a report at all; they surface as typed errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Complete,
    Degraded,
}

impl AnalysisStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, AnalysisStatus::Degraded)
    }
}

/// Aggregate result of one label analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique id for this analysis run
    pub analysis_id: Uuid,
    /// Outcome class
    pub status: AnalysisStatus,
    /// Raw OCR text the analysis worked from
    pub raw_text: String,
    /// Tokenized ingredient list in label order
    pub ingredients: Vec<String>,
    /// Flagged ingredients with severity and definitions
    pub findings: Vec<SafetyFinding>,
    /// Identified brand/product, or the Unknown sentinel
    pub brand: BrandMatch,
    /// Detected product category, or the UNKNOWN sentinel
    pub category: CategoryMatch,
    /// Combined brand/category confidence in [0, 100]
    pub overall_confidence: f64,
    /// Mean OCR recognition confidence in [0, 1], when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_confidence: Option<f64>,
    /// Health conditions the caller declared
    pub conditions: Vec<HealthCondition>,
    /// When the analysis ran
    pub created_at: DateTime<Utc>,
    /// Wall-clock duration of the full pipeline
    pub processing_time_ms: u64,
}

impl AnalysisReport {
    /// Builds the degraded report used when OCR yields no usable text
    pub fn degraded(
        raw_text: String,
        conditions: Vec<HealthCondition>,
        ocr_confidence: Option<f64>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            analysis_id: Uuid::new_v4(),
            status: AnalysisStatus::Degraded,
            raw_text,
            ingredients: Vec::new(),
            findings: Vec::new(),
            brand: BrandMatch::unknown(),
            category: CategoryMatch::unknown(),
            overall_confidence: 0.0,
            ocr_confidence,
            conditions,
            created_at: Utc::now(),
            processing_time_ms,
        }
    }

    /// Count of findings at the given rating or worse
    pub fn findings_at_least(&self, rating: crate::analysis::types::SafetyRating) -> usize {
        self.findings.iter().filter(|f| f.rating >= rating).count()
    }
}
