//! The analysis pipeline: validate → OCR → parse → classify → assemble

use crate::analysis::ingredients::IngredientParser;
use crate::analysis::types::{HealthCondition, SafetyFinding};
use crate::analysis::{BrandMatcher, CategoryDetector, SafetyClassifier};
use crate::catalog::Catalogs;
use crate::config::{LabelscanConfig, MAX_IMAGE_BYTES};
use crate::knowledge::{
    KnowledgeLookup, LookupError, NoopLookup, WikipediaLookup, DEFINITION_NOT_FOUND,
    DEFINITION_UNAVAILABLE,
};
use crate::ocr::{OcrEngine, OcrError, TesseractEngine};
use crate::report::{AnalysisReport, AnalysisStatus};
use chrono::Utc;
use futures_util::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Errors that abort an analysis
///
/// Lookup failures are deliberately absent: they are absorbed into
/// placeholder definitions and never propagate. Empty OCR text is not an
/// error either; it produces a degraded report.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Image path does not exist
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),

    /// Image path is not a regular file
    #[error("Image path is not a file: {0}")]
    NotAFile(PathBuf),

    /// Image payload exceeds the accepted size bound
    #[error("Image is {actual} bytes; the maximum is {max} bytes")]
    ImageTooLarge { actual: u64, max: u64 },

    /// The OCR collaborator failed; no ingredient list can be derived
    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    /// Unexpected failure inside the pipeline itself
    #[error("Internal pipeline error: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// True for errors the caller caused (bad input), as opposed to
    /// pipeline or collaborator failures
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::ImageNotFound(_)
                | AnalysisError::NotAFile(_)
                | AnalysisError::ImageTooLarge { .. }
        )
    }
}

/// Sequences one label analysis from image to report
///
/// The pipeline is safe to share across threads; catalogs are read-only and
/// the collaborators are injected as `Arc` trait objects.
pub struct AnalysisPipeline {
    ocr: Arc<dyn OcrEngine>,
    lookup: Arc<dyn KnowledgeLookup>,
    catalogs: Arc<Catalogs>,
    parser: IngredientParser,
    safety: SafetyClassifier,
    brands: BrandMatcher,
    categories: CategoryDetector,
}

impl std::fmt::Debug for AnalysisPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisPipeline")
            .field("ocr", &self.ocr.name())
            .field("lookup", &self.lookup.name())
            .finish()
    }
}

impl AnalysisPipeline {
    /// Creates a pipeline with explicit collaborators
    pub fn new(
        ocr: Arc<dyn OcrEngine>,
        lookup: Arc<dyn KnowledgeLookup>,
        catalogs: Arc<Catalogs>,
    ) -> Self {
        Self {
            ocr,
            lookup,
            parser: IngredientParser::new(),
            safety: SafetyClassifier::new(catalogs.clone()),
            brands: BrandMatcher::new(catalogs.clone()),
            categories: CategoryDetector::new(catalogs.clone()),
            catalogs,
        }
    }

    /// Creates a pipeline with the shipped collaborators from configuration
    pub fn from_config(config: &LabelscanConfig) -> Self {
        let lookup: Arc<dyn KnowledgeLookup> = if config.lookup_enabled {
            Arc::new(WikipediaLookup::new(config.lookup_timeout_secs))
        } else {
            Arc::new(NoopLookup)
        };

        Self::new(
            Arc::new(TesseractEngine::from_config(config)),
            lookup,
            Arc::new(Catalogs::from_config(config)),
        )
    }

    /// Runs the full analysis for one image
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError` for invalid input, OCR failure, or an
    /// internal pipeline fault. Empty OCR text yields an `Ok` report with
    /// `Degraded` status instead of an error.
    pub async fn analyze(
        &self,
        image: &Path,
        conditions: &[HealthCondition],
    ) -> Result<AnalysisReport, AnalysisError> {
        let start = Instant::now();

        self.validate_image(image)?;

        info!(image = %image.display(), engine = self.ocr.name(), "Starting analysis");

        let ocr_output = self.ocr.extract(image).await?;

        if ocr_output.text.is_empty() {
            warn!(image = %image.display(), "OCR yielded no text; returning degraded report");
            return Ok(AnalysisReport::degraded(
                ocr_output.text,
                conditions.to_vec(),
                ocr_output.confidence,
                start.elapsed().as_millis() as u64,
            ));
        }

        let ingredients = self.parser.parse(&ocr_output.text);

        // The three engines share only the ingredient list and read-only
        // catalogs; run them on blocking workers side by side.
        let (findings, brand, category) = {
            let safety = self.safety.clone();
            let brands = self.brands.clone();
            let categories = self.categories.clone();
            let raw_text = ocr_output.text.clone();
            let selected = conditions.to_vec();
            let for_brand = ingredients.clone();
            let for_category = ingredients.clone();

            let (findings, brand, category) = tokio::join!(
                tokio::task::spawn_blocking(move || safety.check_safety(&raw_text, &selected)),
                tokio::task::spawn_blocking(move || brands.identify(&for_brand)),
                tokio::task::spawn_blocking(move || categories.detect(&for_category)),
            );

            (
                findings.map_err(|e| AnalysisError::Internal(format!("safety task failed: {e}")))?,
                brand.map_err(|e| AnalysisError::Internal(format!("brand task failed: {e}")))?,
                category
                    .map_err(|e| AnalysisError::Internal(format!("category task failed: {e}")))?,
            )
        };

        let findings = self.enrich_definitions(findings).await;

        let overall_confidence = (brand.confidence + category.confidence * 100.0) / 2.0;

        let report = AnalysisReport {
            analysis_id: Uuid::new_v4(),
            status: AnalysisStatus::Complete,
            raw_text: ocr_output.text,
            ingredients,
            findings,
            brand,
            category,
            overall_confidence,
            ocr_confidence: ocr_output.confidence,
            conditions: conditions.to_vec(),
            created_at: Utc::now(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            analysis_id = %report.analysis_id,
            ingredients = report.ingredients.len(),
            findings = report.findings.len(),
            brand = %report.brand.brand,
            category = %report.category.category,
            overall_confidence = report.overall_confidence,
            elapsed_ms = report.processing_time_ms,
            "Analysis complete"
        );

        Ok(report)
    }

    /// Shared read-only rule data backing this pipeline
    pub fn catalogs(&self) -> &Arc<Catalogs> {
        &self.catalogs
    }

    fn validate_image(&self, image: &Path) -> Result<(), AnalysisError> {
        if !image.exists() {
            return Err(AnalysisError::ImageNotFound(image.to_path_buf()));
        }

        if !image.is_file() {
            return Err(AnalysisError::NotAFile(image.to_path_buf()));
        }

        let size = std::fs::metadata(image)
            .map_err(|e| AnalysisError::Internal(format!("cannot stat image: {e}")))?
            .len();

        if size > MAX_IMAGE_BYTES {
            return Err(AnalysisError::ImageTooLarge {
                actual: size,
                max: MAX_IMAGE_BYTES,
            });
        }

        Ok(())
    }

    /// Fills in definitions for each finding, absorbing every lookup
    /// failure into placeholder text
    async fn enrich_definitions(&self, findings: Vec<SafetyFinding>) -> Vec<SafetyFinding> {
        join_all(findings.into_iter().map(|mut finding| async move {
            finding.definition = match self.lookup.definition(&finding.ingredient).await {
                Ok(definition) => definition,
                Err(LookupError::NotFound(_)) => DEFINITION_NOT_FOUND.to_string(),
                Err(e) => {
                    warn!(
                        ingredient = %finding.ingredient,
                        error = %e,
                        "Definition lookup failed"
                    );
                    DEFINITION_UNAVAILABLE.to_string()
                }
            };
            finding
        }))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::OcrOutput;
    use async_trait::async_trait;
    use std::fs;
    use tempfile::TempDir;

    /// OCR engine returning canned text
    struct FixedOcr {
        text: String,
        confidence: Option<f64>,
    }

    #[async_trait]
    impl OcrEngine for FixedOcr {
        async fn extract(&self, _image: &Path) -> Result<OcrOutput, OcrError> {
            Ok(OcrOutput {
                text: self.text.clone(),
                confidence: self.confidence,
            })
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    /// OCR engine that always fails
    struct FailingOcr;

    #[async_trait]
    impl OcrEngine for FailingOcr {
        async fn extract(&self, _image: &Path) -> Result<OcrOutput, OcrError> {
            Err(OcrError::ExtractionFailed("corrupt image".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn pipeline_with_text(text: &str) -> (AnalysisPipeline, TempDir, PathBuf) {
        let ocr = Arc::new(FixedOcr {
            text: text.to_string(),
            confidence: Some(0.85),
        });
        let pipeline =
            AnalysisPipeline::new(ocr, Arc::new(NoopLookup), Arc::new(Catalogs::with_defaults()));

        let dir = TempDir::new().unwrap();
        let image = dir.path().join("label.png");
        fs::write(&image, b"fake image bytes").unwrap();

        (pipeline, dir, image)
    }

    #[tokio::test]
    async fn test_missing_image_is_input_error() {
        let (pipeline, _dir, _image) = pipeline_with_text("irrelevant");
        let result = pipeline
            .analyze(Path::new("/nonexistent/label.png"), &[])
            .await;

        match result {
            Err(e @ AnalysisError::ImageNotFound(_)) => assert!(e.is_input_error()),
            other => panic!("expected ImageNotFound, got {:?}", other.map(|r| r.status)),
        }
    }

    #[tokio::test]
    async fn test_directory_is_not_a_file() {
        let (pipeline, dir, _image) = pipeline_with_text("irrelevant");
        let result = pipeline.analyze(dir.path(), &[]).await;
        assert!(matches!(result, Err(AnalysisError::NotAFile(_))));
    }

    #[tokio::test]
    async fn test_oversized_image_rejected_before_ocr() {
        let (pipeline, dir, _image) = pipeline_with_text("irrelevant");
        let big = dir.path().join("big.png");
        let file = fs::File::create(&big).unwrap();
        file.set_len(MAX_IMAGE_BYTES + 1).unwrap();

        let result = pipeline.analyze(&big, &[]).await;
        match result {
            Err(e @ AnalysisError::ImageTooLarge { .. }) => assert!(e.is_input_error()),
            other => panic!("expected ImageTooLarge, got {:?}", other.map(|r| r.status)),
        }
    }

    #[tokio::test]
    async fn test_ocr_failure_propagates() {
        let pipeline = AnalysisPipeline::new(
            Arc::new(FailingOcr),
            Arc::new(NoopLookup),
            Arc::new(Catalogs::with_defaults()),
        );
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("label.png");
        fs::write(&image, b"fake").unwrap();

        let result = pipeline.analyze(&image, &[]).await;
        match result {
            Err(e @ AnalysisError::Ocr(_)) => assert!(!e.is_input_error()),
            other => panic!("expected Ocr error, got {:?}", other.map(|r| r.status)),
        }
    }

    #[tokio::test]
    async fn test_empty_text_yields_degraded_report() {
        let (pipeline, _dir, image) = pipeline_with_text("");
        let report = pipeline.analyze(&image, &[]).await.unwrap();

        assert!(report.status.is_degraded());
        assert!(report.ingredients.is_empty());
        assert!(report.brand.is_unknown());
        assert!(report.category.is_unknown());
        assert_eq!(report.overall_confidence, 0.0);
        assert_eq!(report.ocr_confidence, Some(0.85));
    }

    #[tokio::test]
    async fn test_complete_analysis_combines_confidences() {
        let (pipeline, _dir, image) =
            pipeline_with_text("Ingredients: Sodium Fluoride, Hydrated Silica");
        let report = pipeline.analyze(&image, &[]).await.unwrap();

        assert_eq!(report.status, AnalysisStatus::Complete);
        // Brand match is exact (100); toothpaste signature is full (0.9).
        assert!((report.brand.confidence - 100.0).abs() < 1e-9);
        assert!((report.category.confidence - 0.9).abs() < 1e-9);
        assert!((report.overall_confidence - 95.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_conditions_flow_into_findings() {
        let (pipeline, _dir, image) = pipeline_with_text("Ingredients: Water, Salt, Sugar");
        let report = pipeline
            .analyze(&image, &[HealthCondition::HighBloodPressure])
            .await
            .unwrap();

        assert!(report
            .findings
            .iter()
            .any(|f| f.ingredient == "salt" && f.effect.contains("High Blood Pressure")));
        // NoopLookup never resolves, so definitions fall back to the
        // not-found placeholder.
        assert!(report
            .findings
            .iter()
            .all(|f| f.definition == DEFINITION_NOT_FOUND));
        assert_eq!(report.conditions, vec![HealthCondition::HighBloodPressure]);
    }
}
