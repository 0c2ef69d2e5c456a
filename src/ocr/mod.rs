//! OCR engine abstraction
//!
//! The image-to-text step is an external collaborator behind the
//! [`OcrEngine`] trait. The shipped implementation shells out to the
//! Tesseract binary; tests inject mock engines. OCR failure is a distinct,
//! catchable error: without raw text no ingredient list can be derived.

mod tesseract;

pub use tesseract::TesseractEngine;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors from an OCR engine
#[derive(Debug, Error)]
pub enum OcrError {
    /// The OCR binary is missing or cannot be started
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Extraction exceeded the configured timeout
    #[error("OCR timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The engine ran but reported failure
    #[error("OCR extraction failed: {0}")]
    ExtractionFailed(String),

    /// I/O failure while invoking the engine
    #[error("I/O error during OCR: {0}")]
    Io(#[from] std::io::Error),
}

/// Text extracted from one image
#[derive(Debug, Clone, PartialEq)]
pub struct OcrOutput {
    /// Raw recognized text; may be empty for blank or unreadable images
    pub text: String,
    /// Mean recognition confidence in [0, 1], when the engine reports one
    pub confidence: Option<f64>,
}

/// An external image-to-text engine
///
/// Implementations must be safe to share across concurrent analyses.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Extracts text from an image file
    ///
    /// Empty extracted text is a valid output (the pipeline degrades), not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns `OcrError` if the engine is unavailable, times out, or the
    /// extraction itself fails.
    async fn extract(&self, image: &Path) -> Result<OcrOutput, OcrError>;

    /// Human-readable name of this engine
    fn name(&self) -> &str;
}
