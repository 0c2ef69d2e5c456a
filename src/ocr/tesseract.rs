//! Tesseract subprocess OCR engine

use super::{OcrEngine, OcrError, OcrOutput};
use crate::config::LabelscanConfig;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// OCR engine that invokes the `tesseract` binary
///
/// Text extraction and the confidence pass are separate invocations; the
/// confidence pass is best-effort and never fails an extraction.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    cmd: String,
    timeout_secs: u64,
}

impl TesseractEngine {
    pub fn new(cmd: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            cmd: cmd.into(),
            timeout_secs,
        }
    }

    pub fn from_config(config: &LabelscanConfig) -> Self {
        Self::new(config.tesseract_cmd.clone(), config.ocr_timeout_secs)
    }

    /// Checks that the binary is runnable and returns its version line
    pub async fn probe(&self) -> Result<String, OcrError> {
        let output = self.run(&["--version"]).await?;
        let version = String::from_utf8_lossy(&output.stdout);
        Ok(version.lines().next().unwrap_or("unknown").to_string())
    }

    async fn run(&self, args: &[&str]) -> Result<std::process::Output, OcrError> {
        let future = Command::new(&self.cmd)
            .args(args)
            .kill_on_drop(true)
            .output();

        match timeout(Duration::from_secs(self.timeout_secs), future).await {
            Err(_) => Err(OcrError::Timeout {
                seconds: self.timeout_secs,
            }),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => Err(
                OcrError::EngineUnavailable(format!("'{}' not found on PATH", self.cmd)),
            ),
            Ok(Err(e)) => Err(OcrError::Io(e)),
            Ok(Ok(output)) => Ok(output),
        }
    }

    /// Mean word confidence from Tesseract's TSV output, scaled to [0, 1]
    ///
    /// Any failure here is swallowed: a report without OCR confidence is
    /// still a complete report.
    async fn confidence(&self, image: &str) -> Option<f64> {
        let output = match self.run(&[image, "stdout", "tsv"]).await {
            Ok(output) if output.status.success() => output,
            Ok(_) | Err(_) => return None,
        };

        let tsv = String::from_utf8_lossy(&output.stdout);
        let confidences: Vec<f64> = tsv
            .lines()
            .skip(1)
            .filter_map(|line| {
                let fields: Vec<&str> = line.split('\t').collect();
                // Word-level rows carry a non-negative confidence in column
                // 10; structural rows report -1.
                fields.get(10).and_then(|c| c.parse::<f64>().ok())
            })
            .filter(|c| *c >= 0.0)
            .collect();

        if confidences.is_empty() {
            return None;
        }

        let mean = confidences.iter().sum::<f64>() / confidences.len() as f64;
        Some((mean / 100.0).clamp(0.0, 1.0))
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn extract(&self, image: &Path) -> Result<OcrOutput, OcrError> {
        let image_arg = image.display().to_string();

        debug!(image = %image_arg, engine = %self.cmd, "Running OCR");

        let output = self.run(&[image_arg.as_str(), "stdout"]).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ExtractionFailed(stderr.trim().to_string()));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();

        let confidence = self.confidence(&image_arg).await;
        if confidence.is_none() {
            warn!(image = %image_arg, "No OCR confidence available");
        }

        debug!(
            image = %image_arg,
            chars = text.len(),
            confidence = ?confidence,
            "OCR complete"
        );

        Ok(OcrOutput { text, confidence })
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
