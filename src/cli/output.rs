//! Output formatting for analysis reports and health checks
//!
//! Formatters for JSON, YAML, and human-readable text. The human format uses
//! the same tree-style layout for ingredient and finding lists.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::report::AnalysisReport;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Availability of one external collaborator
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub available: bool,
    pub detail: String,
}

/// Output formatter for analysis reports
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Creates a new output formatter with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats an analysis report according to the configured format
    pub fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize analysis report to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(report)
                .context("Failed to serialize analysis report to YAML"),
            OutputFormat::Human => Ok(self.format_report_human(report)),
        }
    }

    /// Formats health check results
    pub fn format_health(&self, health: &BTreeMap<String, HealthStatus>) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(health)
                .context("Failed to serialize health status to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(health).context("Failed to serialize health status to YAML")
            }
            OutputFormat::Human => Ok(self.format_health_human(health)),
        }
    }

    fn format_report_human(&self, report: &AnalysisReport) -> String {
        let mut output = String::new();

        if report.status.is_degraded() {
            output.push_str("\u{26A0} Label Analysis Result (Degraded - no text extracted)\n");
        } else {
            output.push_str("\u{2713} Label Analysis Result\n");
        }
        output.push_str(&"\u{2501}".repeat(42));
        output.push_str("\n\n");

        output.push_str(&format!("Brand:         {}\n", report.brand.brand));
        output.push_str(&format!("Product:       {}\n", report.brand.product_name));
        output.push_str(&format!("Category:      {}\n", report.category.category));
        output.push_str(&format!(
            "Confidence:    {:.1}%\n",
            report.overall_confidence
        ));
        if let Some(ocr_confidence) = report.ocr_confidence {
            output.push_str(&format!(
                "OCR Quality:   {:.0}%\n",
                ocr_confidence * 100.0
            ));
        }
        output.push('\n');

        if !report.ingredients.is_empty() {
            output.push_str(&format!("Ingredients ({}):\n", report.ingredients.len()));
            push_tree(&mut output, report.ingredients.iter().cloned());
            output.push('\n');
        }

        if report.findings.is_empty() {
            output.push_str("No flagged ingredients.\n");
        } else {
            output.push_str(&format!("Flagged Ingredients ({}):\n", report.findings.len()));
            push_tree(
                &mut output,
                report.findings.iter().map(|f| {
                    format!("[{}] {}: {}", f.rating, f.ingredient, f.effect)
                }),
            );
        }

        output
    }

    fn format_health_human(&self, health: &BTreeMap<String, HealthStatus>) -> String {
        let mut output = String::new();
        output.push_str("Collaborator Health\n");
        output.push_str(&"\u{2501}".repeat(42));
        output.push('\n');

        for (name, status) in health {
            let marker = if status.available {
                "\u{2713}"
            } else {
                "\u{2717}"
            };
            output.push_str(&format!("{} {:<14} {}\n", marker, name, status.detail));
        }

        output
    }
}

fn push_tree(output: &mut String, items: impl ExactSizeIterator<Item = String>) {
    let last = items.len().saturating_sub(1);
    for (i, item) in items.enumerate() {
        let connector = if i == last { "\u{2514}" } else { "\u{251C}" };
        output.push_str(&format!("{}\u{2500} {}\n", connector, item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{HealthCondition, SafetyFinding, SafetyRating};
    use crate::report::AnalysisReport;

    fn sample_report() -> AnalysisReport {
        let mut report = AnalysisReport::degraded(
            "Ingredients: Water, Salt".to_string(),
            vec![HealthCondition::HighBloodPressure],
            Some(0.85),
            3,
        );
        report.status = crate::report::AnalysisStatus::Complete;
        report.ingredients = vec!["Water".to_string(), "Salt".to_string()];
        report.findings = vec![SafetyFinding {
            ingredient: "salt".to_string(),
            effect: "Avoid due to High Blood Pressure".to_string(),
            rating: SafetyRating::Moderate,
            definition: "Definition not found.".to_string(),
        }];
        report.overall_confidence = 42.5;
        report
    }

    #[test]
    fn test_format_report_json() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_report(&sample_report()).unwrap();
        assert!(output.contains("\"overall_confidence\": 42.5"));
        assert!(output.contains("\"MODERATE\""));
    }

    #[test]
    fn test_format_report_yaml() {
        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let output = formatter.format_report(&sample_report()).unwrap();
        assert!(output.contains("overall_confidence: 42.5"));
    }

    #[test]
    fn test_format_report_human() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format_report(&sample_report()).unwrap();
        assert!(output.contains("Label Analysis Result"));
        assert!(output.contains("Confidence:    42.5%"));
        assert!(output.contains("[MODERATE] salt"));
    }

    #[test]
    fn test_format_degraded_report_human() {
        let report = AnalysisReport::degraded("".to_string(), vec![], None, 1);
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format_report(&report).unwrap();
        assert!(output.contains("Degraded"));
        assert!(output.contains("No flagged ingredients."));
    }

    #[test]
    fn test_format_health_human() {
        let mut health = BTreeMap::new();
        health.insert(
            "ocr".to_string(),
            HealthStatus {
                available: true,
                detail: "tesseract 5.3.0".to_string(),
            },
        );
        health.insert(
            "lookup".to_string(),
            HealthStatus {
                available: false,
                detail: "unreachable".to_string(),
            },
        );

        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format_health(&health).unwrap();
        assert!(output.contains("tesseract 5.3.0"));
        assert!(output.contains("unreachable"));
    }

    #[test]
    fn test_format_health_json() {
        let mut health = BTreeMap::new();
        health.insert(
            "table".to_string(),
            HealthStatus {
                available: true,
                detail: "12 rows".to_string(),
            },
        );

        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_health(&health).unwrap();
        assert!(output.contains("\"available\": true"));
    }
}
