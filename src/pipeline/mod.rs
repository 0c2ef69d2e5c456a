//! Analysis orchestration
//!
//! The pipeline owns no matching logic. It validates input, drives the OCR
//! collaborator, fans the ingredient list out to the three classification
//! engines, enriches findings with definitions, and assembles the report.

mod orchestrator;

pub use orchestrator::{AnalysisError, AnalysisPipeline};
