//! Analysis report schema

mod schema;

pub use schema::{AnalysisReport, AnalysisStatus};
