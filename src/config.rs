//! Configuration management for labelscan
//!
//! This module provides a configuration system that loads settings from
//! environment variables with sensible defaults. Configuration covers the OCR
//! binary, the optional harmful-ingredient table, lookup behavior, timeouts,
//! and logging.
//!
//! # Environment Variables
//!
//! - `LABELSCAN_TESSERACT_CMD`: OCR binary to invoke - default: "tesseract"
//! - `LABELSCAN_HARMFUL_TABLE`: Path to the harmful-ingredient workbook -
//!   default: "static_data/harmful_ingredients.xlsx"
//! - `LABELSCAN_OCR_TIMEOUT`: OCR timeout in seconds - default: "30"
//! - `LABELSCAN_LOOKUP_TIMEOUT`: Definition-lookup timeout in seconds -
//!   default: "10"
//! - `LABELSCAN_LOOKUP_ENABLED`: Enable network definition lookups
//!   (true|false) - default: "true"
//! - `LABELSCAN_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use labelscan::LabelscanConfig;
//!
//! // Load configuration from environment with defaults
//! let config = LabelscanConfig::default();
//!
//! // Validate configuration
//! config.validate().expect("Invalid configuration");
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Default values for configuration
const DEFAULT_TESSERACT_CMD: &str = "tesseract";
const DEFAULT_HARMFUL_TABLE: &str = "static_data/harmful_ingredients.xlsx";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_OCR_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOOKUP_ENABLED: bool = true;

/// Largest accepted image payload: 10 MiB. Oversized uploads are rejected
/// before any OCR work starts.
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Main configuration structure for labelscan
///
/// This struct holds all parameters needed for an analysis run. It can be
/// constructed with `Default::default()`, which loads from environment
/// variables with fallback defaults.
#[derive(Debug, Clone)]
pub struct LabelscanConfig {
    /// OCR binary to invoke (name or absolute path)
    pub tesseract_cmd: String,

    /// Path to the harmful-ingredient workbook; the file is optional and a
    /// missing file degrades the classifier to condition rules only
    pub harmful_table: PathBuf,

    /// OCR subprocess timeout in seconds
    pub ocr_timeout_secs: u64,

    /// Definition-lookup request timeout in seconds
    pub lookup_timeout_secs: u64,

    /// Whether to perform network definition lookups at all
    pub lookup_enabled: bool,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for LabelscanConfig {
    /// Creates a new configuration by loading from environment variables
    /// with defaults
    fn default() -> Self {
        let tesseract_cmd =
            env::var("LABELSCAN_TESSERACT_CMD").unwrap_or_else(|_| DEFAULT_TESSERACT_CMD.to_string());

        let harmful_table = env::var("LABELSCAN_HARMFUL_TABLE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_HARMFUL_TABLE));

        let ocr_timeout_secs = env::var("LABELSCAN_OCR_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_OCR_TIMEOUT_SECS);

        let lookup_timeout_secs = env::var("LABELSCAN_LOOKUP_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECS);

        let lookup_enabled = env::var("LABELSCAN_LOOKUP_ENABLED")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_LOOKUP_ENABLED);

        let log_level = env::var("LABELSCAN_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            tesseract_cmd,
            harmful_table,
            ocr_timeout_secs,
            lookup_timeout_secs,
            lookup_enabled,
            log_level,
        }
    }
}

impl LabelscanConfig {
    /// Validates the configuration
    ///
    /// Checks that:
    /// - Timeouts are in valid ranges
    /// - The OCR command is non-empty
    /// - The log level is valid
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any validation fails
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tesseract_cmd.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "OCR command must not be empty".to_string(),
            ));
        }

        // Timeouts must be at least 1 second and at most 10 minutes
        for (name, secs) in [
            ("OCR timeout", self.ocr_timeout_secs),
            ("lookup timeout", self.lookup_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} must be at least 1 second",
                    name
                )));
            }
            if secs > 600 {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} cannot exceed 10 minutes",
                    name
                )));
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> std::collections::HashMap<String, String> {
        let mut map = std::collections::HashMap::new();

        map.insert("tesseract_cmd".to_string(), self.tesseract_cmd.clone());
        map.insert(
            "harmful_table".to_string(),
            self.harmful_table.display().to_string(),
        );
        map.insert(
            "ocr_timeout_secs".to_string(),
            self.ocr_timeout_secs.to_string(),
        );
        map.insert(
            "lookup_timeout_secs".to_string(),
            self.lookup_timeout_secs.to_string(),
        );
        map.insert("lookup_enabled".to_string(), self.lookup_enabled.to_string());
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for LabelscanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Labelscan Configuration:")?;
        writeln!(f, "  OCR Command: {}", self.tesseract_cmd)?;
        writeln!(f, "  Harmful Table: {}", self.harmful_table.display())?;
        writeln!(f, "  OCR Timeout: {}s", self.ocr_timeout_secs)?;
        writeln!(f, "  Lookup Timeout: {}s", self.lookup_timeout_secs)?;
        writeln!(f, "  Lookup Enabled: {}", self.lookup_enabled)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    fn test_default_configuration() {
        let _guards = vec![
            EnvGuard::set("LABELSCAN_TESSERACT_CMD", DEFAULT_TESSERACT_CMD),
            EnvGuard::set("LABELSCAN_LOG_LEVEL", DEFAULT_LOG_LEVEL),
        ];

        let config = LabelscanConfig::default();

        assert_eq!(config.tesseract_cmd, DEFAULT_TESSERACT_CMD);
        assert_eq!(config.ocr_timeout_secs, DEFAULT_OCR_TIMEOUT_SECS);
        assert_eq!(config.lookup_timeout_secs, DEFAULT_LOOKUP_TIMEOUT_SECS);
        assert_eq!(config.lookup_enabled, DEFAULT_LOOKUP_ENABLED);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_environment_variable_parsing() {
        let _guards = vec![
            EnvGuard::set("LABELSCAN_TESSERACT_CMD", "/opt/tesseract/bin/tesseract"),
            EnvGuard::set("LABELSCAN_HARMFUL_TABLE", "/data/table.xlsx"),
            EnvGuard::set("LABELSCAN_OCR_TIMEOUT", "60"),
            EnvGuard::set("LABELSCAN_LOOKUP_TIMEOUT", "5"),
            EnvGuard::set("LABELSCAN_LOOKUP_ENABLED", "false"),
            EnvGuard::set("LABELSCAN_LOG_LEVEL", "debug"),
        ];

        let config = LabelscanConfig::default();

        assert_eq!(config.tesseract_cmd, "/opt/tesseract/bin/tesseract");
        assert_eq!(config.harmful_table, PathBuf::from("/data/table.xlsx"));
        assert_eq!(config.ocr_timeout_secs, 60);
        assert_eq!(config.lookup_timeout_secs, 5);
        assert!(!config.lookup_enabled);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_configuration_validation_valid() {
        let config = LabelscanConfig {
            tesseract_cmd: "tesseract".to_string(),
            harmful_table: PathBuf::from("table.xlsx"),
            ocr_timeout_secs: 30,
            lookup_timeout_secs: 10,
            lookup_enabled: true,
            log_level: "info".to_string(),
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_configuration_validation_invalid_timeout() {
        let mut config = LabelscanConfig::default();
        config.ocr_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = LabelscanConfig::default();
        config.lookup_timeout_secs = 601;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configuration_validation_empty_command() {
        let mut config = LabelscanConfig::default();
        config.tesseract_cmd = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configuration_validation_invalid_log_level() {
        let mut config = LabelscanConfig::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_display() {
        let config = LabelscanConfig::default();
        let display = format!("{}", config);
        assert!(display.contains("Labelscan Configuration:"));
        assert!(display.contains("OCR Command:"));
    }

    #[test]
    fn test_to_display_map() {
        let config = LabelscanConfig::default();
        let map = config.to_display_map();
        assert!(map.contains_key("tesseract_cmd"));
        assert!(map.contains_key("lookup_enabled"));
    }
}
