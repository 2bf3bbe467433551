//! Configuration management for LitTrack
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with LITTRACK__)
//! - Configuration files (config/default.toml, config/{env}.toml, config/local.toml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Local data file configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Research context
    #[serde(default)]
    pub research: ResearchConfig,

    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Path of the JSON data file holding all entries
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Pretty-print the data file
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResearchConfig {
    /// Research question used when the data file has none
    pub question: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Citation style used when none is requested: APA, MLA, Chicago, Harvard
    #[serde(default = "default_citation_style")]
    pub citation_style: String,

    /// CSV field delimiter
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: char,

    /// Maximum number of rows written by a single export
    #[serde(default = "default_max_export_rows")]
    pub max_export_rows: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Service name attached to log output
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_data_file() -> PathBuf { PathBuf::from("literature_tracker_data.json") }
fn default_pretty() -> bool { true }
fn default_citation_style() -> String { "APA".to_string() }
fn default_csv_delimiter() -> char { ',' }
fn default_max_export_rows() -> usize { 10_000 }
fn default_log_level() -> String { "warn".to_string() }
fn default_json_logging() -> bool { false }
fn default_service_name() -> String { "littrack".to_string() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            pretty: default_pretty(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            citation_style: default_citation_style(),
            csv_delimiter: default_csv_delimiter(),
            max_export_rows: default_max_export_rows(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            service_name: default_service_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("LITTRACK_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("storage.pretty", true)?
            .set_default("export.citation_style", "APA")?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with LITTRACK__ prefix
            // e.g., LITTRACK__STORAGE__DATA_FILE=/tmp/lit.json
            .add_source(
                Environment::with_prefix("LITTRACK")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific file instead of the config/ directory layers
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("storage.pretty", true)?
            .set_default("export.citation_style", "APA")?
            .add_source(File::from(path))
            .add_source(
                Environment::with_prefix("LITTRACK")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        config.try_deserialize()
    }

    /// Effective tracing filter directive
    pub fn log_filter(&self) -> String {
        format!(
            "{level},littrack_common={level},littrack_analysis={level},littrack={level}",
            level = self.observability.log_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.data_file, PathBuf::from("literature_tracker_data.json"));
        assert_eq!(config.export.citation_style, "APA");
        assert_eq!(config.export.csv_delimiter, ',');
        assert_eq!(config.export.max_export_rows, 10_000);
        assert!(config.research.question.is_none());
    }

    #[test]
    fn test_from_file_fills_missing_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[storage]\ndata_file = \"/tmp/review.json\"\n\n[research]\nquestion = \"Why?\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.storage.data_file, PathBuf::from("/tmp/review.json"));
        assert!(config.storage.pretty);
        assert_eq!(config.research.question.as_deref(), Some("Why?"));
        assert_eq!(config.observability.log_level, "warn");
    }

    #[test]
    fn test_from_file_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::from_file(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_log_filter() {
        let config = AppConfig::default();
        assert!(config.log_filter().starts_with("warn,"));
    }
}
