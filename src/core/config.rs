//! Configuration for the remote adapters.
//!
//! This module provides:
//! - YAML file support
//! - Builder for programmatic construction
//! - Validation and defaults

use crate::core::{RemoteError, Result};
use serde::{Deserialize, Serialize};

/// Largest accepted initial scratch buffer.
pub const MAX_BUFFER_CAPACITY: usize = 64 * 1024 * 1024;

/// Complete adapter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Write path configuration
    pub write: WriteConfig,
    /// Read path configuration
    pub read: ReadConfig,
}

/// Write path configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteConfig {
    /// Initial capacity of the per-call compression buffer
    pub buffer_capacity: usize,
}

/// Read path configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadConfig {
    /// Reject query results with malformed label sets
    pub validate_labels: bool,
    /// Behaviour of label name/value enumeration
    pub label_queries: LabelQueries,
}

/// How label enumeration requests are answered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelQueries {
    /// Empty result, no error
    #[default]
    Empty,
    /// Explicit `Unsupported` error
    Unsupported,
}

impl Default for WriteConfig {
    fn default() -> Self {
        WriteConfig {
            buffer_capacity: 4096,
        }
    }
}

impl Default for ReadConfig {
    fn default() -> Self {
        ReadConfig {
            validate_labels: true,
            label_queries: LabelQueries::Empty,
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Result<Self> {
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.write.buffer_capacity > MAX_BUFFER_CAPACITY {
            return Err(RemoteError::config(format!(
                "write.buffer_capacity must be at most {} bytes, got {}",
                MAX_BUFFER_CAPACITY, self.write.buffer_capacity
            )));
        }

        Ok(())
    }
}

/// Configuration builder for programmatic construction
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
        }
    }

    /// Load configuration from YAML string
    pub fn from_yaml(mut self, yaml: &str) -> Result<Self> {
        self.config = serde_yaml::from_str(yaml)
            .map_err(|e| RemoteError::config(format!("Failed to parse YAML config: {}", e)))?;
        Ok(self)
    }

    /// Set the initial compression buffer capacity
    pub fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.config.write.buffer_capacity = bytes;
        self
    }

    /// Enable or disable label validation of query results
    pub fn validate_labels(mut self, enable: bool) -> Self {
        self.config.read.validate_labels = enable;
        self
    }

    /// Set how label enumeration is answered
    pub fn label_queries(mut self, mode: LabelQueries) -> Self {
        self.config.read.label_queries = mode;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.write.buffer_capacity, 4096);
        assert!(config.read.validate_labels);
        assert_eq!(config.read.label_queries, LabelQueries::Empty);
    }

    #[test]
    fn test_oversized_buffer_rejected() {
        let result = ConfigBuilder::new()
            .buffer_capacity(MAX_BUFFER_CAPACITY + 1)
            .build();
        assert!(matches!(result, Err(RemoteError::Config(_))));
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .buffer_capacity(1024)
            .validate_labels(false)
            .label_queries(LabelQueries::Unsupported)
            .build()
            .unwrap();

        assert_eq!(config.write.buffer_capacity, 1024);
        assert!(!config.read.validate_labels);
        assert_eq!(config.read.label_queries, LabelQueries::Unsupported);
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
write:
  buffer_capacity: 65536
read:
  label_queries: unsupported
"#;

        let config = ConfigBuilder::new().from_yaml(yaml).unwrap().build().unwrap();

        assert_eq!(config.write.buffer_capacity, 65536);
        assert_eq!(config.read.label_queries, LabelQueries::Unsupported);
        // omitted keys keep their defaults
        assert!(config.read.validate_labels);
    }

    #[test]
    fn test_yaml_parse_error() {
        let result = ConfigBuilder::new().from_yaml("write: [not, a, map]");
        assert!(matches!(result, Err(RemoteError::Config(_))));
    }
}
