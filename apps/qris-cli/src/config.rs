//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default tracing filter when neither `RUST_LOG` nor `QRIS_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// QRIS payloads are capped well below this by the QR symbol itself.
pub const DEFAULT_MAX_PAYLOAD_LEN: usize = 512;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text for terminals and shell pipelines
    #[default]
    Text,
    /// One JSON document per invocation
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue("QRIS_OUTPUT_FORMAT".to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Output format unless overridden with `--format`
    pub output_format: OutputFormat,

    /// Longest payload accepted, in bytes
    pub max_payload_len: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            output_format: OutputFormat::default(),
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    ///
    /// Tests pass a closure over a fixed map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = CliConfig {
            log_filter: lookup("QRIS_LOG")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),

            output_format: match lookup("QRIS_OUTPUT_FORMAT") {
                Some(value) => value.parse()?,
                None => OutputFormat::default(),
            },

            max_payload_len: lookup("QRIS_MAX_PAYLOAD_LEN")
                .unwrap_or_else(|| DEFAULT_MAX_PAYLOAD_LEN.to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("QRIS_MAX_PAYLOAD_LEN".to_string()))?,
        };

        if config.max_payload_len < qris_core::MIN_PAYLOAD_LEN {
            return Err(ConfigError::OutOfRange {
                key: "QRIS_MAX_PAYLOAD_LEN".to_string(),
                min: qris_core::MIN_PAYLOAD_LEN,
            });
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("{key} must be at least {min}")]
    OutOfRange { key: String, min: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.output_format, OutputFormat::Text);
        assert_eq!(config.max_payload_len, 512);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("QRIS_LOG", "qris=debug"),
            ("QRIS_OUTPUT_FORMAT", "JSON"),
            ("QRIS_MAX_PAYLOAD_LEN", " 1024 "),
        ])
        .unwrap();
        assert_eq!(config.log_filter, "qris=debug");
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.max_payload_len, 1024);
    }

    #[test]
    fn test_blank_log_filter_uses_default() {
        let config = load(&[("QRIS_LOG", "  ")]).unwrap();
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("QRIS_OUTPUT_FORMAT", "yaml")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for QRIS_OUTPUT_FORMAT");

        let err = load(&[("QRIS_MAX_PAYLOAD_LEN", "lots")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for QRIS_MAX_PAYLOAD_LEN");

        let err = load(&[("QRIS_MAX_PAYLOAD_LEN", "4")]).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { min: 10, .. }));
    }
}
