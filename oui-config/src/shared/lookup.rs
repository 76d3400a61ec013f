use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::shared::{IndexConfig, ValidationError};

/// Top-level configuration of the `oui-lookup` binary.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LookupConfig {
    /// Path to the vendor assignment file (`prefix,vendor,...` CSV export).
    pub vendor_file: PathBuf,
    /// Index construction and resolution settings.
    #[serde(default)]
    pub index: IndexConfig,
    /// Prometheus exporter settings. Metrics are not exported when absent.
    #[serde(default)]
    pub metrics: Option<MetricsConfig>,
}

impl LookupConfig {
    /// Validates the configuration and all nested sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.vendor_file.as_os_str().is_empty() {
            return Err(ValidationError::InvalidFieldValue {
                field: "vendor_file".to_string(),
                constraint: "must not be empty".to_string(),
            });
        }

        self.index.validate()
    }
}

/// Prometheus exporter configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct MetricsConfig {
    /// Port of the `/metrics` HTTP listener.
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

impl MetricsConfig {
    /// Default port of the metrics listener.
    pub const DEFAULT_PORT: u16 = 9000;
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

fn default_metrics_port() -> u16 {
    MetricsConfig::DEFAULT_PORT
}
