//! Configuration structures for the payslip service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::SchemaError;
use crate::extraction::{FieldSchema, FieldSpec};

/// Default upload limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Main configuration for the payslip service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayslipConfig {
    /// HTTP server configuration.
    pub server: ServerConfig,

    /// Record storage configuration.
    pub storage: StorageConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,

    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Record storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file.
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("payslips.db"),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Fields to extract, in order.
    pub fields: Vec<FieldSpec>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            fields: FieldSpec::payslip_defaults(),
        }
    }
}

impl PayslipConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// Compile the configured field specs.
    pub fn schema(&self) -> Result<FieldSchema, SchemaError> {
        FieldSchema::compile(self.extraction.fields.iter().cloned())
    }

    /// Apply `PAYSLIP_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup("PAYSLIP_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PAYSLIP_PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring PAYSLIP_PORT={:?}: not a port number", port),
            }
        }
        if let Some(path) = lookup("PAYSLIP_DATABASE") {
            self.storage.database_path = PathBuf::from(path);
        }
        if let Some(limit) = lookup("PAYSLIP_MAX_UPLOAD_BYTES") {
            match limit.trim().parse() {
                Ok(limit) => self.server.max_upload_bytes = limit,
                Err(_) => warn!("Ignoring PAYSLIP_MAX_UPLOAD_BYTES={:?}: not a byte count", limit),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::FieldKind;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: PayslipConfig = serde_json::from_str(r#"{"server": {"port": 8080}}"#).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.extraction.fields, FieldSpec::payslip_defaults());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PayslipConfig::default();
        config.storage.database_path = PathBuf::from("/var/lib/payslip/records.db");
        config.extraction.fields.push(FieldSpec::date("pay_date", "Pay Date"));
        config.save(&path).unwrap();

        let loaded = PayslipConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.extraction.fields[2].kind, FieldKind::Date);
    }

    #[test]
    fn test_invalid_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = PayslipConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_schema_compiles_configured_fields() {
        let mut config = PayslipConfig::default();
        assert_eq!(config.schema().unwrap().len(), 2);

        config.extraction.fields.push(FieldSpec::currency("net_pay", "Net"));
        assert!(matches!(config.schema(), Err(SchemaError::DuplicateField(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PAYSLIP_HOST", "0.0.0.0"),
            ("PAYSLIP_PORT", "not-a-port"),
            ("PAYSLIP_DATABASE", "/tmp/p.db"),
            ("PAYSLIP_MAX_UPLOAD_BYTES", "2048"),
        ]
        .into_iter()
        .collect();

        let config = PayslipConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.database_path, PathBuf::from("/tmp/p.db"));
        assert_eq!(config.server.max_upload_bytes, 2048);
    }
}
