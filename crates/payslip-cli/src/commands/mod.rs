//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod list;
pub mod serve;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use payslip_core::{PayslipConfig, PayslipService};
use payslip_store::SqliteStore;
use tracing::debug;

/// `<config dir>/payslip/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("payslip")
        .join("config.json")
}

/// The file `--config` points at, or the default location.
pub fn config_file(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(default_config_path)
}

/// Load the configuration and apply environment overrides.
///
/// An explicit `--config` file must exist; the default file is optional.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<PayslipConfig> {
    let config = match explicit {
        Some(path) => PayslipConfig::from_file(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Loading config from {}", path.display());
                PayslipConfig::from_file(&path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?
            } else {
                PayslipConfig::default()
            }
        }
    };

    Ok(config.with_env_overrides())
}

/// Service backed by the SQLite database at `database`.
pub fn sqlite_service(config: &PayslipConfig, database: &Path) -> anyhow::Result<PayslipService> {
    let store = SqliteStore::new(database)
        .with_context(|| format!("Failed to open database {}", database.display()))?;
    let schema = config.schema()?;
    Ok(PayslipService::new(Arc::new(store)).with_schema(schema))
}
