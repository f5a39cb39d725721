//! Data models.

pub mod config;
pub mod record;

pub use config::{ExtractionConfig, PayslipConfig, ServerConfig, StorageConfig};
pub use record::{NewPayslipRecord, PayslipRecord, SubmitterId};
