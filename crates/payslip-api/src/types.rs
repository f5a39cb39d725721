//! API request and response types.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use payslip_core::{FieldDiagnostic, FieldValue, PayslipService, ProcessedPayslip, SubmitterId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = payslip_core::models::config::DEFAULT_MAX_UPLOAD_BYTES;

/// Size limits enforced at the router.
///
/// The limit covers the whole request body, so a base64 JSON upload carries
/// roughly three quarters of it as PDF bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiLimits {
    /// Maximum size of the request body in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ApiLimits {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ApiLimits {
    pub fn new(max_upload_bytes: usize) -> Self {
        Self { max_upload_bytes }
    }
}

/// API server state, shared by every handler.
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<PayslipService>,
}

/// Response of `POST /extract-payslip`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub id: Uuid,
    pub user_id: SubmitterId,
    pub net_pay: Option<Decimal>,
    pub employment_type: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Every configured field, `null` when absent.
    pub fields: BTreeMap<String, Option<FieldValue>>,
    /// Why absent fields are absent.
    pub diagnostics: Vec<FieldDiagnostic>,
}

impl From<ProcessedPayslip> for ExtractResponse {
    fn from(processed: ProcessedPayslip) -> Self {
        let ProcessedPayslip { record, extraction } = processed;
        Self {
            id: record.id,
            user_id: record.user_id,
            net_pay: record.net_pay,
            employment_type: record.employment_type,
            created_at: record.created_at,
            fields: extraction.result.fields().clone(),
            diagnostics: extraction.result.diagnostics().to_vec(),
        }
    }
}

/// Query of `GET /payslips`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// API version
    pub version: String,
}
