//! API request handlers.

use axum::{
    Json,
    extract::{Query, Request, State},
    http::StatusCode,
};
use payslip_core::{PayslipRecord, SubmitterId};
use tracing::info;

use super::{
    error::ApiError,
    types::{ApiState, ExtractResponse, HealthResponse, HistoryQuery},
    upload::decode_upload,
};

/// Extract endpoint handler.
///
/// POST /extract-payslip
///
/// Accepts either multipart form data (`file`, `user_id`) or a JSON body
/// (`user_id`, base64 `file`, optional `filename`). Extracts the payslip
/// fields, stores a record and returns it with `201 Created`.
///
/// The submitter is validated before the document is touched.
pub async fn extract_handler(
    State(state): State<ApiState>,
    request: Request,
) -> Result<(StatusCode, Json<ExtractResponse>), ApiError> {
    let upload = decode_upload(request).await?;
    info!(
        "Received {} byte upload {:?} from submitter {}",
        upload.document.len(),
        upload.filename.as_deref().unwrap_or("<unnamed>"),
        upload.submitter
    );

    let service = state.service.clone();
    let processed = tokio::task::spawn_blocking(move || service.process(&upload.document, upload.submitter))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok((StatusCode::CREATED, Json(processed.into())))
}

/// History endpoint handler.
///
/// GET /payslips?user_id=N
///
/// Returns the submitter's records, newest first; `[]` when there are none.
pub async fn history_handler(
    State(state): State<ApiState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<PayslipRecord>>, ApiError> {
    let submitter: SubmitterId = query.user_id.as_deref().unwrap_or("").parse()?;

    let service = state.service.clone();
    let records = tokio::task::spawn_blocking(move || service.history(submitter))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(records))
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
