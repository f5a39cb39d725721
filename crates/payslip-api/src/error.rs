//! API error type and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use payslip_core::PayslipError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error category, e.g. `InvalidDocument`.
    pub error_type: String,
    /// Human-readable message.
    pub message: String,
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself is unusable: missing file, wrong content type,
    /// malformed body.
    #[error("{0}")]
    BadRequest(String),

    /// The body exceeded the configured upload limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// A failure from the processing pipeline.
    #[error(transparent)]
    Payslip(#[from] PayslipError),

    /// A blocking task died.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Shorthand for a bad request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Payslip(PayslipError::InvalidSubmitter(_)) => StatusCode::BAD_REQUEST,
            Self::Payslip(PayslipError::InvalidDocument(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Payslip(PayslipError::Storage(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Payslip(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BadRequest",
            Self::PayloadTooLarge(_) => "PayloadTooLarge",
            Self::Payslip(e) => e.kind(),
            Self::Internal(_) => "InternalError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{}: {}", self.error_type(), self);
        } else {
            tracing::info!("Rejected request ({}): {}", status.as_u16(), self);
        }

        let body = Json(ErrorResponse {
            error_type: self.error_type().to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
