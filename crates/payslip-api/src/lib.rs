//! HTTP API for payslip extraction.
//!
//! # Endpoints
//!
//! - `POST /extract-payslip` - Extract net pay and employment type from a PDF and store the record
//! - `GET /payslips?user_id=N` - Stored records of a submitter, newest first
//! - `GET /health` - Health check endpoint
//!
//! # cURL Examples
//!
//! ```bash
//! # Multipart upload
//! curl -F "file=@payslip.pdf" -F "user_id=42" http://localhost:5000/extract-payslip
//!
//! # JSON upload
//! curl -H "content-type: application/json" \
//!      -d "{\"user_id\": 42, \"file\": \"$(base64 -w0 payslip.pdf)\"}" \
//!      http://localhost:5000/extract-payslip
//!
//! # History
//! curl "http://localhost:5000/payslips?user_id=42"
//! ```

mod error;
mod handlers;
mod server;
mod types;
mod upload;

pub use error::{ApiError, ErrorResponse};
pub use server::{create_router, create_router_with_limits, serve};
pub use types::{ApiLimits, ApiState, DEFAULT_MAX_UPLOAD_BYTES, ExtractResponse, HealthResponse, HistoryQuery};
pub use upload::{Upload, decode_upload};
