//! Decoding of upload requests.
//!
//! Two encodings are accepted and both end up as an [`Upload`]:
//! - `multipart/form-data` with a `file` part and a `user_id` part
//! - `application/json` with `user_id`, base64 `file` and optional `filename`

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header},
};
use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use http_body_util::LengthLimitError;
use payslip_core::{PayslipError, SubmitterId};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

/// Standard alphabet, padding optional.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded upload: the document and who submitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub document: Vec<u8>,
    pub submitter: SubmitterId,
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonUpload {
    user_id: Option<Value>,
    file: Option<String>,
    filename: Option<String>,
}

/// Decode a request body into an [`Upload`], choosing the adapter by content type.
pub async fn decode_upload(request: Request) -> Result<Upload, ApiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        decode_multipart(multipart).await
    } else if content_type.starts_with("application/json") {
        let body = Bytes::from_request(request, &()).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                payload_too_large()
            } else {
                ApiError::bad_request(e.body_text())
            }
        })?;
        decode_json(&body)
    } else {
        Err(ApiError::bad_request(format!(
            "Unsupported content type {:?}, expected multipart/form-data or application/json",
            content_type
        )))
    }
}

async fn decode_multipart(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let mut document = None;
    let mut filename = None;
    let mut user_id = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name().unwrap_or("") {
            "file" => {
                filename = field.file_name().map(|s| s.to_string());
                let data = field.bytes().await.map_err(multipart_error)?;
                document = Some(data.to_vec());
            }
            "user_id" => {
                user_id = Some(field.text().await.map_err(multipart_error)?);
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let document = document.ok_or_else(|| ApiError::bad_request("PDF file is missing"))?;
    check_filename(filename.as_deref())?;

    let submitter = match user_id {
        Some(text) => text.parse::<SubmitterId>()?,
        None => return Err(missing_submitter().into()),
    };

    Ok(Upload {
        document,
        submitter,
        filename,
    })
}

fn decode_json(body: &[u8]) -> Result<Upload, ApiError> {
    let upload: JsonUpload =
        serde_json::from_slice(body).map_err(|e| ApiError::bad_request(format!("Malformed JSON body: {}", e)))?;

    let encoded = upload.file.ok_or_else(|| ApiError::bad_request("PDF file is missing"))?;
    check_filename(upload.filename.as_deref())?;

    let submitter = submitter_from_json(upload.user_id.as_ref())?;

    let document = BASE64
        .decode(encoded.trim())
        .map_err(|e| ApiError::bad_request(format!("file is not valid base64: {}", e)))?;

    Ok(Upload {
        document,
        submitter,
        filename: upload.filename,
    })
}

fn submitter_from_json(value: Option<&Value>) -> Result<SubmitterId, PayslipError> {
    match value {
        None | Some(Value::Null) => Err(missing_submitter()),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(SubmitterId::new)
            .ok_or_else(|| PayslipError::InvalidSubmitter(format!("user_id must be an integer, got {}", n))),
        Some(Value::String(s)) => s.parse(),
        Some(other) => Err(PayslipError::InvalidSubmitter(format!(
            "user_id must be an integer, got {}",
            other
        ))),
    }
}

fn check_filename(filename: Option<&str>) -> Result<(), ApiError> {
    match filename {
        Some(name) if !name.to_ascii_lowercase().ends_with(".pdf") => {
            Err(ApiError::bad_request("Only PDF files are supported"))
        }
        _ => Ok(()),
    }
}

fn missing_submitter() -> PayslipError {
    PayslipError::InvalidSubmitter("user_id is required".to_string())
}

fn payload_too_large() -> ApiError {
    ApiError::PayloadTooLarge("Request body exceeds the upload limit".to_string())
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE || exceeds_body_limit(&e) {
        payload_too_large()
    } else {
        ApiError::bad_request(e.body_text())
    }
}

/// Whether a `LengthLimitError` sits anywhere in the source chain. The limit
/// error reaches multipart parsing wrapped in the stream error.
fn exceeds_body_limit(e: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(e);
    while let Some(err) = current {
        if err.is::<LengthLimitError>() {
            return true;
        }
        current = err.source();
    }
    false
}
