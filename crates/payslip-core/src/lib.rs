//! Core library for payslip processing.
//!
//! This crate provides:
//! - PDF text extraction (page-ordered, lopdf with a pdf-extract fallback)
//! - Schema-driven field extraction (net pay, employment type, extra labels)
//! - Record building and the storage gateway trait
//! - The processing service tying them together

pub mod builder;
pub mod error;
pub mod extraction;
pub mod models;
pub mod pdf;
pub mod service;
pub mod store;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use builder::RecordBuilder;
pub use error::{DocumentError, PayslipError, Result, SchemaError, StorageError};
pub use extraction::{
    EMPLOYMENT_TYPE, ExtractionResult, FieldDiagnostic, FieldIssue, FieldKind, FieldSchema, FieldSpec, FieldValue,
    NET_PAY, extract_fields,
};
pub use models::{NewPayslipRecord, PayslipConfig, PayslipRecord, SubmitterId};
pub use pdf::{ExtractedText, PdfTextExtractor, TextExtractor};
pub use service::{Extraction, PayslipService, ProcessedPayslip};
pub use store::{MemoryStore, PayslipStore};
