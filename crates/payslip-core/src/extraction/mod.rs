//! Payslip field extraction module.
//!
//! Fields are declared as [`FieldSpec`]s, compiled once into a
//! [`FieldSchema`] and applied to the text of each document. A field whose
//! label is missing or whose value is malformed is reported as absent.

mod engine;
mod result;
pub mod rules;
mod spec;

pub use engine::{FieldSchema, extract_fields};
pub use result::{ExtractionResult, FieldDiagnostic, FieldIssue, FieldValue};
pub use spec::{EMPLOYMENT_TYPE, FieldKind, FieldSpec, NET_PAY};
