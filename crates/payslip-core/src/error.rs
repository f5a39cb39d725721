//! Error types for the payslip-core library.

use thiserror::Error;

/// Main error type for the payslip library.
#[derive(Error, Debug)]
pub enum PayslipError {
    /// The uploaded bytes are not a usable PDF.
    #[error("invalid document: {0}")]
    InvalidDocument(#[from] DocumentError),

    /// The storage backend could not complete a save or query.
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    /// Submitter identifier missing or not an integer.
    #[error("invalid submitter identity: {0}")]
    InvalidSubmitter(String),

    /// A field spec set could not be compiled.
    #[error("invalid field schema: {0}")]
    Schema(#[from] SchemaError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to turning document bytes into text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to open/parse the PDF.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The PDF parsed but carries no extractable text.
    #[error("no text could be extracted from the PDF")]
    NoText,
}

/// Errors reported by a storage gateway.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend could not be reached or the operation failed.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be decoded into a record.
    #[error("invalid stored data: {0}")]
    InvalidData(String),

    /// A record with the same identity already exists.
    #[error("duplicate record id: {0}")]
    Duplicate(String),
}

/// Errors raised while compiling a set of field specs.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// A field has an empty name.
    #[error("field name must not be empty")]
    EmptyName,

    /// A field has an empty label.
    #[error("field {0} has an empty label")]
    EmptyLabel(String),

    /// A label could not be turned into a pattern.
    #[error("field {field} has an unusable label: {reason}")]
    InvalidLabel { field: String, reason: String },

    /// Two fields share a name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),
}

/// Result type for the payslip library.
pub type Result<T> = std::result::Result<T, PayslipError>;

impl PayslipError {
    /// Short machine-readable name of the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDocument(_) => "InvalidDocument",
            Self::Storage(_) => "StorageFailure",
            Self::InvalidSubmitter(_) => "InvalidSubmitterIdentity",
            Self::Schema(_) => "SchemaError",
            Self::Config(_) => "ConfigError",
            Self::Io(_) => "IoError",
        }
    }
}
