//! Record storage gateway.

mod memory;

pub use memory::MemoryStore;

use crate::error::StorageError;
use crate::models::{NewPayslipRecord, PayslipRecord, SubmitterId};

/// Persists payslip records and answers submitter-scoped queries.
///
/// A store assigns `created_at` when saving. Reads after a successful save
/// must see the record.
pub trait PayslipStore: Send + Sync {
    /// Persist one record and return it as stored.
    fn save(&self, record: NewPayslipRecord) -> Result<PayslipRecord, StorageError>;

    /// Every record of a submitter, newest first. No records is an empty
    /// vector, not an error.
    fn list_by_submitter(&self, submitter: SubmitterId) -> Result<Vec<PayslipRecord>, StorageError>;
}
