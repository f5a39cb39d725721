//! In-process store.

use std::sync::Mutex;

use chrono::Utc;
use tracing::debug;

use super::PayslipStore;
use crate::error::StorageError;
use crate::models::{NewPayslipRecord, PayslipRecord, SubmitterId};

/// Keeps records in memory. Used in tests and by `payslip extract` without a
/// database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<PayslipRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PayslipStore for MemoryStore {
    fn save(&self, record: NewPayslipRecord) -> Result<PayslipRecord, StorageError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| StorageError::Unavailable("record lock poisoned".to_string()))?;

        if records.iter().any(|r| r.id == record.id) {
            return Err(StorageError::Duplicate(record.id.to_string()));
        }

        let stored = record.stored_at(Utc::now());
        debug!("Stored record {} for submitter {}", stored.id, stored.user_id);
        records.push(stored.clone());
        Ok(stored)
    }

    fn list_by_submitter(&self, submitter: SubmitterId) -> Result<Vec<PayslipRecord>, StorageError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StorageError::Unavailable("record lock poisoned".to_string()))?;

        // Reverse insertion order first so the stable sort keeps later inserts
        // ahead on equal timestamps
        let mut found: Vec<PayslipRecord> = records
            .iter()
            .rev()
            .filter(|r| r.user_id == submitter)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }
}
