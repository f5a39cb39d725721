//! SQLite storage for payslip records.
//!
//! Implements [`PayslipStore`] on top of a single SQLite connection.
//!
//! # Examples
//!
//! ```no_run
//! use payslip_store::SqliteStore;
//!
//! let store = SqliteStore::new("payslips.db").unwrap();
//! ```

#![warn(missing_docs)]

use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use payslip_core::{NewPayslipRecord, PayslipRecord, PayslipStore, StorageError, SubmitterId};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored row could not be decoded
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A record with this id already exists
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// The connection lock was poisoned by a panicking writer
    #[error("Connection lock poisoned")]
    Poisoned,
}

impl From<StoreError> for StorageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidData(msg) => StorageError::InvalidData(msg),
            StoreError::Duplicate(id) => StorageError::Duplicate(id),
            other => StorageError::Unavailable(other.to_string()),
        }
    }
}

/// Raw column values of one `payslips` row.
type Row = (String, i64, Option<String>, Option<String>, String);

/// SQLite-based implementation of [`PayslipStore`]
///
/// The connection sits behind a mutex, so one store can be shared between
/// request handlers.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a fresh in-memory database.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.lock()?.execute_batch(schema)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn insert(&self, record: NewPayslipRecord) -> Result<PayslipRecord, StoreError> {
        let conn = self.lock()?;
        let id = record.id.to_string();

        let exists = conn
            .query_row("SELECT 1 FROM payslips WHERE id = ?1", params![&id], |_| Ok(true))
            .optional()?
            .unwrap_or(false);
        if exists {
            return Err(StoreError::Duplicate(id));
        }

        // Stored text carries microseconds only
        let created_at = Utc::now().trunc_subsecs(6);

        conn.execute(
            "INSERT INTO payslips (id, user_id, net_pay, employment_type, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &id,
                record.user_id.get(),
                record.net_pay.map(|d| d.to_string()),
                &record.employment_type,
                created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;

        debug!("Inserted payslip {} for submitter {}", id, record.user_id);
        Ok(record.stored_at(created_at))
    }

    fn select_by_submitter(&self, submitter: SubmitterId) -> Result<Vec<PayslipRecord>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, net_pay, employment_type, created_at
             FROM payslips WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC",
        )?;

        let rows = stmt
            .query_map(params![submitter.get()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })?
            .collect::<Result<Vec<Row>, _>>()?;

        rows.into_iter().map(Self::decode).collect()
    }

    fn decode((id, user_id, net_pay, employment_type, created_at): Row) -> Result<PayslipRecord, StoreError> {
        let id = Uuid::parse_str(&id).map_err(|e| StoreError::InvalidData(format!("id {:?}: {}", id, e)))?;

        let net_pay = net_pay
            .map(|s| Decimal::from_str(&s).map_err(|e| StoreError::InvalidData(format!("net_pay {:?}: {}", s, e))))
            .transpose()?;

        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| StoreError::InvalidData(format!("created_at {:?}: {}", created_at, e)))?
            .with_timezone(&Utc);

        Ok(PayslipRecord {
            id,
            user_id: SubmitterId::new(user_id),
            net_pay,
            employment_type,
            created_at,
        })
    }
}

impl PayslipStore for SqliteStore {
    fn save(&self, record: NewPayslipRecord) -> Result<PayslipRecord, StorageError> {
        Ok(self.insert(record)?)
    }

    fn list_by_submitter(&self, submitter: SubmitterId) -> Result<Vec<PayslipRecord>, StorageError> {
        Ok(self.select_by_submitter(submitter)?)
    }
}
