//! Payslip record data structures.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::PayslipError;

/// Identifier of the user who submitted a payslip.
///
/// Accepted from text (`"42"`) or a JSON number; anything that is not an
/// integer is an invalid submitter identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SubmitterId(i64);

impl SubmitterId {
    /// Create a new submitter id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for SubmitterId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for SubmitterId {
    type Err = PayslipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PayslipError::InvalidSubmitter("user_id is required".to_string()));
        }
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| PayslipError::InvalidSubmitter(format!("user_id must be an integer, got {:?}", s)))
    }
}

impl fmt::Display for SubmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for SubmitterId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// A record built from an extraction, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayslipRecord {
    /// Unique record identity.
    pub id: Uuid,
    /// Who submitted the payslip.
    pub user_id: SubmitterId,
    /// Net pay, absent when not found.
    pub net_pay: Option<Decimal>,
    /// Employment type, absent when not found.
    pub employment_type: Option<String>,
}

impl NewPayslipRecord {
    /// Attach the storage timestamp.
    pub fn stored_at(self, created_at: DateTime<Utc>) -> PayslipRecord {
        PayslipRecord {
            id: self.id,
            user_id: self.user_id,
            net_pay: self.net_pay,
            employment_type: self.employment_type,
            created_at,
        }
    }
}

/// A persisted payslip record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipRecord {
    pub id: Uuid,
    pub user_id: SubmitterId,
    pub net_pay: Option<Decimal>,
    pub employment_type: Option<String>,
    /// Assigned by the store when the record is saved.
    pub created_at: DateTime<Utc>,
}
