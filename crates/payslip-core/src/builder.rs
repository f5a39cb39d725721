//! Turns an extraction into a persistable record.

use tracing::warn;
use uuid::Uuid;

use crate::extraction::{EMPLOYMENT_TYPE, ExtractionResult, FieldValue, NET_PAY};
use crate::models::{NewPayslipRecord, SubmitterId};

/// Builds records from extraction results.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordBuilder;

impl RecordBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a record with a fresh id. Absent fields stay absent.
    pub fn build(&self, result: &ExtractionResult, submitter: SubmitterId) -> NewPayslipRecord {
        let net_pay = match result.get(NET_PAY) {
            Some(FieldValue::Amount(amount)) => Some(*amount),
            Some(other) => {
                warn!("Field {} is not an amount ({:?}), leaving it empty", NET_PAY, other);
                None
            }
            None => None,
        };

        let employment_type = match result.get(EMPLOYMENT_TYPE) {
            Some(FieldValue::Text(text)) => Some(text.clone()),
            Some(other) => {
                warn!("Field {} is not text ({:?}), leaving it empty", EMPLOYMENT_TYPE, other);
                None
            }
            None => None,
        };

        NewPayslipRecord {
            id: Uuid::new_v4(),
            user_id: submitter,
            net_pay,
            employment_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{FieldIssue, FieldSchema};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_build_from_payslip_text() {
        let text = "Employee: Jane Doe\nNet Pay: $2,500.00\nEmployment Type: Contractor\n";
        let result = FieldSchema::payslip().extract(text);

        let record = RecordBuilder::new().build(&result, SubmitterId::new(42));

        assert_eq!(record.user_id, SubmitterId::new(42));
        assert_eq!(record.net_pay, Some(Decimal::from_str("2500.00").unwrap()));
        assert_eq!(record.employment_type.as_deref(), Some("Contractor"));
        assert!(!record.id.is_nil());
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let mut result = ExtractionResult::new();
        result.insert_absent(NET_PAY, FieldIssue::LabelMissing);

        let record = RecordBuilder::new().build(&result, SubmitterId::new(1));

        assert_eq!(record.net_pay, None);
        assert_eq!(record.employment_type, None);
    }

    #[test]
    fn test_wrong_kind_is_absent() {
        let mut result = ExtractionResult::new();
        result.insert_found(NET_PAY, FieldValue::Text("2500".to_string()));
        result.insert_found(EMPLOYMENT_TYPE, FieldValue::Amount(Decimal::ONE));

        let record = RecordBuilder::new().build(&result, SubmitterId::new(1));

        assert_eq!(record.net_pay, None);
        assert_eq!(record.employment_type, None);
    }

    #[test]
    fn test_each_build_gets_a_fresh_id() {
        let result = FieldSchema::payslip().extract("Net Pay: $1.00");
        let builder = RecordBuilder::new();

        let a = builder.build(&result, SubmitterId::new(5));
        let b = builder.build(&result, SubmitterId::new(5));

        assert_ne!(a.id, b.id);
        assert_eq!(a.net_pay, b.net_pay);
    }
}
