//! Extraction results.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Currency amount.
    Amount(Decimal),
    /// Single line of text.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
}

impl FieldValue {
    /// The amount, if this is a currency value.
    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            Self::Amount(amount) => Some(*amount),
            _ => None,
        }
    }

    /// The text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The date, if this is a date value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }
}

/// Why a field ended up absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldIssue {
    /// The label does not occur in the text.
    LabelMissing,
    /// The label occurs but nothing follows it on its line.
    EmptyValue,
    /// The label occurs but the value does not parse as the field's type.
    MalformedValue,
}

/// Non-fatal note about one absent field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDiagnostic {
    /// Field name.
    pub field: String,
    /// What went wrong.
    pub issue: FieldIssue,
}

/// Mapping from field name to value or explicit absence.
///
/// A missing field is data, not an error: it appears in [`fields`](Self::fields)
/// as `None` and gets a matching entry in [`diagnostics`](Self::diagnostics).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    fields: BTreeMap<String, Option<FieldValue>>,
    diagnostics: Vec<FieldDiagnostic>,
}

impl ExtractionResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a found value.
    pub fn insert_found(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), Some(value));
    }

    /// Record an absent field and the reason.
    pub fn insert_absent(&mut self, name: impl Into<String>, issue: FieldIssue) {
        let name = name.into();
        self.diagnostics.push(FieldDiagnostic {
            field: name.clone(),
            issue,
        });
        self.fields.insert(name, None);
    }

    /// Value of a field. `None` both when absent and when not in the spec set.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).and_then(Option::as_ref)
    }

    /// Whether the spec set contained this field, found or not.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Currency value of a field.
    pub fn amount(&self, name: &str) -> Option<Decimal> {
        self.get(name).and_then(FieldValue::as_amount)
    }

    /// Text value of a field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Date value of a field.
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.get(name).and_then(FieldValue::as_date)
    }

    /// All fields in name order.
    pub fn fields(&self) -> &BTreeMap<String, Option<FieldValue>> {
        &self.fields
    }

    /// Notes for absent fields, in spec order.
    pub fn diagnostics(&self) -> &[FieldDiagnostic] {
        &self.diagnostics
    }

    /// Number of fields that were found.
    pub fn found_count(&self) -> usize {
        self.fields.values().filter(|v| v.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_absent_is_distinct_from_zero() {
        let mut result = ExtractionResult::new();
        result.insert_found("zero", FieldValue::Amount(Decimal::ZERO));
        result.insert_absent("missing", FieldIssue::LabelMissing);

        assert_eq!(result.amount("zero"), Some(Decimal::ZERO));
        assert_eq!(result.amount("missing"), None);
        assert!(result.contains("missing"));
        assert!(!result.contains("unknown"));
        assert_eq!(result.found_count(), 1);
    }

    #[test]
    fn test_typed_accessors_check_kind() {
        let mut result = ExtractionResult::new();
        result.insert_found("net_pay", FieldValue::Text("lots".to_string()));

        assert_eq!(result.amount("net_pay"), None);
        assert_eq!(result.text("net_pay"), Some("lots"));
    }

    #[test]
    fn test_serializes_absent_as_null() {
        let mut result = ExtractionResult::new();
        result.insert_found("net_pay", FieldValue::Amount(Decimal::from_str("2500.00").unwrap()));
        result.insert_absent("employment_type", FieldIssue::EmptyValue);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["fields"]["net_pay"], "2500.00");
        assert!(json["fields"]["employment_type"].is_null());
        assert_eq!(json["diagnostics"][0]["issue"], "empty_value");
    }
}
