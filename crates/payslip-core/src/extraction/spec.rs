//! Declarative field specifications.

use serde::{Deserialize, Serialize};

/// Field name of the net pay amount.
pub const NET_PAY: &str = "net_pay";

/// Field name of the employment type line.
pub const EMPLOYMENT_TYPE: &str = "employment_type";

/// Kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Currency amount with two decimals, e.g. `$1,234.56`.
    Currency,
    /// First non-blank line after the label.
    TextLine,
    /// Calendar date, read like a text line.
    Date,
}

/// One extractable field: where to find it and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Key under which the value is reported.
    pub name: String,
    /// Literal label text preceding the colon, e.g. `Net Pay`.
    pub label: String,
    /// Value type.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Create a new field spec.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
        }
    }

    /// Currency field shorthand.
    pub fn currency(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Currency)
    }

    /// Text line field shorthand.
    pub fn text_line(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::TextLine)
    }

    /// Date field shorthand.
    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    /// The two fields every payslip record carries.
    pub fn payslip_defaults() -> Vec<FieldSpec> {
        vec![
            Self::currency(NET_PAY, "Net Pay"),
            Self::text_line(EMPLOYMENT_TYPE, "Employment Type"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let specs = FieldSpec::payslip_defaults();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0], FieldSpec::currency("net_pay", "Net Pay"));
        assert_eq!(specs[1].kind, FieldKind::TextLine);
    }

    #[test]
    fn test_spec_deserializes_from_config() {
        let spec: FieldSpec =
            serde_json::from_str(r#"{"name": "gross_pay", "label": "Gross Pay", "kind": "currency"}"#).unwrap();
        assert_eq!(spec, FieldSpec::currency("gross_pay", "Gross Pay"));

        let spec: FieldSpec =
            serde_json::from_str(r#"{"name": "pay_date", "label": "Pay Date", "kind": "date"}"#).unwrap();
        assert_eq!(spec.kind, FieldKind::Date);
    }
}
