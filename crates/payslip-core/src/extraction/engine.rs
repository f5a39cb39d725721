//! Schema-driven field extraction.

use std::collections::HashSet;

use regex::Regex;
use tracing::{debug, trace};

use super::result::{ExtractionResult, FieldIssue, FieldValue};
use super::rules::{CurrencyParser, DateParser, TextLineParser, ValueParser, line_value};
use super::spec::{FieldKind, FieldSpec};
use crate::error::SchemaError;

/// A field spec with its label pattern compiled.
#[derive(Debug, Clone)]
struct CompiledField {
    spec: FieldSpec,
    label: Regex,
}

impl CompiledField {
    fn compile(spec: FieldSpec) -> Result<Self, SchemaError> {
        if spec.name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }
        let label = spec.label.trim();
        if label.is_empty() {
            return Err(SchemaError::EmptyLabel(spec.name.clone()));
        }

        // Word boundary only means something before a word character
        let boundary = if label.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            r"\b"
        } else {
            ""
        };
        let pattern = format!("{}{}:", boundary, regex::escape(label));
        let label = Regex::new(&pattern).map_err(|e| SchemaError::InvalidLabel {
            field: spec.name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self { spec, label })
    }

    /// Read this field from `text`, using the first label occurrence only.
    fn extract(&self, text: &str) -> Result<FieldValue, FieldIssue> {
        let label = self.label.find(text).ok_or(FieldIssue::LabelMissing)?;
        let rest = &text[label.end()..];

        trace!("Field {} label found at {}", self.spec.name, label.start());

        let value = match self.spec.kind {
            FieldKind::Currency => CurrencyParser::new().parse(rest).map(FieldValue::Amount),
            FieldKind::TextLine => TextLineParser::new().parse(rest).map(FieldValue::Text),
            FieldKind::Date => DateParser::new().parse(rest).map(FieldValue::Date),
        };

        value.ok_or_else(|| {
            if line_value(rest).is_empty() {
                FieldIssue::EmptyValue
            } else {
                FieldIssue::MalformedValue
            }
        })
    }
}

/// A compiled, reusable set of field specs.
///
/// Compile once and share; extraction itself holds no state.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    fields: Vec<CompiledField>,
}

impl FieldSchema {
    /// Compile a spec set. Names must be unique and labels non-empty.
    pub fn compile(specs: impl IntoIterator<Item = FieldSpec>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        let mut fields = Vec::new();

        for spec in specs {
            if !seen.insert(spec.name.clone()) {
                return Err(SchemaError::DuplicateField(spec.name));
            }
            fields.push(CompiledField::compile(spec)?);
        }

        Ok(Self { fields })
    }

    /// Schema for the default payslip fields.
    pub fn payslip() -> Self {
        let fields = FieldSpec::payslip_defaults()
            .into_iter()
            .filter_map(|spec| CompiledField::compile(spec).ok())
            .collect();
        Self { fields }
    }

    /// The specs this schema was compiled from, in order.
    pub fn specs(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().map(|f| &f.spec)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Extract every field from `text`. Each field is independent; a missing
    /// or malformed one is recorded as absent and never stops the others.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let mut result = ExtractionResult::new();

        for field in &self.fields {
            match field.extract(text) {
                Ok(value) => result.insert_found(field.spec.name.clone(), value),
                Err(issue) => {
                    debug!("Field {} not found: {:?}", field.spec.name, issue);
                    result.insert_absent(field.spec.name.clone(), issue);
                }
            }
        }

        debug!(
            "Extracted {}/{} fields from {} chars",
            result.found_count(),
            self.fields.len(),
            text.len()
        );

        result
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::payslip()
    }
}

/// Extract fields from text with an ad hoc spec set.
pub fn extract_fields(text: &str, specs: &[FieldSpec]) -> Result<ExtractionResult, SchemaError> {
    Ok(FieldSchema::compile(specs.iter().cloned())?.extract(text))
}
