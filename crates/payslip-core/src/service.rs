//! Payslip processing pipeline.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::builder::RecordBuilder;
use crate::error::Result;
use crate::extraction::{ExtractionResult, FieldSchema};
use crate::models::{PayslipRecord, SubmitterId};
use crate::pdf::{PdfTextExtractor, TextExtractor};
use crate::store::PayslipStore;

/// Fields read from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Number of pages the text came from.
    pub page_count: u32,
    /// Field values and diagnostics.
    pub result: ExtractionResult,
}

/// A stored record together with the extraction that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedPayslip {
    pub record: PayslipRecord,
    pub extraction: Extraction,
}

/// Extract, build and store payslip records.
///
/// The service is stateless apart from the injected store and can be shared
/// across threads.
#[derive(Clone)]
pub struct PayslipService {
    store: Arc<dyn PayslipStore>,
    schema: FieldSchema,
    extractor: Arc<dyn TextExtractor>,
    builder: RecordBuilder,
}

impl PayslipService {
    /// Create a service with the default payslip fields.
    pub fn new(store: Arc<dyn PayslipStore>) -> Self {
        Self {
            store,
            schema: FieldSchema::payslip(),
            extractor: Arc::new(PdfTextExtractor::new()),
            builder: RecordBuilder::new(),
        }
    }

    /// Use a different field schema.
    pub fn with_schema(mut self, schema: FieldSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Use a different text extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// The compiled field schema.
    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Read the configured fields from a PDF without storing anything.
    pub fn extract(&self, document: &[u8]) -> Result<Extraction> {
        debug!("Extracting text from {} byte document", document.len());
        let text = self.extractor.extract(document)?;

        let result = self.schema.extract(text.as_str());
        for diagnostic in result.diagnostics() {
            warn!("Field {} absent: {:?}", diagnostic.field, diagnostic.issue);
        }

        info!(
            "Extracted {}/{} fields from {} page(s)",
            result.found_count(),
            self.schema.len(),
            text.page_count()
        );

        Ok(Extraction {
            page_count: text.page_count(),
            result,
        })
    }

    /// Extract a PDF, build a record for `submitter` and store it.
    pub fn process(&self, document: &[u8], submitter: SubmitterId) -> Result<ProcessedPayslip> {
        let extraction = self.extract(document)?;
        let record = self.builder.build(&extraction.result, submitter);
        let record = self.store.save(record)?;

        info!("Stored payslip {} for submitter {}", record.id, submitter);

        Ok(ProcessedPayslip { record, extraction })
    }

    /// Stored records of a submitter, newest first.
    pub fn history(&self, submitter: SubmitterId) -> Result<Vec<PayslipRecord>> {
        let records = self.store.list_by_submitter(submitter)?;
        debug!("Found {} record(s) for submitter {}", records.len(), submitter);
        Ok(records)
    }
}
