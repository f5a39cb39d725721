//! Extract command - read payslip fields from a local PDF.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use payslip_api::ExtractResponse;
use payslip_core::extraction::rules::format_currency;
use payslip_core::{Extraction, FieldValue, MemoryStore, PayslipService, SubmitterId};
use serde_json::json;
use tracing::{debug, info};

use super::{load_config, sqlite_service};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Store the record for this submitter
    #[arg(short, long)]
    user_id: Option<SubmitterId>,

    /// SQLite database file (used with --user-id)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());
    let data = fs::read(&args.input)?;

    let output = match args.user_id {
        Some(submitter) => {
            let database = args
                .database
                .clone()
                .unwrap_or_else(|| config.storage.database_path.clone());
            let service = sqlite_service(&config, &database)?;
            let processed = service.process(&data, submitter)?;

            let response = ExtractResponse::from(processed);
            match args.format {
                OutputFormat::Json => serde_json::to_string_pretty(&response)?,
                OutputFormat::Text => {
                    let mut text = format_fields(&response.fields);
                    text.push_str(&format!(
                        "\n{} Stored as {} for submitter {}",
                        style("✓").green(),
                        response.id,
                        response.user_id
                    ));
                    text
                }
            }
        }
        None => {
            let service = PayslipService::new(Arc::new(MemoryStore::new())).with_schema(config.schema()?);
            let extraction = service.extract(&data)?;
            match args.format {
                OutputFormat::Json => format_json(&args.input, &extraction)?,
                OutputFormat::Text => format_fields(extraction.result.fields()),
            }
        }
    };

    println!("{}", output);

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_json(input: &Path, extraction: &Extraction) -> anyhow::Result<String> {
    let value = json!({
        "file": input.display().to_string(),
        "pages": extraction.page_count,
        "fields": extraction.result.fields(),
        "diagnostics": extraction.result.diagnostics(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

fn format_fields<'a>(fields: impl IntoIterator<Item = (&'a String, &'a Option<FieldValue>)>) -> String {
    let mut output = String::new();

    for (name, value) in fields {
        let shown = match value {
            Some(FieldValue::Amount(amount)) => format_currency(*amount),
            Some(FieldValue::Text(text)) => text.clone(),
            Some(FieldValue::Date(date)) => date.to_string(),
            None => style("(not found)").yellow().to_string(),
        };
        output.push_str(&format!("{}: {}\n", name, shown));
    }

    output
}
