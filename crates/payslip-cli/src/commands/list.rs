//! List command - show stored payslips of a submitter.

use std::path::{Path, PathBuf};

use chrono::SecondsFormat;
use clap::Args;
use console::style;
use payslip_core::extraction::rules::format_currency;
use payslip_core::{PayslipRecord, SubmitterId};

use super::{load_config, sqlite_service};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Submitter whose payslips to list
    #[arg(short, long, required = true)]
    user_id: SubmitterId,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ListArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let database = args
        .database
        .unwrap_or_else(|| config.storage.database_path.clone());

    let service = sqlite_service(&config, &database)?;
    let records = service.history(args.user_id)?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&records)?,
        OutputFormat::Csv => format_csv(&records)?,
        OutputFormat::Text => format_text(args.user_id, &records),
    };

    print!("{}", output);

    Ok(())
}

fn format_csv(records: &[PayslipRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["id", "user_id", "net_pay", "employment_type", "created_at"])?;

    for record in records {
        wtr.write_record([
            &record.id.to_string(),
            &record.user_id.to_string(),
            &record.net_pay.map(|d| d.to_string()).unwrap_or_default(),
            &record.employment_type.clone().unwrap_or_default(),
            &record.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(submitter: SubmitterId, records: &[PayslipRecord]) -> String {
    if records.is_empty() {
        return format!("{} No payslips stored for submitter {}\n", style("ℹ").blue(), submitter);
    }

    let mut output = format!("Payslips for submitter {} ({}):\n\n", submitter, records.len());

    for record in records {
        output.push_str(&format!("{}  {}\n", record.created_at.format("%Y-%m-%d %H:%M:%S"), record.id));
        output.push_str(&format!(
            "  Net Pay: {}\n",
            record.net_pay.map(format_currency).unwrap_or_else(|| "-".to_string())
        ));
        output.push_str(&format!(
            "  Employment Type: {}\n",
            record.employment_type.as_deref().unwrap_or("-")
        ));
    }

    output
}
