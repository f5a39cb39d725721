//! Serve command - run the HTTP API.

use std::path::{Path, PathBuf};

use clap::Args;
use payslip_api::ApiLimits;
use tracing::info;

use super::{load_config, sqlite_service};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (default from config: 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (default from config: 5000)
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,
}

pub async fn run(args: ServeArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let database = args.database.unwrap_or_else(|| config.storage.database_path.clone());

    let service = sqlite_service(&config, &database)?;
    info!(
        "Using database {} with {} field(s)",
        database.display(),
        service.schema().len()
    );

    payslip_api::serve(host, port, service, ApiLimits::new(config.server.max_upload_bytes)).await?;

    Ok(())
}
