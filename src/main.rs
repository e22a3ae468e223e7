//! Prints the charts page and the carrier report for the configured record
//! file as JSON.
//!
//! Usage: `freight-desk [UF] [--records PATH]`. See `--help`.

use clap::Parser;
use serde::Serialize;
use std::sync::Arc;

use freight_desk::adapters::JsonFileFreightRepository;
use freight_desk::application::{
    GetChartsHandler, GetChartsQuery, GetFreightReportHandler, GetFreightReportQuery,
};
use freight_desk::config::AppConfig;
use freight_desk::domain::reporting::{ChartsDashboard, FreightReport};
use freight_desk::ports::FreightRepository;

mod cli;

use crate::cli::Cli;

#[derive(Serialize)]
struct Output<'a> {
    charts: &'a ChartsDashboard,
    report: &'a FreightReport,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(path) = cli.records_path {
        config.storage.records_path = path;
    }
    config.validate()?;
    config.logging.init_tracing()?;

    let state = cli.state;

    let repository: Arc<dyn FreightRepository> =
        Arc::new(JsonFileFreightRepository::new(&config.storage.records_path));
    tracing::info!(
        records_path = %config.storage.records_path.display(),
        state = ?state,
        "Building reports"
    );

    let charts = GetChartsHandler::new(repository.clone())
        .handle(GetChartsQuery)
        .await?;
    let report = GetFreightReportHandler::new(repository)
        .handle(GetFreightReportQuery { state })
        .await?;

    let output = Output {
        charts: &charts,
        report: &report,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
