//! CLI entry-point for the top-drugs view.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{cli::OutputArgs, config::Settings, data::openfda::OpenFdaClient, signals};

/// Args for the `top` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub output: OutputArgs,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = OpenFdaClient::new(&settings)?;
    let limit = args.output.limit(&settings);
    let reports = client
        .fetch_reports(None, limit)
        .await
        .context("fetch recent adverse-event reports")?;
    let top = signals::top_drugs(&reports);
    info!(sample = reports.len(), rows = top.len(), "computed top drugs");

    if args.output.emit(&settings, &top)? {
        return Ok(());
    }
    if top.is_empty() {
        println!("No data available. Try again shortly.");
        return Ok(());
    }
    println!("Top reported drugs (last {} reports)", reports.len());
    for (rank, row) in top.iter().enumerate() {
        println!("{:>2}. {:<40} {:>5}", rank + 1, row.drug_name, row.count);
    }
    Ok(())
}
