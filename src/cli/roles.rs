//! CLI entry-point for the role distribution of one drug.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{cli::OutputArgs, config::Settings, data::openfda::OpenFdaClient, signals};

/// Args for the `roles` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Drug name, matched case-insensitively against medicinalproduct.
    #[arg(long, default_value = "IBUPROFEN")]
    pub drug: String,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = OpenFdaClient::new(&settings)?;
    let reports = client
        .fetch_reports(Some(&args.drug), args.output.limit(&settings))
        .await
        .with_context(|| format!("fetch reports for {}", args.drug))?;
    let roles = signals::role_breakdown(&reports);

    if args.output.emit(&settings, &roles)? {
        return Ok(());
    }
    if roles.is_empty() {
        println!("No reports found for {}.", args.drug.trim());
        return Ok(());
    }
    println!("Role distribution for {}:", args.drug.trim());
    for row in &roles {
        println!("  {:<20} {:>5}", row.role.label(), row.count);
    }
    Ok(())
}
