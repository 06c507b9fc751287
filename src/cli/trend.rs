//! CLI entry-point for the per-day trend view.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{cli::OutputArgs, config::Settings, data::openfda::OpenFdaClient, signals};

/// Args for the `trend` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Restrict to reports listing this drug.
    #[arg(long)]
    pub drug: Option<String>,
    /// Trailing window in days (defaults to TREND_WINDOW_DAYS).
    #[arg(long, allow_negative_numbers = true)]
    pub window_days: Option<i64>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = OpenFdaClient::new(&settings)?;
    let window_days = args.window_days.unwrap_or(settings.window_days);
    let reports = client
        .fetch_reports(args.drug.as_deref(), args.output.limit(&settings))
        .await
        .context("fetch reports for trend")?;
    let points = signals::trend_by_day(&reports, window_days)?;

    if args.output.emit(&settings, &points)? {
        return Ok(());
    }
    let total: u64 = points.iter().map(|p| p.count).sum();
    println!(
        "{total} of {} reports fall in the last {window_days} days",
        reports.len()
    );
    for point in points.iter().filter(|p| p.count > 0) {
        println!("  {}  {:>4} {}", point.date, point.count, "#".repeat(point.count as usize));
    }
    Ok(())
}
