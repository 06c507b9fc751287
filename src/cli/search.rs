//! CLI entry-point for searching reports by drug.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    api::types::{RecentReportDto, SearchView},
    config::Settings,
    data::openfda::OpenFdaClient,
    signals::{self, RECENT_N},
};

/// Args for the `search` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Drug name, matched case-insensitively against medicinalproduct.
    #[arg(long, default_value = "IBUPROFEN")]
    pub drug: String,
    /// Records to request from openFDA (capped at 100).
    #[arg(long)]
    pub limit: Option<usize>,
    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = OpenFdaClient::new(&settings)?;
    let limit = args.limit.unwrap_or(settings.default_limit);
    let reports = client
        .fetch_reports(Some(&args.drug), limit)
        .await
        .with_context(|| format!("search reports for {}", args.drug))?;

    let view = SearchView {
        drug: args.drug.trim().to_string(),
        total: reports.len(),
        span: signals::date_span(&reports),
        roles: signals::role_breakdown(&reports),
        recent: signals::recent_reports(&reports, RECENT_N)
            .into_iter()
            .map(RecentReportDto::from)
            .collect(),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let Some(span) = view.span else {
        println!("No reports found for {}.", view.drug);
        return Ok(());
    };
    println!("Found {} adverse-event reports for {}.", view.total, view.drug);
    println!("These reports span from {} to {}.", span.first, span.last);
    println!();
    println!("Report role breakdown:");
    for row in &view.roles {
        println!("  {:<20} {:>5}", row.role.label(), row.count);
    }
    println!();
    println!("Recent reports:");
    for row in &view.recent {
        println!("  {}  {:<40} {}", row.date, row.drug, row.role_label);
    }
    Ok(())
}
