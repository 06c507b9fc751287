//! Command-line interface wiring for fda-dash.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;

use crate::{config::Settings, data};

pub mod roles;
pub mod search;
pub mod serve;
pub mod top;
pub mod trend;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "openFDA drug safety dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Top(args) => top::run(args, settings).await,
            Commands::Search(args) => search::run(args, settings).await,
            Commands::Roles(args) => roles::run(args, settings).await,
            Commands::Trend(args) => trend::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Top 10 drugs across the most recent reports.
    Top(top::Args),
    /// Reports listing one drug: span, role breakdown, recent rows.
    Search(search::Args),
    /// Role distribution for one drug.
    Roles(roles::Args),
    /// Per-day report counts over a trailing window.
    Trend(trend::Args),
    /// Serve the JSON API.
    Serve(serve::Args),
}

/// Output flags shared by the view commands.
#[derive(Debug, Clone, ClapArgs)]
pub struct OutputArgs {
    /// Records to request from openFDA (capped at 100).
    #[arg(long)]
    pub limit: Option<usize>,
    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
    /// Also write the rows as CSV; relative paths land under OUTPUTS_DIR.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl OutputArgs {
    pub fn limit(&self, settings: &Settings) -> usize {
        self.limit.unwrap_or(settings.default_limit)
    }

    /// Write the CSV export if requested, then print JSON when `--json` is set.
    /// Returns `true` when JSON was printed and the table should be skipped.
    pub fn emit<T: Serialize>(&self, settings: &Settings, rows: &[T]) -> Result<bool> {
        if let Some(path) = &self.csv {
            data::export::write_csv(&settings.join_output(path), rows)?;
        }
        if self.json {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
        Ok(self.json)
    }
}
