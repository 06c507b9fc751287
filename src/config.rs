//! Runtime configuration utilities for fda-dash.

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::data::openfda::{DEFAULT_BASE_URL, MAX_LIMIT};

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// openFDA adverse-event endpoint.
    pub base_url: String,
    /// Optional openFDA API key, raises the daily quota.
    pub api_key: Option<String>,
    /// Optional sort expression, e.g. `receiptdate:desc`.
    pub sort: Option<String>,
    /// Records requested per fetch (capped at 100).
    pub default_limit: usize,
    /// Trailing window for the per-day trend.
    pub window_days: i64,
    /// Outbound request timeout in seconds.
    pub http_timeout_secs: u64,
    /// Root folder for CSV exports.
    pub outputs_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            sort: None,
            default_limit: MAX_LIMIT,
            window_days: 180,
            http_timeout_secs: 30,
            outputs_dir: PathBuf::from("./outputs"),
        }
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        let base_url = env::var("OPENFDA_BASE_URL").unwrap_or(defaults.base_url);
        let api_key = env::var("OPENFDA_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let sort = env::var("OPENFDA_SORT")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let default_limit = env::var("DEFAULT_LIMIT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|v| v.clamp(1, MAX_LIMIT))
            .unwrap_or(defaults.default_limit);
        let window_days = env::var("TREND_WINDOW_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.window_days);
        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.http_timeout_secs);
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.outputs_dir);

        Ok(Self {
            base_url,
            api_key,
            sort,
            default_limit,
            window_days,
            http_timeout_secs,
            outputs_dir,
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Resolve an export path; absolute paths are kept as given.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.outputs_dir.join(path)
        }
    }
}
