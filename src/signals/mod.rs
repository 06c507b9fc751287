//! Aggregation of fetched reports into dashboard views.

pub mod trend;

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::report::{AdverseEventReport, DrugRole};

pub use trend::{trend_by_day, trend_by_day_until, TrendPoint, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};

/// Rows kept by [`top_drugs`].
pub const TOP_N: usize = 10;

/// Rows shown in the recent-reports table of the search view.
pub const RECENT_N: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugCount {
    pub drug_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleCount {
    pub role: DrugRole,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

/// Most reported drugs, count descending then name ascending, at most [`TOP_N`].
pub fn top_drugs(reports: &[AdverseEventReport]) -> Vec<DrugCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for report in reports {
        *counts.entry(report.drug_name.as_str()).or_insert(0) += 1;
    }
    let mut rows: Vec<DrugCount> = counts
        .into_iter()
        .map(|(drug_name, count)| DrugCount {
            drug_name: drug_name.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.drug_name.cmp(&b.drug_name))
    });
    rows.truncate(TOP_N);
    rows
}

/// Counts per attributed role; zero rows omitted.
pub fn role_breakdown(reports: &[AdverseEventReport]) -> Vec<RoleCount> {
    let mut rows: Vec<RoleCount> = DrugRole::ALL
        .iter()
        .map(|&role| RoleCount {
            role,
            count: reports.iter().filter(|r| r.role == role).count() as u64,
        })
        .filter(|row| row.count > 0)
        .collect();
    // stable sort keeps DrugRole::ALL order on ties
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

pub fn date_span(reports: &[AdverseEventReport]) -> Option<DateSpan> {
    let first = reports.iter().map(|r| r.report_date).min()?;
    let last = reports.iter().map(|r| r.report_date).max()?;
    Some(DateSpan { first, last })
}

/// Newest reports first, at most `n`.
pub fn recent_reports(reports: &[AdverseEventReport], n: usize) -> Vec<&AdverseEventReport> {
    let mut sorted: Vec<&AdverseEventReport> = reports.iter().collect();
    sorted.sort_by(|a, b| b.report_date.cmp(&a.report_date));
    sorted.truncate(n);
    sorted
}
