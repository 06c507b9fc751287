//! Shared DTOs for JSON responses.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    data::report::{AdverseEventReport, DrugRole},
    signals::{DateSpan, DrugCount, RoleCount},
};

#[derive(Debug, Clone, Serialize)]
pub struct TopDrugsView {
    pub sample_size: usize,
    pub drugs: Vec<DrugCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchView {
    pub drug: String,
    pub total: usize,
    pub span: Option<DateSpan>,
    pub roles: Vec<RoleCount>,
    pub recent: Vec<RecentReportDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentReportDto {
    pub date: NaiveDate,
    pub drug: String,
    pub role: DrugRole,
    pub role_label: &'static str,
}

impl From<&AdverseEventReport> for RecentReportDto {
    fn from(report: &AdverseEventReport) -> Self {
        Self {
            date: report.report_date,
            drug: report.drug_name.clone(),
            role: report.role,
            role_label: report.role.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}
