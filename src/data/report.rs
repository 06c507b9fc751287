//! Adverse-event report model produced by the openFDA client.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// FAERS `drugcharacterization` of a drug within one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrugRole {
    PrimarySuspect,
    SecondarySuspect,
    Concomitant,
    Unknown,
}

impl DrugRole {
    pub const ALL: [DrugRole; 4] = [
        DrugRole::PrimarySuspect,
        DrugRole::SecondarySuspect,
        DrugRole::Concomitant,
        DrugRole::Unknown,
    ];

    /// Map the raw openFDA code; anything unrecognised is `Unknown`.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("1") => Self::PrimarySuspect,
            Some("2") => Self::SecondarySuspect,
            Some("3") => Self::Concomitant,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PrimarySuspect => "Primary suspect",
            Self::SecondarySuspect => "Secondary suspect",
            Self::Concomitant => "Concomitant",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DrugRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugEntry {
    pub name: String,
    pub role: DrugRole,
}

/// One openFDA result record, attributed to a single drug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdverseEventReport {
    pub report_id: Option<String>,
    pub drug_name: String,
    pub role: DrugRole,
    pub report_date: NaiveDate,
    pub reaction_terms: Vec<String>,
    pub drugs: Vec<DrugEntry>,
}

impl AdverseEventReport {
    /// Minimal constructor for callers that only know name and date.
    pub fn new(drug_name: impl Into<String>, report_date: NaiveDate) -> Self {
        Self {
            report_id: None,
            drug_name: drug_name.into(),
            role: DrugRole::Unknown,
            report_date,
            reaction_terms: Vec::new(),
            drugs: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: DrugRole) -> Self {
        self.role = role;
        self
    }
}
