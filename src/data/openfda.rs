//! openFDA adverse-event client.

use std::fmt;

use chrono::{NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use urlencoding::encode;

use crate::{
    config::Settings,
    data::report::{AdverseEventReport, DrugEntry, DrugRole},
    error::{DashError, DashResult},
};

pub const DEFAULT_BASE_URL: &str = "https://api.fda.gov/drug/event.json";

/// Page-size ceiling enforced on every request.
pub const MAX_LIMIT: usize = 100;

const RECEIPT_DATE_FORMAT: &str = "%Y%m%d";

/// Thin wrapper around a reqwest client bound to one openFDA endpoint.
#[derive(Debug, Clone)]
pub struct OpenFdaClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    sort: Option<String>,
}

impl OpenFdaClient {
    pub fn new(settings: &Settings) -> DashResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("fda-dash/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.http_timeout())
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            sort: settings.sort.clone(),
        })
    }

    /// Fetch up to `limit` reports, optionally restricted to one drug name.
    ///
    /// A 404 is openFDA's answer to a search with no matches and yields an
    /// empty vector.
    #[instrument(skip(self))]
    pub async fn fetch_reports(
        &self,
        query: Option<&str>,
        limit: usize,
    ) -> DashResult<Vec<AdverseEventReport>> {
        let url = self.request_url(query, limit)?;
        info!(%url, "querying openFDA");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| DashError::fetch(None, err.to_string()))?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            info!("openFDA reported no matching records");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            warn!(%status, "openFDA request failed");
            let message = if detail.trim().is_empty() {
                status.to_string()
            } else {
                format!("{status}: {}", detail.trim())
            };
            return Err(DashError::fetch(Some(status.as_u16()), message));
        }

        let body = resp.text().await?;
        let today = Utc::now().date_naive();
        let mut reports = parse_reports(&body, query, today)?;
        let cap = limit.min(MAX_LIMIT);
        if reports.len() > cap {
            warn!(count = reports.len(), cap, "openFDA returned more records than requested");
            reports.truncate(cap);
        }
        info!(count = reports.len(), "parsed adverse-event reports");
        Ok(reports)
    }

    /// Build the GET url for one fetch. `limit` is capped at [`MAX_LIMIT`].
    pub fn request_url(&self, query: Option<&str>, limit: usize) -> DashResult<String> {
        if limit == 0 {
            return Err(DashError::invalid("limit must be at least 1"));
        }
        let limit = limit.min(MAX_LIMIT);

        let mut params = Vec::new();
        if let Some(term) = query {
            let term = clean_query(term)?;
            let search = format!("patient.drug.medicinalproduct:\"{term}\"");
            params.push(format!("search={}", encode(&search)));
        }
        if let Some(sort) = &self.sort {
            params.push(format!("sort={}", encode(sort)));
        }
        params.push(format!("limit={limit}"));
        if let Some(key) = &self.api_key {
            params.push(format!("api_key={}", encode(key)));
        }
        Ok(format!("{}?{}", self.base_url, params.join("&")))
    }
}

fn clean_query(term: &str) -> DashResult<&str> {
    let term = term.trim();
    if term.is_empty() {
        return Err(DashError::invalid("drug name must not be empty"));
    }
    if term.contains('"') {
        return Err(DashError::invalid("drug name must not contain quotes"));
    }
    Ok(term)
}

/// Map an openFDA response body to reports.
///
/// Records without a named drug or a valid receipt date, or dated after
/// `today`, are skipped. With a `query`, only reports listing that drug
/// (case-insensitive) are kept and attributed to it.
pub fn parse_reports(
    body: &str,
    query: Option<&str>,
    today: NaiveDate,
) -> DashResult<Vec<AdverseEventReport>> {
    if body.trim().is_empty() {
        return Err(DashError::Parse("empty response body".into()));
    }
    let payload: EventResponse = serde_json::from_str(body)?;
    let query = query.map(str::trim).filter(|q| !q.is_empty());

    let mut reports = Vec::with_capacity(payload.results.len());
    for event in payload.results {
        match event.into_report(query, today) {
            Ok(report) => reports.push(report),
            Err(skip) => match skip {
                Skip::NoMatch => debug!("report does not list queried drug"),
                other => warn!(reason = %other, "skipping adverse-event record"),
            },
        }
    }
    Ok(reports)
}

#[derive(Debug)]
enum Skip {
    NoDrug,
    NoMatch,
    BadDate(String),
    FutureDate(NaiveDate),
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDrug => f.write_str("no named drug"),
            Self::NoMatch => f.write_str("queried drug not listed"),
            Self::BadDate(raw) => write!(f, "unparseable receiptdate {raw:?}"),
            Self::FutureDate(date) => write!(f, "receiptdate {date} is in the future"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EventResponse {
    results: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    safetyreportid: Option<String>,
    #[serde(default)]
    receiptdate: Option<String>,
    #[serde(default)]
    patient: Option<RawPatient>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPatient {
    #[serde(default)]
    drug: Vec<RawDrug>,
    #[serde(default)]
    reaction: Vec<RawReaction>,
}

#[derive(Debug, Deserialize)]
struct RawDrug {
    #[serde(default)]
    medicinalproduct: Option<String>,
    #[serde(default)]
    drugcharacterization: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawReaction {
    #[serde(default)]
    reactionmeddrapt: Option<String>,
}

impl RawEvent {
    fn into_report(self, query: Option<&str>, today: NaiveDate) -> Result<AdverseEventReport, Skip> {
        let patient = self.patient.unwrap_or_default();
        let drugs: Vec<DrugEntry> = patient
            .drug
            .into_iter()
            .filter_map(|d| {
                let name = d.medicinalproduct?.trim().to_string();
                if name.is_empty() {
                    return None;
                }
                Some(DrugEntry {
                    name,
                    role: DrugRole::from_code(d.drugcharacterization.as_deref()),
                })
            })
            .collect();
        if drugs.is_empty() {
            return Err(Skip::NoDrug);
        }

        let attributed = match query {
            Some(q) => drugs
                .iter()
                .find(|d| d.name.eq_ignore_ascii_case(q))
                .ok_or(Skip::NoMatch)?,
            None => drugs
                .iter()
                .find(|d| d.role == DrugRole::PrimarySuspect)
                .unwrap_or(&drugs[0]),
        };
        let drug_name = attributed.name.clone();
        let role = attributed.role;

        let raw_date = self.receiptdate.unwrap_or_default();
        let report_date = NaiveDate::parse_from_str(raw_date.trim(), RECEIPT_DATE_FORMAT)
            .map_err(|_| Skip::BadDate(raw_date.clone()))?;
        if report_date > today {
            return Err(Skip::FutureDate(report_date));
        }

        let reaction_terms = patient
            .reaction
            .into_iter()
            .filter_map(|r| r.reactionmeddrapt)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(AdverseEventReport {
            report_id: self.safetyreportid,
            drug_name,
            role,
            report_date,
            reaction_terms,
            drugs,
        })
    }
}
