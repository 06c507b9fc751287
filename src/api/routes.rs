//! HTTP route handlers for Axum.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::{
    api::types::{ErrorBody, RecentReportDto, SearchView, TopDrugsView},
    error::DashError,
    signals::{self, RoleCount, TrendPoint, RECENT_N},
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Wraps [`DashError`] so handlers can use `?`.
#[derive(Debug)]
pub struct ApiError(DashError);

impl From<DashError> for ApiError {
    fn from(err: DashError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            DashError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            DashError::Fetch { .. } | DashError::Parse(_) => StatusCode::BAD_GATEWAY,
        };
        warn!(%status, error = %self.0, "request failed");
        let body = ErrorBody {
            error: self.0.kind(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct DrugQuery {
    pub drug: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub drug: Option<String>,
    pub window_days: Option<i64>,
    pub limit: Option<usize>,
}

fn required_drug(drug: Option<String>) -> Result<String, DashError> {
    drug.map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .ok_or_else(|| DashError::invalid("query parameter `drug` is required"))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn top_drugs(
    State(state): State<AppState>,
    Query(query): Query<DrugQuery>,
) -> ApiResult<TopDrugsView> {
    let limit = query.limit.unwrap_or(state.settings.default_limit);
    let reports = state.reports(None, limit).await?;
    Ok(Json(TopDrugsView {
        sample_size: reports.len(),
        drugs: signals::top_drugs(&reports),
    }))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<DrugQuery>,
) -> ApiResult<SearchView> {
    let drug = required_drug(query.drug)?;
    let limit = query.limit.unwrap_or(state.settings.default_limit);
    let reports = state.reports(Some(&drug), limit).await?;
    Ok(Json(SearchView {
        total: reports.len(),
        span: signals::date_span(&reports),
        roles: signals::role_breakdown(&reports),
        recent: signals::recent_reports(&reports, RECENT_N)
            .into_iter()
            .map(RecentReportDto::from)
            .collect(),
        drug,
    }))
}

pub async fn roles(
    State(state): State<AppState>,
    Query(query): Query<DrugQuery>,
) -> ApiResult<Vec<RoleCount>> {
    let drug = required_drug(query.drug)?;
    let limit = query.limit.unwrap_or(state.settings.default_limit);
    let reports = state.reports(Some(&drug), limit).await?;
    Ok(Json(signals::role_breakdown(&reports)))
}

pub async fn trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> ApiResult<Vec<TrendPoint>> {
    let window_days = query.window_days.unwrap_or(state.settings.window_days);
    let limit = query.limit.unwrap_or(state.settings.default_limit);
    let drug = query.drug.filter(|d| !d.trim().is_empty());
    let reports = state.reports(drug.as_deref(), limit).await?;
    Ok(Json(signals::trend_by_day(&reports, window_days)?))
}
