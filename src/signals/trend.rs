//! Per-day report counts over a trailing window.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    data::report::AdverseEventReport,
    error::{DashError, DashResult},
};

pub const DEFAULT_WINDOW_DAYS: i64 = 180;

/// Ten years of daily points; wider windows are rejected.
pub const MAX_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: u64,
}

/// Trend anchored at today's UTC date.
pub fn trend_by_day(reports: &[AdverseEventReport], window_days: i64) -> DashResult<Vec<TrendPoint>> {
    trend_by_day_until(reports, window_days, Utc::now().date_naive())
}

/// One point per calendar day in `[today - window_days, today]`, ascending,
/// zero-count days included. Reports outside the window are ignored.
pub fn trend_by_day_until(
    reports: &[AdverseEventReport],
    window_days: i64,
    today: NaiveDate,
) -> DashResult<Vec<TrendPoint>> {
    if !(0..=MAX_WINDOW_DAYS).contains(&window_days) {
        return Err(DashError::invalid(format!(
            "window_days must be between 0 and {MAX_WINDOW_DAYS}, got {window_days}"
        )));
    }
    let start = Duration::try_days(window_days)
        .and_then(|span| today.checked_sub_signed(span))
        .ok_or_else(|| DashError::invalid(format!("window of {window_days} days is out of range")))?;

    let mut buckets: BTreeMap<NaiveDate, u64> = start
        .iter_days()
        .take_while(|day| *day <= today)
        .map(|day| (day, 0))
        .collect();
    for report in reports {
        if let Some(count) = buckets.get_mut(&report.report_date) {
            *count += 1;
        }
    }

    Ok(buckets
        .into_iter()
        .map(|(date, count)| TrendPoint { date, count })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn zero_window_is_single_day() {
        let today = day(2024, 3, 1);
        let points = trend_by_day_until(&[], 0, today).unwrap();
        assert_eq!(points, vec![TrendPoint { date: today, count: 0 }]);
    }

    #[test]
    fn window_spans_leap_day() {
        let points = trend_by_day_until(&[], 2, day(2024, 3, 1)).unwrap();
        let dates: Vec<_> = points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(2024, 2, 28), day(2024, 2, 29), day(2024, 3, 1)]);
    }

    #[test]
    fn reports_outside_window_are_ignored() {
        let today = day(2024, 6, 30);
        let reports = vec![
            AdverseEventReport::new("ASPIRIN", day(2024, 6, 29)),
            AdverseEventReport::new("ASPIRIN", day(2024, 6, 29)),
            AdverseEventReport::new("ASPIRIN", day(2023, 1, 1)),
        ];
        let points = trend_by_day_until(&reports, 7, today).unwrap();
        assert_eq!(points.len(), 8);
        assert_eq!(points.iter().map(|p| p.count).sum::<u64>(), 2);
        assert_eq!(points[6], TrendPoint { date: day(2024, 6, 29), count: 2 });
    }

    #[test]
    fn oversized_window_is_rejected() {
        let today = day(2026, 10, 19);
        let err = trend_by_day_until(&[], 20_000_000, today).unwrap_err();
        assert!(matches!(err, DashError::InvalidArgument(_)));
        let widest = trend_by_day_until(&[], MAX_WINDOW_DAYS, today).unwrap();
        assert_eq!(widest.len(), MAX_WINDOW_DAYS as usize + 1);
    }

    #[test]
    fn negative_window_is_rejected() {
        let err = trend_by_day_until(&[], -1, day(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, DashError::InvalidArgument(_)));
    }
}
