// ABOUTME: Retrieval window resolution, per-day iteration, and cross-day aggregation
// ABOUTME: One window policy serves every adapter so defaults and validation never diverge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use super::core::{DataResponse, ResponseBody};
use crate::errors::{ProviderError, ProviderResult};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde_json::Value;

/// A validated retrieval window with inclusive calendar-day bounds.
///
/// Defaults cover "yesterday through today" generously: when a bound is
/// absent it becomes midnight UTC one day before (or after) the current day,
/// so a default request always spans the user's ongoing day regardless of
/// their time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateWindow {
    /// Applies defaults to the optional bounds and validates the result.
    ///
    /// # Errors
    /// Returns [`ProviderError::InvalidTimeRange`] when the resolved start
    /// is after the resolved end. The check runs before any network traffic.
    pub fn resolve(
        provider: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> ProviderResult<Self> {
        let today = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
        let start = start.unwrap_or_else(|| today - Duration::days(1));
        let end = end.unwrap_or_else(|| today + Duration::days(1));
        if start > end {
            return Err(ProviderError::InvalidTimeRange {
                provider: provider.to_owned(),
                start,
                end,
            });
        }
        Ok(Self { start, end })
    }

    /// Window start.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Window end.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Calendar date of the window start.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Calendar date of the window end.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Ascending iterator over the calendar days the window touches.
    ///
    /// Both boundary dates are included: day comparison is date-only, so a
    /// window ending at `00:00` still covers its final date.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.end_date();
        self.start_date()
            .iter_days()
            .take_while(move |date| *date <= last)
    }

    /// Number of calendar days [`Self::days`] will yield.
    #[must_use]
    pub fn day_count(&self) -> i64 {
        (self.end_date() - self.start_date()).num_days() + 1
    }
}

/// Flattens per-day normalized envelopes into one, preserving day order and
/// intra-day order. The result is empty exactly when every day was empty.
#[must_use]
pub fn aggregate_normalized(provider: &str, day_responses: Vec<DataResponse>) -> DataResponse {
    let mut points = Vec::new();
    for response in day_responses {
        if let Some(ResponseBody::Points(day_points)) = response.into_body() {
            points.extend(day_points);
        }
    }
    DataResponse::points(provider, points)
}

/// Collects per-day raw payloads into one envelope, skipping empty days.
#[must_use]
pub fn aggregate_raw(provider: &str, day_responses: Vec<DataResponse>) -> DataResponse {
    let mut documents = Vec::new();
    for response in day_responses {
        if let Some(ResponseBody::Raw(day_documents)) = response.into_body() {
            documents.extend(day_documents);
        }
    }
    DataResponse::raw(provider, documents)
}

/// Parses a raw payload body, tagging failures with the provider and data
/// type being fetched.
///
/// # Errors
/// Returns [`ProviderError::MalformedPayload`] when the body is not JSON.
pub fn parse_payload(provider: &str, data_type_key: &str, body: &str) -> ProviderResult<Value> {
    serde_json::from_str(body).map_err(|source| ProviderError::MalformedPayload {
        provider: provider.to_owned(),
        data_type_key: data_type_key.to_owned(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::{BodyWeight, DataPoint, MassUnit, MassUnitValue};
    use serde_json::json;

    fn utc(text: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Utc)
    }

    fn weight_point(kg: f64) -> DataPoint {
        DataPoint::sensed(
            "Test Resource API",
            None,
            BodyWeight::new(MassUnitValue::new(MassUnit::Kilogram, kg)).into(),
        )
    }

    #[test]
    fn default_window_spans_yesterday_through_tomorrow_midnight() {
        let window = DateWindow::resolve("fitbit", None, None).unwrap();
        let today = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
        assert_eq!(window.start(), today - Duration::days(1));
        assert_eq!(window.end(), today + Duration::days(1));
        assert_eq!(window.day_count(), 3);
    }

    #[test]
    fn inverted_bounds_fail_before_any_fetch() {
        let error = DateWindow::resolve(
            "fitbit",
            Some(utc("2014-08-22T00:00:00Z")),
            Some(utc("2014-08-20T00:00:00Z")),
        )
        .unwrap_err();
        assert!(matches!(error, ProviderError::InvalidTimeRange { .. }));
    }

    #[test]
    fn day_iteration_is_ascending_and_inclusive_of_both_dates() {
        let window = DateWindow::resolve(
            "fitbit",
            Some(utc("2014-08-20T15:30:00Z")),
            Some(utc("2014-08-22T00:00:00Z")),
        )
        .unwrap();
        let days: Vec<String> = window.days().map(|date| date.to_string()).collect();
        assert_eq!(days, vec!["2014-08-20", "2014-08-21", "2014-08-22"]);
    }

    #[test]
    fn single_instant_window_covers_one_day() {
        let instant = utc("2014-08-20T12:00:00Z");
        let window = DateWindow::resolve("fitbit", Some(instant), Some(instant)).unwrap();
        assert_eq!(window.day_count(), 1);
        assert_eq!(window.days().count(), 1);
    }

    #[test]
    fn normalized_aggregation_preserves_day_then_intra_day_order() {
        let days = vec![
            DataResponse::points("fitbit", vec![weight_point(1.0), weight_point(2.0)]),
            DataResponse::empty("fitbit"),
            DataResponse::points("fitbit", vec![weight_point(3.0)]),
        ];
        let combined = aggregate_normalized("fitbit", days);
        let weights: Vec<f64> = combined
            .as_points()
            .unwrap()
            .iter()
            .map(|point| match &point.body {
                crate::schema::Measure::BodyWeight(weight) => weight.body_weight.value,
                _ => f64::NAN,
            })
            .collect();
        assert_eq!(weights, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn aggregation_of_all_empty_days_is_the_empty_envelope() {
        let days = vec![
            DataResponse::empty("fitbit"),
            DataResponse::empty("fitbit"),
            DataResponse::empty("fitbit"),
        ];
        assert!(aggregate_normalized("fitbit", days).is_empty());
        assert!(aggregate_raw("fitbit", Vec::new()).is_empty());
    }

    #[test]
    fn raw_aggregation_keeps_only_non_empty_days() {
        let days = vec![
            DataResponse::raw("fitbit", vec![json!({"day": 1})]),
            DataResponse::empty("fitbit"),
            DataResponse::raw("fitbit", vec![json!({"day": 3})]),
        ];
        let combined = aggregate_raw("fitbit", days);
        let documents = combined.as_raw().unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0]["day"], 1);
        assert_eq!(documents[1]["day"], 3);
    }

    #[test]
    fn payload_parse_failures_name_provider_and_data_type() {
        let error = parse_payload("withings", "body_weight", "<html>bad gateway</html>").unwrap_err();
        assert!(matches!(
            error,
            ProviderError::MalformedPayload { ref provider, ref data_type_key, .. }
                if provider == "withings" && data_type_key == "body_weight"
        ));
    }
}
