// ABOUTME: HTTP-level tests for the Fitbit adapter against a local mock server
// ABOUTME: Covers ranged vs per-day fetching, failure aborts, raw mode, and intraday access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use httpmock::prelude::*;
use serde_json::json;
use unison_health::config::ProviderSettings;
use unison_health::credentials::AccessCredentials;
use unison_health::errors::ProviderError;
use unison_health::providers::fitbit::FitbitAdapter;
use unison_health::providers::{DataRequest, ProviderAdapter};
use unison_health::schema::Measure;

fn utc(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Utc)
}

fn credentials() -> AccessCredentials {
    AccessCredentials::bearer("client-id", "client-secret", "fitbit-token")
}

fn adapter_for(server: &MockServer) -> FitbitAdapter {
    FitbitAdapter::with_settings(ProviderSettings::new(server.base_url()))
}

fn sleep_minutes(point_body: &Measure) -> f64 {
    match point_body {
        Measure::SleepDuration(sleep) => sleep.sleep_duration.value,
        other => panic!("expected a sleep duration measure, got {other:?}"),
    }
}

// ============================================================================
// Request Shaping
// ============================================================================

#[tokio::test]
async fn test_ranged_weight_fetch_issues_one_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/1/user/-/body/log/weight/date/2014-11-10/2014-11-12.json")
                .header("authorization", "Bearer fitbit-token");
            then.status(200).json_body(json!({
                "weight": [
                    {"date": "2014-11-10", "time": "23:59:59", "weight": 49.2},
                    {"date": "2014-11-11", "time": "23:59:59", "weight": 49.3},
                    {"date": "2014-11-12", "time": "23:59:59", "weight": 49.4}
                ]
            }));
        })
        .await;

    let request = DataRequest::normalized("weight", credentials())
        .with_window(utc("2014-11-10T00:00:00Z"), utc("2014-11-12T00:00:00Z"));
    let response = adapter_for(&server).fetch_data(&request).await.unwrap();

    mock.assert_calls_async(1).await;
    assert_eq!(response.provider(), "fitbit");
    assert_eq!(response.as_points().unwrap().len(), 3);
}

#[tokio::test]
async fn test_per_day_types_fetch_each_calendar_day_in_order() {
    let server = MockServer::start_async().await;
    let mut day_mocks = Vec::new();
    for (day, minutes) in [("2014-07-19", 100), ("2014-07-20", 200), ("2014-07-21", 300)] {
        let mock = server
            .mock_async(move |when, then| {
                when.method(GET).path(format!("/1/user/-/sleep/date/{day}.json"));
                then.status(200)
                    .json_body(json!({"sleep": [{"minutesAsleep": minutes}]}));
            })
            .await;
        day_mocks.push(mock);
    }

    let request = DataRequest::normalized("sleep", credentials())
        .with_window(utc("2014-07-19T00:00:00Z"), utc("2014-07-21T00:00:00Z"));
    let response = adapter_for(&server).fetch_data(&request).await.unwrap();

    for mock in &day_mocks {
        mock.assert_calls_async(1).await;
    }
    let minutes: Vec<f64> = response
        .as_points()
        .unwrap()
        .iter()
        .map(|point| sleep_minutes(&point.body))
        .collect();
    assert_eq!(minutes, vec![100.0, 200.0, 300.0]);
}

#[tokio::test]
async fn test_days_without_a_list_node_contribute_nothing() {
    let server = MockServer::start_async().await;
    for (day, body) in [
        ("2014-07-19", json!({"sleep": [{"minutesAsleep": 100}]})),
        ("2014-07-20", json!({"summary": {"totalMinutesAsleep": 0}})),
        ("2014-07-21", json!({"sleep": [{"minutesAsleep": 300}]})),
    ] {
        server
            .mock_async(move |when, then| {
                when.method(GET).path(format!("/1/user/-/sleep/date/{day}.json"));
                then.status(200).json_body(body);
            })
            .await;
    }

    let request = DataRequest::normalized("sleep", credentials())
        .with_window(utc("2014-07-19T00:00:00Z"), utc("2014-07-21T00:00:00Z"));
    let response = adapter_for(&server).fetch_data(&request).await.unwrap();

    let minutes: Vec<f64> = response
        .as_points()
        .unwrap()
        .iter()
        .map(|point| sleep_minutes(&point.body))
        .collect();
    assert_eq!(minutes, vec![100.0, 300.0]);
}

// ============================================================================
// Failure Modes
// ============================================================================

#[tokio::test]
async fn test_unknown_data_type_fails_before_any_request() {
    let server = MockServer::start_async().await;
    let guard = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({}));
        })
        .await;

    let request = DataRequest::normalized("heart_rate", credentials());
    let error = adapter_for(&server).fetch_data(&request).await.unwrap_err();

    assert!(matches!(error, ProviderError::UnsupportedDataType { .. }));
    assert_eq!(
        error.to_string(),
        "provider 'fitbit' does not support data type 'heart_rate'"
    );
    guard.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_inverted_window_fails_before_any_request() {
    let server = MockServer::start_async().await;
    let guard = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({}));
        })
        .await;

    let request = DataRequest::normalized("weight", credentials())
        .with_window(utc("2014-11-12T00:00:00Z"), utc("2014-11-10T00:00:00Z"));
    let error = adapter_for(&server).fetch_data(&request).await.unwrap_err();

    assert!(matches!(error, ProviderError::InvalidTimeRange { .. }));
    guard.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let server = MockServer::start_async().await;
    let guard = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({}));
        })
        .await;

    let request = DataRequest::normalized(
        "weight",
        AccessCredentials::bearer("client-id", "client-secret", ""),
    );
    let error = adapter_for(&server).fetch_data(&request).await.unwrap_err();

    assert!(matches!(error, ProviderError::MissingCredentials { .. }));
    guard.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_mid_loop_failure_aborts_the_whole_fetch() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/1/user/-/sleep/date/2014-07-19.json");
            then.status(200).json_body(json!({"sleep": []}));
        })
        .await;
    let failing = server
        .mock_async(|when, then| {
            when.method(GET).path("/1/user/-/sleep/date/2014-07-20.json");
            then.status(500).body("server error");
        })
        .await;
    let never_reached = server
        .mock_async(|when, then| {
            when.method(GET).path("/1/user/-/sleep/date/2014-07-21.json");
            then.status(200).json_body(json!({"sleep": []}));
        })
        .await;

    let request = DataRequest::normalized("sleep", credentials())
        .with_window(utc("2014-07-19T00:00:00Z"), utc("2014-07-21T00:00:00Z"));
    let error = adapter_for(&server).fetch_data(&request).await.unwrap_err();

    assert!(matches!(error, ProviderError::ApiStatus { status: 500, .. }));
    first.assert_calls_async(1).await;
    failing.assert_calls_async(1).await;
    never_reached.assert_calls_async(0).await;
}

// ============================================================================
// Raw Mode
// ============================================================================

#[tokio::test]
async fn test_raw_single_day_payloads_keep_their_calendar_date() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/1/user/-/sleep/date/2014-07-19.json");
            then.status(200)
                .json_body(json!({"sleep": [{"minutesAsleep": 831}]}));
        })
        .await;

    let request = DataRequest::raw("sleep", credentials())
        .with_window(utc("2014-07-19T00:00:00Z"), utc("2014-07-19T00:00:00Z"));
    let response = adapter_for(&server).fetch_data(&request).await.unwrap();

    let documents = response.as_raw().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(
        documents[0],
        json!({
            "result": {
                "date": "2014-07-19",
                "content": {"sleep": [{"minutesAsleep": 831}]}
            }
        })
    );
}

#[tokio::test]
async fn test_raw_ranged_payloads_pass_through_unwrapped() {
    let server = MockServer::start_async().await;
    let payload = json!({
        "weight": [{"date": "2014-11-12", "time": "23:59:59", "weight": 49.4}]
    });
    let body = payload.clone();
    server
        .mock_async(move |when, then| {
            when.method(GET)
                .path("/1/user/-/body/log/weight/date/2014-11-10/2014-11-12.json");
            then.status(200).json_body(body);
        })
        .await;

    let request = DataRequest::raw("weight", credentials())
        .with_window(utc("2014-11-10T00:00:00Z"), utc("2014-11-12T00:00:00Z"));
    let response = adapter_for(&server).fetch_data(&request).await.unwrap();

    let documents = response.as_raw().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0], payload);
    assert!(documents[0].get("result").is_none());
}

// ============================================================================
// Step Variants
// ============================================================================

#[tokio::test]
async fn test_standard_steps_use_the_ranged_time_series() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/1/user/-/activities/steps/date/2014-08-20/2014-08-21.json");
            then.status(200).json_body(json!({
                "activities-steps": [
                    {"dateTime": "2014-08-20", "value": "4332"},
                    {"dateTime": "2014-08-21", "value": "0"}
                ]
            }));
        })
        .await;

    let request = DataRequest::normalized("steps", credentials())
        .with_window(utc("2014-08-20T00:00:00Z"), utc("2014-08-21T00:00:00Z"));
    let response = adapter_for(&server).fetch_data(&request).await.unwrap();

    mock.assert_calls_async(1).await;
    let points = response.as_points().unwrap();
    assert_eq!(points.len(), 1);
    match &points[0].body {
        Measure::StepCount(steps) => assert_eq!(steps.step_count, 4332),
        other => panic!("expected a step count measure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_partner_access_switches_steps_to_intraday() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/1/user/-/activities/steps/date/2014-08-20/1d/1min.json");
            then.status(200).json_body(json!({
                "activities-steps": [{"dateTime": "2014-08-20", "value": "4332"}],
                "activities-steps-intraday": {
                    "dataset": [
                        {"time": "00:25:00", "value": 0},
                        {"time": "00:26:00", "value": 7},
                        {"time": "00:27:00", "value": 15}
                    ]
                }
            }));
        })
        .await;

    let adapter = FitbitAdapter::with_settings(
        ProviderSettings::new(server.base_url()).with_partner_access(true),
    );
    let request = DataRequest::normalized("steps", credentials())
        .with_window(utc("2014-08-20T00:00:00Z"), utc("2014-08-20T00:00:00Z"));
    let response = adapter.fetch_data(&request).await.unwrap();

    mock.assert_calls_async(1).await;
    let counts: Vec<u64> = response
        .as_points()
        .unwrap()
        .iter()
        .map(|point| match &point.body {
            Measure::StepCount(steps) => steps.step_count,
            other => panic!("expected a step count measure, got {other:?}"),
        })
        .collect();
    assert_eq!(counts, vec![7, 15]);
}

// ============================================================================
// Empty Results
// ============================================================================

#[tokio::test]
async fn test_all_empty_days_collapse_to_an_empty_envelope() {
    let server = MockServer::start_async().await;
    for day in ["2014-07-19", "2014-07-20"] {
        server
            .mock_async(move |when, then| {
                when.method(GET).path(format!("/1/user/-/sleep/date/{day}.json"));
                then.status(200).json_body(json!({"sleep": []}));
            })
            .await;
    }

    let request = DataRequest::normalized("sleep", credentials())
        .with_window(utc("2014-07-19T00:00:00Z"), utc("2014-07-20T00:00:00Z"));
    let response = adapter_for(&server).fetch_data(&request).await.unwrap();

    assert!(response.is_empty());
    assert!(response.body().is_none());
    assert!(response.as_points().is_none());
}
