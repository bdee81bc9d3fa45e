// ABOUTME: Integration tests for the adapter registry and provider dispatch
// ABOUTME: Covers built-in registration, custom adapters, and env-directed fetching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use httpmock::prelude::*;
use serde_json::json;
use serial_test::serial;
use std::env;
use std::sync::Arc;
use unison_health::constants::env as env_names;
use unison_health::credentials::AccessCredentials;
use unison_health::errors::{ProviderError, ProviderResult};
use unison_health::providers::{
    AdapterRegistry, DataRequest, DataResponse, ProviderAdapter,
};

fn utc(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Utc)
}

fn credentials() -> AccessCredentials {
    AccessCredentials::bearer("client-id", "client-secret", "registry-token")
}

#[test]
fn test_built_in_providers_register_on_construction() {
    let registry = AdapterRegistry::new();
    let mut providers = registry.supported_providers();
    providers.sort_unstable();

    assert_eq!(providers, vec!["fitbit", "withings"]);
    assert!(registry.is_supported("fitbit"));
    assert!(!registry.is_supported("garmin"));
}

#[tokio::test]
async fn test_unknown_provider_fetch_fails_fast() {
    let registry = AdapterRegistry::new();
    let request = DataRequest::normalized("weight", credentials());
    let error = registry.fetch("garmin", &request).await.unwrap_err();

    assert!(matches!(error, ProviderError::UnsupportedProvider { .. }));
    assert_eq!(error.to_string(), "unsupported provider 'garmin'");
}

#[tokio::test]
#[serial]
async fn test_fetch_routes_through_the_registered_adapter() {
    let server = MockServer::start_async().await;
    env::set_var(env_names::FITBIT_API_BASE_URL, server.base_url());
    let registry = AdapterRegistry::new();
    env::remove_var(env_names::FITBIT_API_BASE_URL);

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/1/user/-/body/log/weight/date/2014-11-10/2014-11-12.json")
                .header("authorization", "Bearer registry-token");
            then.status(200).json_body(json!({
                "weight": [{"date": "2014-11-12", "time": "23:59:59", "weight": 49.4}]
            }));
        })
        .await;

    let request = DataRequest::normalized("weight", credentials())
        .with_window(utc("2014-11-10T00:00:00Z"), utc("2014-11-12T00:00:00Z"));
    let response = registry.fetch("fitbit", &request).await.unwrap();

    mock.assert_calls_async(1).await;
    assert_eq!(response.provider(), "fitbit");
    assert_eq!(response.as_points().unwrap().len(), 1);
}

struct MirrorAdapter;

#[async_trait]
impl ProviderAdapter for MirrorAdapter {
    fn provider_key(&self) -> &'static str {
        "mirror"
    }

    fn display_name(&self) -> &'static str {
        "Mirror"
    }

    fn data_type_keys(&self) -> &'static [&'static str] {
        &["echo"]
    }

    async fn fetch_data(&self, request: &DataRequest) -> ProviderResult<DataResponse> {
        if request.data_type_key != "echo" {
            return Err(ProviderError::unsupported_data_type(
                "mirror",
                &request.data_type_key,
            ));
        }
        Ok(DataResponse::raw(
            "mirror",
            vec![json!({"echo": request.normalize})],
        ))
    }
}

#[tokio::test]
async fn test_custom_adapters_join_the_registry() {
    let mut registry = AdapterRegistry::new();
    registry.register(Arc::new(MirrorAdapter));

    assert!(registry.is_supported("mirror"));

    let response = registry
        .fetch("mirror", &DataRequest::raw("echo", credentials()))
        .await
        .unwrap();
    assert_eq!(response.as_raw().unwrap(), [json!({"echo": false})]);

    let error = registry
        .fetch("mirror", &DataRequest::raw("pulse", credentials()))
        .await
        .unwrap_err();
    assert!(matches!(error, ProviderError::UnsupportedDataType { .. }));
}
