// ABOUTME: Withings adapter with catalog, query templates, and app-level status handling
// ABOUTME: Every catalog entry is range-capable, so a window always costs exactly one request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use super::mappers::{
    WithingsBodyWeightMapper, WithingsDailyCaloriesBurnedMapper, WithingsDailyStepCountMapper,
};
use crate::config::ProviderSettings;
use crate::constants::{api, providers};
use crate::errors::{ProviderError, ProviderResult};
use crate::http;
use crate::mappers::DataPointMapper;
use crate::providers::core::{DataRequest, DataResponse, ProviderAdapter};
use crate::providers::windowing::{parse_payload, DateWindow};
use crate::signing::{BearerTokenSigner, RequestSigner};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::slice;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Measurement catalog of the Withings resource API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithingsDataType {
    /// Body weight, from the body measures endpoint.
    BodyWeight,
    /// Calories burned per day, from the activity summary endpoint.
    Calories,
    /// Steps per day, from the activity summary endpoint.
    Steps,
}

impl WithingsDataType {
    /// Data type keys the catalog accepts.
    pub const KEYS: &'static [&'static str] = &["body_weight", "calories", "steps"];

    /// Resolves a caller-supplied key, ignoring case and padding.
    ///
    /// # Errors
    /// Returns [`ProviderError::UnsupportedDataType`] for keys outside the
    /// catalog; resolution happens before any network traffic.
    pub fn from_key(key: &str) -> ProviderResult<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "body_weight" => Ok(Self::BodyWeight),
            "calories" => Ok(Self::Calories),
            "steps" => Ok(Self::Steps),
            _ => Err(ProviderError::unsupported_data_type(
                providers::WITHINGS,
                key,
            )),
        }
    }

    /// Canonical key of this catalog entry.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::BodyWeight => "body_weight",
            Self::Calories => "calories",
            Self::Steps => "steps",
        }
    }

    fn mapper(self) -> &'static dyn DataPointMapper {
        match self {
            Self::BodyWeight => &WithingsBodyWeightMapper,
            Self::Calories => &WithingsDailyCaloriesBurnedMapper,
            Self::Steps => &WithingsDailyStepCountMapper,
        }
    }
}

/// Adapter for the Withings resource API.
///
/// Both endpoints accept full date ranges, so the day-by-day fallback loop
/// other providers need never runs here. Pagination hints go out as
/// `offset`/`limit` on body measure queries; the projection hint selects
/// measure types (`meastypes`) or activity fields (`data_fields`).
pub struct WithingsAdapter {
    settings: ProviderSettings,
    signer: Arc<dyn RequestSigner>,
    client: Client,
}

impl Default for WithingsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl WithingsAdapter {
    /// Adapter against the production API.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(ProviderSettings::new(api::WITHINGS_BASE_URL))
    }

    /// Adapter with explicit settings (custom base URL).
    #[must_use]
    pub fn with_settings(settings: ProviderSettings) -> Self {
        Self {
            settings,
            signer: Arc::new(BearerTokenSigner),
            client: http::shared_client().clone(),
        }
    }

    /// Replaces the request signer.
    #[must_use]
    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = signer;
        self
    }

    fn endpoint_url(&self, segments: &[&str]) -> ProviderResult<Url> {
        let mut url = Url::parse(&self.settings.api_base_url).map_err(|error| {
            ProviderError::invalid_endpoint(providers::WITHINGS, error.to_string())
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                ProviderError::invalid_endpoint(
                    providers::WITHINGS,
                    "API base URL cannot be a base",
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn body_measure_url(
        &self,
        window: &DateWindow,
        request: &DataRequest,
    ) -> ProviderResult<Url> {
        let mut url = self.endpoint_url(&["measure"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("action", "getmeas");
            query.append_pair("category", "1");
            match &request.column_list {
                Some(columns) => {
                    query.append_pair("meastypes", &columns.join(","));
                }
                None => {
                    query.append_pair("meastype", "1");
                }
            }
            query.append_pair("startdate", &window.start().timestamp().to_string());
            query.append_pair("enddate", &window.end().timestamp().to_string());
            if let Some(skip) = request.num_to_skip {
                query.append_pair("offset", &skip.to_string());
            }
            if let Some(limit) = request.num_to_return {
                query.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }

    fn activity_url(&self, window: &DateWindow, request: &DataRequest) -> ProviderResult<Url> {
        let mut url = self.endpoint_url(&["v2", "measure"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("action", "getactivity");
            query.append_pair("startdateymd", &window.start_date().to_string());
            query.append_pair("enddateymd", &window.end_date().to_string());
            if let Some(columns) = &request.column_list {
                query.append_pair("data_fields", &columns.join(","));
            }
        }
        Ok(url)
    }

    fn request_url(
        &self,
        data_type: WithingsDataType,
        window: &DateWindow,
        request: &DataRequest,
    ) -> ProviderResult<Url> {
        match data_type {
            WithingsDataType::BodyWeight => self.body_measure_url(window, request),
            WithingsDataType::Calories | WithingsDataType::Steps => {
                self.activity_url(window, request)
            }
        }
    }

    async fn execute(
        &self,
        url: Url,
        data_type: WithingsDataType,
        request: &DataRequest,
    ) -> ProviderResult<DataResponse> {
        debug!("fetching {url} from withings");
        let http_request = self.client.get(url.clone());
        let http_request =
            self.signer
                .sign(providers::WITHINGS, http_request, &request.credentials)?;
        let response = http_request
            .send()
            .await
            .map_err(|error| ProviderError::transport(providers::WITHINGS, &url, error))?;
        let status = response.status();
        // Consume the body on every path so the pooled connection is released.
        let body = response
            .text()
            .await
            .map_err(|error| ProviderError::transport(providers::WITHINGS, &url, error))?;
        if !status.is_success() {
            return Err(ProviderError::ApiStatus {
                provider: providers::WITHINGS.to_owned(),
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let document = parse_payload(providers::WITHINGS, data_type.key(), &body)?;
        // Withings reports most failures as HTTP 200 with a non-zero
        // application status field.
        let app_status = document.get("status").and_then(Value::as_u64).unwrap_or(0);
        if app_status != 0 {
            return Err(ProviderError::ApiStatus {
                provider: providers::WITHINGS.to_owned(),
                url: url.to_string(),
                status: u16::try_from(app_status).unwrap_or(u16::MAX),
                body,
            });
        }

        if request.normalize {
            let points = data_type
                .mapper()
                .map_documents(slice::from_ref(&document))
                .map_err(|source| ProviderError::Mapping {
                    provider: providers::WITHINGS.to_owned(),
                    data_type_key: data_type.key().to_owned(),
                    source,
                })?;
            Ok(DataResponse::points(providers::WITHINGS, points))
        } else {
            Ok(DataResponse::raw(providers::WITHINGS, vec![document]))
        }
    }
}

#[async_trait]
impl ProviderAdapter for WithingsAdapter {
    fn provider_key(&self) -> &'static str {
        providers::WITHINGS
    }

    fn display_name(&self) -> &'static str {
        "Withings"
    }

    fn data_type_keys(&self) -> &'static [&'static str] {
        WithingsDataType::KEYS
    }

    async fn fetch_data(&self, request: &DataRequest) -> ProviderResult<DataResponse> {
        let data_type = WithingsDataType::from_key(&request.data_type_key)?;
        let window = request.effective_window(providers::WITHINGS)?;
        let url = self.request_url(data_type, &window, request)?;
        self.execute(url, data_type, request).await
    }
}
