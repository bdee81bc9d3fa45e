// ABOUTME: Fitbit adapter with catalog, windowing policy, URL templates, and fetch loop
// ABOUTME: Range-capable types go out as one request; everything else is queried per calendar day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use super::mappers::{
    FitbitBodyMassIndexMapper, FitbitBodyWeightMapper, FitbitIntradayStepCountMapper,
    FitbitPhysicalActivityMapper, FitbitSleepDurationMapper, FitbitStepCountMapper,
};
use crate::config::ProviderSettings;
use crate::constants::{api, providers};
use crate::errors::{ProviderError, ProviderResult};
use crate::http;
use crate::mappers::DataPointMapper;
use crate::providers::core::{DataRequest, DataResponse, ProviderAdapter};
use crate::providers::windowing::{aggregate_normalized, aggregate_raw, parse_payload, DateWindow};
use crate::signing::{BearerTokenSigner, RequestSigner};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::json;
use std::slice;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Measurement catalog of the Fitbit resource API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitbitDataType {
    /// Body weight log.
    Weight,
    /// Body mass index, from the weight log.
    BodyMassIndex,
    /// Sleep log.
    Sleep,
    /// Step time series, daily or intraday depending on access tier.
    Steps,
    /// Activity log for a day.
    Activity,
}

impl FitbitDataType {
    /// Data type keys the catalog accepts.
    pub const KEYS: &'static [&'static str] =
        &["weight", "body_mass_index", "sleep", "steps", "activity"];

    /// Resolves a caller-supplied key, ignoring case and padding.
    ///
    /// # Errors
    /// Returns [`ProviderError::UnsupportedDataType`] for keys outside the
    /// catalog; resolution happens before any network traffic.
    pub fn from_key(key: &str) -> ProviderResult<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "weight" => Ok(Self::Weight),
            "body_mass_index" => Ok(Self::BodyMassIndex),
            "sleep" => Ok(Self::Sleep),
            "steps" => Ok(Self::Steps),
            "activity" => Ok(Self::Activity),
            _ => Err(ProviderError::unsupported_data_type(providers::FITBIT, key)),
        }
    }

    /// Canonical key of this catalog entry.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::BodyMassIndex => "body_mass_index",
            Self::Sleep => "sleep",
            Self::Steps => "steps",
            Self::Activity => "activity",
        }
    }

    /// Resource path under `/1/user/-/`.
    const fn endpoint(self) -> &'static str {
        match self {
            Self::Weight | Self::BodyMassIndex => "body/log/weight",
            Self::Sleep => "sleep",
            Self::Steps => "activities/steps",
            Self::Activity => "activities",
        }
    }

    /// Whether one ranged request can cover a multi-day window.
    ///
    /// Weight and BMI support date ranges outright. Step time series do too,
    /// but partner applications query steps per day instead to get intraday
    /// resolution. Sleep and activity logs are day-scoped APIs.
    #[must_use]
    pub const fn supports_ranged_query(self, partner_access: bool) -> bool {
        match self {
            Self::Weight | Self::BodyMassIndex => true,
            Self::Steps => !partner_access,
            Self::Sleep | Self::Activity => false,
        }
    }

    fn mapper(self, partner_access: bool) -> &'static dyn DataPointMapper {
        match self {
            Self::Weight => &FitbitBodyWeightMapper,
            Self::BodyMassIndex => &FitbitBodyMassIndexMapper,
            Self::Sleep => &FitbitSleepDurationMapper,
            Self::Steps if partner_access => &FitbitIntradayStepCountMapper,
            Self::Steps => &FitbitStepCountMapper,
            Self::Activity => &FitbitPhysicalActivityMapper,
        }
    }
}

/// Adapter for the Fitbit resource API.
///
/// Projection and pagination hints in the request descriptor are ignored:
/// the Fitbit API offers neither.
pub struct FitbitAdapter {
    settings: ProviderSettings,
    signer: Arc<dyn RequestSigner>,
    client: Client,
}

impl Default for FitbitAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FitbitAdapter {
    /// Adapter against the production API on the standard access tier.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(ProviderSettings::new(api::FITBIT_BASE_URL))
    }

    /// Adapter with explicit settings (custom base URL, partner tier).
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
            ProviderError::invalid_endpoint(providers::FITBIT, error.to_string())
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                ProviderError::invalid_endpoint(providers::FITBIT, "API base URL cannot be a base")
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn ranged_url(&self, data_type: FitbitDataType, window: &DateWindow) -> ProviderResult<Url> {
        let start = window.start_date().to_string();
        let end = format!("{}.json", window.end_date());
        let mut segments = vec!["1", "user", "-"];
        segments.extend(data_type.endpoint().split('/'));
        segments.push("date");
        segments.push(&start);
        segments.push(&end);
        self.endpoint_url(&segments)
    }

    fn single_day_url(&self, data_type: FitbitDataType, date: NaiveDate) -> ProviderResult<Url> {
        let intraday = data_type == FitbitDataType::Steps && self.settings.partner_access;
        let day = if intraday {
            date.to_string()
        } else {
            format!("{date}.json")
        };
        let mut segments = vec!["1", "user", "-"];
        segments.extend(data_type.endpoint().split('/'));
        segments.push("date");
        segments.push(&day);
        if intraday {
            segments.push("1d");
            segments.push("1min.json");
        }
        self.endpoint_url(&segments)
    }

    /// Performs one request and turns the payload into a day envelope.
    ///
    /// `date` is present for single-day fetches; raw mode re-wraps those
    /// payloads so the calendar day survives aggregation.
    async fn execute(
        &self,
        url: Url,
        data_type: FitbitDataType,
        date: Option<NaiveDate>,
        request: &DataRequest,
    ) -> ProviderResult<DataResponse> {
        debug!("fetching {url} from fitbit");
        let http_request = self.client.get(url.clone());
        let http_request =
            self.signer
                .sign(providers::FITBIT, http_request, &request.credentials)?;
        let response = http_request
            .send()
            .await
            .map_err(|error| ProviderError::transport(providers::FITBIT, &url, error))?;
        let status = response.status();
        // Consume the body on every path so the pooled connection is released.
        let body = response
            .text()
            .await
            .map_err(|error| ProviderError::transport(providers::FITBIT, &url, error))?;
        if !status.is_success() {
            return Err(ProviderError::ApiStatus {
                provider: providers::FITBIT.to_owned(),
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let document = parse_payload(providers::FITBIT, data_type.key(), &body)?;
        if request.normalize {
            let mapper = data_type.mapper(self.settings.partner_access);
            let points = mapper
                .map_documents(slice::from_ref(&document))
                .map_err(|source| ProviderError::Mapping {
                    provider: providers::FITBIT.to_owned(),
                    data_type_key: data_type.key().to_owned(),
                    source,
                })?;
            Ok(DataResponse::points(providers::FITBIT, points))
        } else {
            let document = match date {
                Some(date) => json!({
                    "result": {"date": date.to_string(), "content": document}
                }),
                None => document,
            };
            Ok(DataResponse::raw(providers::FITBIT, vec![document]))
        }
    }
}

#[async_trait]
impl ProviderAdapter for FitbitAdapter {
    fn provider_key(&self) -> &'static str {
        providers::FITBIT
    }

    fn display_name(&self) -> &'static str {
        "Fitbit"
    }

    fn data_type_keys(&self) -> &'static [&'static str] {
        FitbitDataType::KEYS
    }

    async fn fetch_data(&self, request: &DataRequest) -> ProviderResult<DataResponse> {
        let data_type = FitbitDataType::from_key(&request.data_type_key)?;
        let window = request.effective_window(providers::FITBIT)?;

        if data_type.supports_ranged_query(self.settings.partner_access) {
            let url = self.ranged_url(data_type, &window)?;
            return self.execute(url, data_type, None, request).await;
        }

        debug!(
            "querying fitbit {} per day over {} day(s)",
            data_type.key(),
            window.day_count()
        );
        let mut day_responses = Vec::new();
        for date in window.days() {
            let url = self.single_day_url(data_type, date)?;
            day_responses.push(self.execute(url, data_type, Some(date), request).await?);
        }

        Ok(if request.normalize {
            aggregate_normalized(providers::FITBIT, day_responses)
        } else {
            aggregate_raw(providers::FITBIT, day_responses)
        })
    }
}
