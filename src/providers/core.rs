// ABOUTME: Core request/response contract and the adapter trait all providers implement
// ABOUTME: One descriptor shape and one envelope shape serve every provider uniformly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

//! # Shared Retrieval Contract
//!
//! This module defines the request/response contract every provider adapter
//! implements. A [`DataRequest`] describes one retrieval against one
//! provider; the adapter answers with a [`DataResponse`] envelope that is
//! either empty or carries normalized points or raw payloads. Retrieval is
//! all-or-nothing: any failure aborts the operation with a
//! [`crate::errors::ProviderError`] instead of a partial envelope.
//!
//! ## Example: Adding a New Provider
//!
//! ```rust,no_run
//! use unison_health::errors::ProviderResult;
//! use unison_health::providers::core::{DataRequest, DataResponse, ProviderAdapter};
//! use async_trait::async_trait;
//!
//! pub struct CustomAdapter;
//!
//! #[async_trait]
//! impl ProviderAdapter for CustomAdapter {
//!     fn provider_key(&self) -> &'static str {
//!         "custom"
//!     }
//!
//!     fn display_name(&self) -> &'static str {
//!         "Custom"
//!     }
//!
//!     fn data_type_keys(&self) -> &'static [&'static str] {
//!         &["body_weight"]
//!     }
//!
//!     async fn fetch_data(&self, request: &DataRequest) -> ProviderResult<DataResponse> {
//!         let _ = request;
//!         Ok(DataResponse::empty("custom"))
//!     }
//! }
//! ```

use super::windowing::DateWindow;
use crate::credentials::AccessCredentials;
use crate::errors::ProviderResult;
use crate::schema::DataPoint;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const fn default_normalize() -> bool {
    true
}

/// Describes one retrieval operation against one provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRequest {
    /// Which measurements to retrieve, in the provider's catalog vocabulary.
    pub data_type_key: String,
    /// Credentials authenticating the user against the provider.
    pub credentials: AccessCredentials,
    /// Window start; defaults to yesterday midnight UTC when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Window end; defaults to tomorrow midnight UTC when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Projection hint for providers whose APIs can restrict returned fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_list: Option<Vec<String>>,
    /// Pagination hint: records to skip, for providers that page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_to_skip: Option<u64>,
    /// Pagination hint: maximum records to return, for providers that page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_to_return: Option<u64>,
    /// Normalize into canonical points (default) or return raw payloads.
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

impl DataRequest {
    /// A normalized retrieval of `data_type_key` over the default window.
    #[must_use]
    pub fn normalized(data_type_key: impl Into<String>, credentials: AccessCredentials) -> Self {
        Self {
            data_type_key: data_type_key.into(),
            credentials,
            start_time: None,
            end_time: None,
            column_list: None,
            num_to_skip: None,
            num_to_return: None,
            normalize: true,
        }
    }

    /// A raw retrieval of `data_type_key` over the default window.
    #[must_use]
    pub fn raw(data_type_key: impl Into<String>, credentials: AccessCredentials) -> Self {
        Self {
            normalize: false,
            ..Self::normalized(data_type_key, credentials)
        }
    }

    /// Bounds the retrieval window explicitly.
    #[must_use]
    pub const fn with_window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Attaches pagination hints.
    #[must_use]
    pub const fn with_paging(mut self, num_to_skip: u64, num_to_return: u64) -> Self {
        self.num_to_skip = Some(num_to_skip);
        self.num_to_return = Some(num_to_return);
        self
    }

    /// Attaches a projection hint.
    #[must_use]
    pub fn with_columns(mut self, column_list: Vec<String>) -> Self {
        self.column_list = Some(column_list);
        self
    }

    /// Resolves the effective retrieval window, applying defaults and
    /// validating the bounds.
    ///
    /// # Errors
    /// Returns [`crate::errors::ProviderError::InvalidTimeRange`] when the
    /// resolved start is after the resolved end.
    pub fn effective_window(&self, provider: &str) -> ProviderResult<DateWindow> {
        DateWindow::resolve(provider, self.start_time, self.end_time)
    }
}

/// Payload of a non-empty response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Provider-native JSON payloads, one per request made.
    Raw(Vec<Value>),
    /// Canonical data points in retrieval order.
    Points(Vec<DataPoint>),
}

/// Stable response envelope returned by every retrieval.
///
/// The empty state is carried by the envelope itself, never by an empty
/// collection inside a non-empty body, so consumers have exactly one way to
/// observe "no data". Constructors enforce this: building a body from an
/// empty collection produces the empty envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct DataResponse {
    provider: String,
    retrieved_at: DateTime<Utc>,
    body: Option<ResponseBody>,
}

impl DataResponse {
    /// The canonical empty envelope for a provider.
    #[must_use]
    pub fn empty(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            retrieved_at: Utc::now(),
            body: None,
        }
    }

    /// An envelope of canonical points; an empty vector collapses to the
    /// empty envelope.
    #[must_use]
    pub fn points(provider: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self {
            provider: provider.into(),
            retrieved_at: Utc::now(),
            body: (!points.is_empty()).then(|| ResponseBody::Points(points)),
        }
    }

    /// An envelope of raw payloads; an empty vector collapses to the empty
    /// envelope.
    #[must_use]
    pub fn raw(provider: impl Into<String>, documents: Vec<Value>) -> Self {
        Self {
            provider: provider.into(),
            retrieved_at: Utc::now(),
            body: (!documents.is_empty()).then(|| ResponseBody::Raw(documents)),
        }
    }

    /// Provider key the envelope belongs to.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// When the retrieval completed.
    #[must_use]
    pub const fn retrieved_at(&self) -> DateTime<Utc> {
        self.retrieved_at
    }

    /// Whether the retrieval produced no data at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.body.is_none()
    }

    /// The payload, when the envelope is non-empty.
    #[must_use]
    pub const fn body(&self) -> Option<&ResponseBody> {
        self.body.as_ref()
    }

    /// Consumes the envelope, yielding its payload.
    #[must_use]
    pub fn into_body(self) -> Option<ResponseBody> {
        self.body
    }

    /// Canonical points, when this is a non-empty normalized envelope.
    #[must_use]
    pub fn as_points(&self) -> Option<&[DataPoint]> {
        match &self.body {
            Some(ResponseBody::Points(points)) => Some(points),
            _ => None,
        }
    }

    /// Raw payloads, when this is a non-empty raw envelope.
    #[must_use]
    pub fn as_raw(&self) -> Option<&[Value]> {
        match &self.body {
            Some(ResponseBody::Raw(documents)) => Some(documents),
            _ => None,
        }
    }
}

impl Serialize for DataResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("DataResponse", 4)?;
        state.serialize_field("provider", &self.provider)?;
        state.serialize_field("retrieved_at", &self.retrieved_at)?;
        state.serialize_field("body", &self.body)?;
        state.serialize_field("is_empty", &self.is_empty())?;
        state.end()
    }
}

/// Uniform interface to one provider's measurement retrieval.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Stable provider key used for registry lookup and envelope tagging.
    fn provider_key(&self) -> &'static str;

    /// Human-readable provider name.
    fn display_name(&self) -> &'static str;

    /// Data type keys this provider's catalog can serve.
    fn data_type_keys(&self) -> &'static [&'static str];

    /// Retrieves the measurements described by `request`.
    ///
    /// # Errors
    /// Returns [`crate::errors::ProviderError`] when the data type is
    /// unknown, the window is invalid, credentials are unusable, or any
    /// fetch, parse, or mapping step fails.
    async fn fetch_data(&self, request: &DataRequest) -> ProviderResult<DataResponse>;
}
