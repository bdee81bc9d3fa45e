// ABOUTME: Structured error taxonomy for provider retrieval and normalization failures
// ABOUTME: Every surfaced error names the provider, the failed step, and the underlying cause
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Convenient result alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised while resolving, fetching, or normalizing provider data.
///
/// A retrieval is all-or-nothing: the first error encountered aborts the
/// whole operation and is returned verbatim, so callers can always tell a
/// complete result from a failed one.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested provider key is not registered.
    #[error("unsupported provider '{provider}'")]
    UnsupportedProvider {
        /// Provider key as given by the caller.
        provider: String,
    },

    /// The provider has no catalog entry for the requested data type key.
    #[error("provider '{provider}' does not support data type '{data_type_key}'")]
    UnsupportedDataType {
        /// Provider key.
        provider: String,
        /// Data type key as given by the caller.
        data_type_key: String,
    },

    /// The resolved retrieval window starts after it ends.
    #[error("invalid time range for provider '{provider}': start {start} is after end {end}")]
    InvalidTimeRange {
        /// Provider key.
        provider: String,
        /// Resolved window start.
        start: DateTime<Utc>,
        /// Resolved window end.
        end: DateTime<Utc>,
    },

    /// Credentials required to authenticate the request are absent or unusable.
    #[error("missing credentials for provider '{provider}': {detail}")]
    MissingCredentials {
        /// Provider key.
        provider: String,
        /// What exactly is missing.
        detail: String,
    },

    /// A request URL could not be built from the catalog endpoint template.
    #[error("could not build endpoint for provider '{provider}': {detail}")]
    InvalidEndpoint {
        /// Provider key.
        provider: String,
        /// Why URL construction failed.
        detail: String,
    },

    /// The HTTP exchange itself failed (connect, timeout, body read).
    #[error("request to {url} failed for provider '{provider}'")]
    Transport {
        /// Provider key.
        provider: String,
        /// Full request URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status, either on the HTTP
    /// layer or as an application status inside a 200 response.
    #[error("provider '{provider}' returned status {status} from {url}: {body}")]
    ApiStatus {
        /// Provider key.
        provider: String,
        /// Full request URL.
        url: String,
        /// HTTP or application status code.
        status: u16,
        /// Response body as returned by the provider.
        body: String,
    },

    /// The response body was not parseable as JSON.
    #[error("could not parse '{data_type_key}' payload from provider '{provider}'")]
    MalformedPayload {
        /// Provider key.
        provider: String,
        /// Data type key being fetched.
        data_type_key: String,
        /// Parse failure detail.
        #[source]
        source: serde_json::Error,
    },

    /// Normalization of a parsed payload failed at the document level.
    #[error("could not map '{data_type_key}' payload from provider '{provider}'")]
    Mapping {
        /// Provider key.
        provider: String,
        /// Data type key being mapped.
        data_type_key: String,
        /// Mapping failure detail.
        #[source]
        source: MappingError,
    },
}

impl ProviderError {
    /// Unknown data type key for a provider catalog.
    pub fn unsupported_data_type(provider: &str, data_type_key: &str) -> Self {
        Self::UnsupportedDataType {
            provider: provider.to_owned(),
            data_type_key: data_type_key.to_owned(),
        }
    }

    /// Missing or unusable credentials, detected before any network traffic.
    pub fn missing_credentials(provider: &str, detail: impl Into<String>) -> Self {
        Self::MissingCredentials {
            provider: provider.to_owned(),
            detail: detail.into(),
        }
    }

    /// Endpoint URL construction failure.
    pub fn invalid_endpoint(provider: &str, detail: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            provider: provider.to_owned(),
            detail: detail.into(),
        }
    }

    /// Transport-level failure for a specific request URL.
    pub fn transport(provider: &str, url: &url::Url, source: reqwest::Error) -> Self {
        Self::Transport {
            provider: provider.to_owned(),
            url: url.to_string(),
            source,
        }
    }
}

/// Errors raised while mapping provider JSON into canonical data points.
///
/// Inside a record these are soft failures: the traversal logs and skips the
/// offending record. At the document level (for example a list node that is
/// present but not an array) they abort the operation.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A required field is absent or JSON null.
    #[error("required field '{field}' is missing")]
    MissingField {
        /// Dotted path of the missing field.
        field: String,
    },

    /// A field is present but not of the expected JSON type.
    #[error("field '{field}' is not {expected}")]
    MalformedField {
        /// Dotted path of the field.
        field: String,
        /// Human description of the expected shape.
        expected: &'static str,
    },

    /// The configured list node exists but is not a JSON array.
    #[error("list node '{path}' is not an array")]
    MalformedListNode {
        /// Dotted path of the list node.
        path: String,
    },

    /// A date or time field could not be parsed.
    #[error("could not parse timestamp '{value}' in field '{field}'")]
    MalformedTimestamp {
        /// Dotted path of the field.
        field: String,
        /// Raw value as found in the payload.
        value: String,
    },

    /// A time zone name was not a known IANA identifier.
    #[error("unknown time zone '{value}'")]
    UnknownTimeZone {
        /// Raw time zone value as found in the payload.
        value: String,
    },
}

impl MappingError {
    /// Required field absent or null.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Field present with the wrong JSON type.
    pub fn malformed_field(field: impl Into<String>, expected: &'static str) -> Self {
        Self::MalformedField {
            field: field.into(),
            expected,
        }
    }

    /// Unparseable date or time value.
    pub fn malformed_timestamp(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedTimestamp {
            field: field.into(),
            value: value.into(),
        }
    }
}
