// ABOUTME: Central constants for provider keys, API bases, source names, and environment variables
// ABOUTME: Single source of truth so adapters, registry, and configuration never drift apart
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

/// Stable provider keys used for registry lookup and envelope tagging.
pub mod providers {
    /// Fitbit provider key.
    pub const FITBIT: &str = "fitbit";
    /// Withings provider key.
    pub const WITHINGS: &str = "withings";
}

/// Default production API base URLs, overridable per adapter for testing.
pub mod api {
    /// Fitbit resource API base.
    pub const FITBIT_BASE_URL: &str = "https://api.fitbit.com";
    /// Withings body scale API base.
    pub const WITHINGS_BASE_URL: &str = "https://wbsapi.withings.net";
}

/// Source names stamped into canonical data point headers.
pub mod source_names {
    /// Header source name for points mapped from the Fitbit resource API.
    pub const FITBIT_RESOURCE_API: &str = "Fitbit Resource API";
    /// Header source name for points mapped from the Withings resource API.
    pub const WITHINGS_RESOURCE_API: &str = "Withings Resource API";
}

/// Environment variable names read by [`crate::config`].
pub mod env {
    /// Override for the Fitbit API base URL.
    pub const FITBIT_API_BASE_URL: &str = "UNISON_FITBIT_API_BASE_URL";
    /// Flag enabling the Fitbit partner (intraday) access tier.
    pub const FITBIT_PARTNER_ACCESS: &str = "UNISON_FITBIT_PARTNER_ACCESS";
    /// Override for the Withings API base URL.
    pub const WITHINGS_API_BASE_URL: &str = "UNISON_WITHINGS_API_BASE_URL";
}
