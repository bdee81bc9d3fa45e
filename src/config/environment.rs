// ABOUTME: Environment-based provider settings for deployment-specific configuration
// ABOUTME: Base URLs and access tiers load once at registry construction, never per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use crate::constants::{api, env as env_vars};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Connection settings for one provider adapter.
///
/// Base URLs default to the production APIs and can be redirected through
/// environment variables, which is also how tests point adapters at local
/// mock servers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Base URL of the provider's resource API.
    pub api_base_url: String,
    /// Whether the application is on the provider's partner access tier.
    ///
    /// Fitbit grants partner applications intraday resolution; the flag is
    /// meaningless for providers without tiers and stays false there.
    pub partner_access: bool,
}

impl ProviderSettings {
    /// Settings pointing at a given API base, standard access tier.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            partner_access: false,
        }
    }

    /// Overrides the access tier.
    #[must_use]
    pub const fn with_partner_access(mut self, partner_access: bool) -> Self {
        self.partner_access = partner_access;
        self
    }

    /// Fitbit settings from the environment, with production defaults.
    #[must_use]
    pub fn fitbit_from_env() -> Self {
        Self {
            api_base_url: env_var_or(env_vars::FITBIT_API_BASE_URL, api::FITBIT_BASE_URL),
            partner_access: env_flag(env_vars::FITBIT_PARTNER_ACCESS),
        }
    }

    /// Withings settings from the environment, with production defaults.
    #[must_use]
    pub fn withings_from_env() -> Self {
        Self {
            api_base_url: env_var_or(env_vars::WITHINGS_API_BASE_URL, api::WITHINGS_BASE_URL),
            partner_access: false,
        }
    }
}

fn env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn env_flag(name: &str) -> bool {
    env::var(name).map_or(false, |value| parse_flag(name, &value))
}

fn parse_flag(name: &str, value: &str) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "" | "0" | "false" | "no" | "off" => false,
        other => {
            warn!("unrecognized boolean '{other}' in {name}, treating as false");
            false
        }
    }
}
