// ABOUTME: Unit tests for environment-backed provider settings
// ABOUTME: Validates production defaults, overrides, and access tier flag parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use unison_health::config::ProviderSettings;
use unison_health::constants::env as env_names;

fn clear_provider_env() {
    env::remove_var(env_names::FITBIT_API_BASE_URL);
    env::remove_var(env_names::FITBIT_PARTNER_ACCESS);
    env::remove_var(env_names::WITHINGS_API_BASE_URL);
}

#[test]
#[serial]
fn test_fitbit_settings_default_to_the_production_api() {
    clear_provider_env();

    let settings = ProviderSettings::fitbit_from_env();

    assert_eq!(settings.api_base_url, "https://api.fitbit.com");
    assert!(!settings.partner_access);
}

#[test]
#[serial]
fn test_fitbit_settings_honor_environment_overrides() {
    clear_provider_env();
    env::set_var(env_names::FITBIT_API_BASE_URL, "http://127.0.0.1:9100");
    env::set_var(env_names::FITBIT_PARTNER_ACCESS, "true");

    let settings = ProviderSettings::fitbit_from_env();

    assert_eq!(settings.api_base_url, "http://127.0.0.1:9100");
    assert!(settings.partner_access);

    clear_provider_env();
}

#[test]
#[serial]
fn test_withings_settings_default_to_the_production_api() {
    clear_provider_env();

    let settings = ProviderSettings::withings_from_env();

    assert_eq!(settings.api_base_url, "https://wbsapi.withings.net");
    assert!(!settings.partner_access);
}

#[test]
#[serial]
fn test_withings_settings_honor_the_base_url_override() {
    clear_provider_env();
    env::set_var(env_names::WITHINGS_API_BASE_URL, "http://127.0.0.1:9200");

    let settings = ProviderSettings::withings_from_env();

    assert_eq!(settings.api_base_url, "http://127.0.0.1:9200");

    clear_provider_env();
}

#[test]
#[serial]
fn test_partner_access_flag_parses_leniently() {
    clear_provider_env();

    for (value, expected) in [("1", true), ("on", true), ("0", false), ("banana", false)] {
        env::set_var(env_names::FITBIT_PARTNER_ACCESS, value);
        assert_eq!(
            ProviderSettings::fitbit_from_env().partner_access,
            expected,
            "flag value {value:?}"
        );
    }

    clear_provider_env();
}

#[test]
fn test_builder_settings_start_on_the_standard_tier() {
    let settings = ProviderSettings::new("http://127.0.0.1:9300");

    assert_eq!(settings.api_base_url, "http://127.0.0.1:9300");
    assert!(!settings.partner_access);
    assert!(ProviderSettings::new("x").with_partner_access(true).partner_access);
}
