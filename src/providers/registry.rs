// ABOUTME: Adapter registry managing all measurement providers in a centralized way
// ABOUTME: Handles adapter instantiation, configuration, and lookup with proper error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use super::core::{DataRequest, DataResponse, ProviderAdapter};
use crate::errors::{ProviderError, ProviderResult};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::info;

#[cfg(any(feature = "provider-fitbit", feature = "provider-withings"))]
use crate::config::ProviderSettings;

#[cfg(feature = "provider-fitbit")]
use super::fitbit::FitbitAdapter;
#[cfg(feature = "provider-withings")]
use super::withings::WithingsAdapter;

/// Registry of every measurement provider adapter.
pub struct AdapterRegistry {
    adapters: HashMap<&'static str, Arc<dyn ProviderAdapter>>,
}

impl AdapterRegistry {
    /// Creates a registry holding the enabled built-in adapters.
    ///
    /// Adapters are configured from environment variables with fallback to
    /// hardcoded defaults; see [`ProviderSettings`](crate::config::ProviderSettings).
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            adapters: HashMap::new(),
        };

        Self::register_fitbit(&mut registry);
        Self::register_withings(&mut registry);

        // Log registered providers at startup
        let providers = registry.supported_providers().join(", ");
        info!(
            "Adapter registry initialized with {} provider(s): [{}]",
            registry.adapters.len(),
            providers
        );

        registry
    }

    /// Register the Fitbit adapter with environment-based configuration
    #[cfg(feature = "provider-fitbit")]
    fn register_fitbit(registry: &mut Self) {
        registry.register(Arc::new(FitbitAdapter::with_settings(
            ProviderSettings::fitbit_from_env(),
        )));
    }

    #[cfg(not(feature = "provider-fitbit"))]
    fn register_fitbit(_registry: &mut Self) {}

    /// Register the Withings adapter with environment-based configuration
    #[cfg(feature = "provider-withings")]
    fn register_withings(registry: &mut Self) {
        registry.register(Arc::new(WithingsAdapter::with_settings(
            ProviderSettings::withings_from_env(),
        )));
    }

    #[cfg(not(feature = "provider-withings"))]
    fn register_withings(_registry: &mut Self) {}

    /// Registers an adapter under its own provider key, replacing any
    /// previous registration of that key.
    pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) {
        self.adapters.insert(adapter.provider_key(), adapter);
    }

    /// Keys of every registered provider.
    #[must_use]
    pub fn supported_providers(&self) -> Vec<&'static str> {
        self.adapters.keys().copied().collect()
    }

    /// Whether a provider key is registered.
    #[must_use]
    pub fn is_supported(&self, provider: &str) -> bool {
        self.adapters.contains_key(provider)
    }

    /// Looks up the adapter registered under `provider`.
    ///
    /// # Errors
    /// Returns [`ProviderError::UnsupportedProvider`] for unknown keys.
    pub fn adapter(&self, provider: &str) -> ProviderResult<Arc<dyn ProviderAdapter>> {
        self.adapters
            .get(provider)
            .cloned()
            .ok_or_else(|| ProviderError::UnsupportedProvider {
                provider: provider.to_owned(),
            })
    }

    /// Runs one retrieval against the adapter registered under `provider`.
    ///
    /// # Errors
    /// Returns [`ProviderError`] when the provider is unknown or the
    /// retrieval itself fails.
    pub async fn fetch(
        &self,
        provider: &str,
        request: &DataRequest,
    ) -> ProviderResult<DataResponse> {
        self.adapter(provider)?.fetch_data(request).await
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global adapter registry instance (singleton)
///
/// Note: For test isolation, prefer creating local `AdapterRegistry::new()`
/// instances instead of using this global singleton. Tests that use the
/// global singleton will share state and cannot customize adapter
/// configuration per-test.
static REGISTRY: OnceLock<Arc<AdapterRegistry>> = OnceLock::new();

/// Get the global adapter registry
///
/// This should be used in production code for convenience. For tests
/// requiring isolation, use `AdapterRegistry::new()` directly to create
/// test-specific instances.
#[must_use]
pub fn global_registry() -> Arc<AdapterRegistry> {
    REGISTRY
        .get_or_init(|| Arc::new(AdapterRegistry::new()))
        .clone()
}

/// Convenience function to run one retrieval using the global registry
///
/// For test isolation, prefer creating a local `AdapterRegistry` instance
/// and calling `registry.fetch()` instead of using this global function.
///
/// # Errors
/// Returns [`ProviderError`] when the provider is unknown or the retrieval
/// itself fails.
pub async fn fetch(provider: &str, request: &DataRequest) -> ProviderResult<DataResponse> {
    global_registry().fetch(provider, request).await
}

/// Convenience function to check if a provider is supported
///
/// Uses the global registry. For test isolation, create a local
/// `AdapterRegistry` instance.
#[must_use]
pub fn is_provider_supported(provider: &str) -> bool {
    global_registry().is_supported(provider)
}

/// Convenience function to get all supported providers
///
/// Uses the global registry. For test isolation, create a local
/// `AdapterRegistry` instance.
#[must_use]
pub fn supported_providers() -> Vec<&'static str> {
    global_registry().supported_providers()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    #[cfg(all(feature = "provider-fitbit", feature = "provider-withings"))]
    fn built_in_adapters_are_registered() {
        use crate::constants::providers;

        let registry = AdapterRegistry::new();
        assert!(registry.is_supported(providers::FITBIT));
        assert!(registry.is_supported(providers::WITHINGS));
        assert!(!registry.is_supported("garmin"));
    }

    #[test]
    fn unknown_provider_lookup_names_the_key() {
        let registry = AdapterRegistry::new();
        let error = registry.adapter("garmin").err().unwrap();
        assert_eq!(error.to_string(), "unsupported provider 'garmin'");
    }

    #[tokio::test]
    async fn fetch_against_an_unknown_provider_fails_without_io() {
        let registry = AdapterRegistry::new();
        let request = DataRequest::normalized(
            "weight",
            crate::credentials::AccessCredentials::bearer("id", "secret", "token"),
        );
        let error = registry.fetch("garmin", &request).await.unwrap_err();
        assert!(matches!(error, ProviderError::UnsupportedProvider { .. }));
    }
}
