// ABOUTME: Shared HTTP client utilities with connection pooling and timeout configuration
// ABOUTME: Adapters reuse one pooled client instead of building their own per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;

/// Global shared HTTP client with default configuration.
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or create the shared HTTP client with default settings.
///
/// The client uses connection pooling and reasonable timeouts. Prefer this
/// over creating new clients so adapters share one pool.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Create a new HTTP client with custom timeout settings.
///
/// Use this when an adapter needs timeouts that differ from the shared
/// client defaults. Falls back to a default client if construction fails.
#[must_use]
pub fn client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_client_is_a_single_instance() {
        assert!(std::ptr::eq(shared_client(), shared_client()));
    }

    #[test]
    fn custom_timeout_client_builds() {
        let _client = client_with_timeout(5, 2);
    }
}
