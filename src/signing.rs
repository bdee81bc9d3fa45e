// ABOUTME: Request signing seam turning outgoing requests into authenticated ones
// ABOUTME: Bearer token auth ships as the default; other schemes plug in behind the same trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use crate::credentials::AccessCredentials;
use crate::errors::{ProviderError, ProviderResult};
use reqwest::RequestBuilder;

/// Attaches authentication material to an outgoing request.
///
/// Signing runs before the request is sent, so an unusable credential set
/// fails the operation without any network traffic.
pub trait RequestSigner: Send + Sync {
    /// Returns the request with authentication attached.
    ///
    /// # Errors
    /// Returns [`ProviderError::MissingCredentials`] when the credentials
    /// cannot produce a valid signature.
    fn sign(
        &self,
        provider: &str,
        request: RequestBuilder,
        credentials: &AccessCredentials,
    ) -> ProviderResult<RequestBuilder>;
}

/// Signs requests with an `Authorization: Bearer` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerTokenSigner;

impl RequestSigner for BearerTokenSigner {
    fn sign(
        &self,
        provider: &str,
        request: RequestBuilder,
        credentials: &AccessCredentials,
    ) -> ProviderResult<RequestBuilder> {
        let token = credentials
            .access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ProviderError::missing_credentials(provider, "no access token available")
            })?;
        Ok(request.bearer_auth(token))
    }
}
