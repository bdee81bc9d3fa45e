// ABOUTME: Access credential types and the pluggable store that supplies them per user and provider
// ABOUTME: Credential acquisition lives outside the engine; retrieval only consumes what a store hands it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use crate::errors::{ProviderError, ProviderResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Credentials authenticating one user's requests against one provider.
///
/// The engine never negotiates or refreshes tokens; it presents whatever the
/// store supplies and fails fast when the material is unusable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessCredentials {
    /// OAuth access token presented on every request.
    pub access_token: Option<String>,
    /// Token secret, for providers whose signing scheme needs one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_secret: Option<String>,
    /// Application client identifier.
    pub client_id: String,
    /// Application client secret.
    pub client_secret: String,
}

impl AccessCredentials {
    /// Bearer-style credentials carrying only an access token.
    #[must_use]
    pub fn bearer(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            access_token: Some(access_token.into()),
            token_secret: None,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// Supplies stored credentials for `(user, provider)` pairs.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Looks up the credentials for one user on one provider.
    ///
    /// # Errors
    /// Returns [`ProviderError::MissingCredentials`] when nothing is stored.
    async fn credentials_for(
        &self,
        user_id: &str,
        provider: &str,
    ) -> ProviderResult<AccessCredentials>;
}

/// In-memory credential store for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: HashMap<(String, String), AccessCredentials>,
}

impl MemoryCredentialStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores credentials for a `(user, provider)` pair, replacing any
    /// previous entry.
    pub fn insert(
        &mut self,
        user_id: impl Into<String>,
        provider: impl Into<String>,
        credentials: AccessCredentials,
    ) {
        self.entries
            .insert((user_id.into(), provider.into()), credentials);
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn credentials_for(
        &self,
        user_id: &str,
        provider: &str,
    ) -> ProviderResult<AccessCredentials> {
        self.entries
            .get(&(user_id.to_owned(), provider.to_owned()))
            .cloned()
            .ok_or_else(|| {
                ProviderError::missing_credentials(
                    provider,
                    format!("no credentials stored for user '{user_id}'"),
                )
            })
    }
}
