// ABOUTME: Main library entry point for the Unison Health measurement retrieval engine
// ABOUTME: Normalizes health readings from consumer provider APIs into one canonical schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

#![deny(unsafe_code)]

//! # Unison Health
//!
//! A measurement retrieval engine for consumer health platforms. One request
//! descriptor fetches readings from a provider's resource API over a time
//! window and answers with either canonical data points or the provider's
//! raw payloads, behind a single stable envelope.
//!
//! ## Features
//!
//! - **Multi-provider support**: Fitbit and Withings built in, extensible
//!   through the [`providers::ProviderAdapter`] trait
//! - **Canonical schema**: weight, BMI, steps, sleep, activity, and calories
//!   normalized into versioned Open mHealth style data points
//! - **Windowed retrieval**: sensible defaults, ranged queries where the
//!   provider allows them, per-day iteration where it does not
//! - **All-or-nothing semantics**: a retrieval either completes or fails;
//!   partial results never escape
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use unison_health::credentials::AccessCredentials;
//! use unison_health::errors::ProviderResult;
//! use unison_health::providers::{global_registry, DataRequest};
//!
//! #[tokio::main]
//! async fn main() -> ProviderResult<()> {
//!     let credentials = AccessCredentials::bearer("client-id", "client-secret", "token");
//!     let request = DataRequest::normalized("weight", credentials);
//!
//!     let response = global_registry().fetch("fitbit", &request).await?;
//!     println!("empty: {}, points: {:?}", response.is_empty(), response.as_points());
//!
//!     Ok(())
//! }
//! ```

/// Provider settings loaded from the environment
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Access credentials and the store that hands them out
pub mod credentials;

/// Unified error handling system for retrieval and mapping failures
pub mod errors;

/// Shared HTTP client utilities
pub mod http;

/// Production logging and structured output
pub mod logging;

/// Payload mapping framework shared by every provider
pub mod mappers;

/// Measurement provider adapters for various services
pub mod providers;

/// Canonical measurement schema types
pub mod schema;

/// Request signing for provider APIs
pub mod signing;
