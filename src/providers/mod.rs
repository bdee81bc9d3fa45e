// ABOUTME: Measurement provider integrations for external health platforms
// ABOUTME: Unifies Fitbit, Withings, and future providers behind one adapter contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

//! # Provider Adapters
//!
//! Each provider module pairs an adapter (catalog, endpoint templates,
//! windowing policy) with the mappers that normalize its payloads. The
//! [`registry`] wires the enabled adapters together behind string provider
//! keys; [`core`](self::core) holds the request/response contract they all
//! share.

/// Shared request/response contract and the adapter trait.
pub mod core;
/// Adapter registry and global lookup.
pub mod registry;
/// Window resolution, day iteration, and aggregation.
pub mod windowing;

#[cfg(feature = "provider-fitbit")]
pub mod fitbit;
#[cfg(feature = "provider-withings")]
pub mod withings;

pub use self::core::{DataRequest, DataResponse, ProviderAdapter, ResponseBody};
pub use registry::{global_registry, AdapterRegistry};
pub use windowing::DateWindow;
