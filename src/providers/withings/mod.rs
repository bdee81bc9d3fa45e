// ABOUTME: Withings provider module exposing the adapter, catalog, and payload mappers
// ABOUTME: Weight comes from scaled body measure groups; steps and calories from daily summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

//! Withings provider integration.
//!
//! The catalog serves `body_weight`, `calories`, and `steps`, all through
//! range queries. Withings signals failures inside a successful HTTP
//! response via an application status field, which the adapter checks
//! before mapping.

/// Payload mappers for each catalog entry.
pub mod mappers;
/// The adapter and its data type catalog.
pub mod provider;

pub use provider::{WithingsAdapter, WithingsDataType};
