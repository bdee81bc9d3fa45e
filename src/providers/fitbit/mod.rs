// ABOUTME: Fitbit provider module exposing the adapter, catalog, and payload mappers
// ABOUTME: Weight and BMI come from the weight log; sleep, steps, and activities from daily logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

//! Fitbit provider integration.
//!
//! The catalog serves `weight`, `body_mass_index`, `sleep`, `steps`, and
//! `activity`. Weight and BMI windows go out as one ranged request; the
//! day-scoped types are fetched per calendar day and aggregated. On the
//! partner access tier, step retrieval switches to minute-resolution
//! intraday queries.

/// Payload mappers for each catalog entry.
pub mod mappers;
/// The adapter and its data type catalog.
pub mod provider;

pub use provider::{FitbitAdapter, FitbitDataType};
