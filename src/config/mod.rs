// ABOUTME: Configuration management for provider connection settings
// ABOUTME: Environment variables are read once at registry construction and injected into adapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

//! Centralized configuration management.
//!
//! Adapters never read the environment themselves: the registry loads
//! [`ProviderSettings`] once and injects them, so tests can construct
//! adapters against local mock servers without touching process state.

/// Environment-backed provider settings.
pub mod environment;

pub use environment::ProviderSettings;
