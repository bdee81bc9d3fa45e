// ABOUTME: Typed JSON accessors shared by all data point mappers
// ABOUTME: Required accessors fail with field context, optional accessors log and yield None
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use crate::errors::MappingError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;
use tracing::warn;

/// Child node that must be present and non-null.
///
/// # Errors
/// Returns [`MappingError::MissingField`] when the field is absent or null.
pub fn required_node<'a>(parent: &'a Value, field: &str) -> Result<&'a Value, MappingError> {
    match parent.get(field) {
        Some(node) if !node.is_null() => Ok(node),
        _ => Err(MappingError::missing_field(field)),
    }
}

/// Child node when present and non-null.
#[must_use]
pub fn optional_node<'a>(parent: &'a Value, field: &str) -> Option<&'a Value> {
    parent.get(field).filter(|node| !node.is_null())
}

// Providers are inconsistent about numeric types: Fitbit time series report
// counts as JSON strings. Numeric accessors therefore coerce numeric text.
fn node_as_f64(node: &Value) -> Option<f64> {
    node.as_f64()
        .or_else(|| node.as_str().and_then(|text| text.parse().ok()))
}

fn node_as_i64(node: &Value) -> Option<i64> {
    node.as_i64()
        .or_else(|| node.as_str().and_then(|text| text.parse().ok()))
}

fn node_as_u64(node: &Value) -> Option<u64> {
    node.as_u64()
        .or_else(|| node.as_str().and_then(|text| text.parse().ok()))
}

/// Required numeric field, coercing numeric text.
///
/// # Errors
/// Returns [`MappingError`] when the field is absent or not a number.
pub fn required_f64(parent: &Value, field: &str) -> Result<f64, MappingError> {
    node_as_f64(required_node(parent, field)?)
        .ok_or_else(|| MappingError::malformed_field(field, "a number"))
}

/// Optional numeric field; malformed values are logged and dropped.
#[must_use]
pub fn optional_f64(parent: &Value, field: &str) -> Option<f64> {
    let node = optional_node(parent, field)?;
    let parsed = node_as_f64(node);
    if parsed.is_none() {
        warn!("ignoring field '{field}' that is not a number");
    }
    parsed
}

/// Required signed integer field, coercing numeric text.
///
/// # Errors
/// Returns [`MappingError`] when the field is absent or not an integer.
pub fn required_i64(parent: &Value, field: &str) -> Result<i64, MappingError> {
    node_as_i64(required_node(parent, field)?)
        .ok_or_else(|| MappingError::malformed_field(field, "an integer"))
}

/// Optional signed integer field; malformed values are logged and dropped.
#[must_use]
pub fn optional_i64(parent: &Value, field: &str) -> Option<i64> {
    let node = optional_node(parent, field)?;
    let parsed = node_as_i64(node);
    if parsed.is_none() {
        warn!("ignoring field '{field}' that is not an integer");
    }
    parsed
}

/// Required unsigned integer field, coercing numeric text.
///
/// # Errors
/// Returns [`MappingError`] when the field is absent or not a non-negative integer.
pub fn required_u64(parent: &Value, field: &str) -> Result<u64, MappingError> {
    node_as_u64(required_node(parent, field)?)
        .ok_or_else(|| MappingError::malformed_field(field, "a non-negative integer"))
}

/// Required string field.
///
/// # Errors
/// Returns [`MappingError`] when the field is absent or not a string.
pub fn required_str<'a>(parent: &'a Value, field: &str) -> Result<&'a str, MappingError> {
    required_node(parent, field)?
        .as_str()
        .ok_or_else(|| MappingError::malformed_field(field, "a string"))
}

/// Optional string field; non-string values are logged and dropped.
#[must_use]
pub fn optional_str<'a>(parent: &'a Value, field: &str) -> Option<&'a str> {
    let node = optional_node(parent, field)?;
    let parsed = node.as_str();
    if parsed.is_none() {
        warn!("ignoring field '{field}' that is not a string");
    }
    parsed
}

/// Required calendar date in `YYYY-MM-DD` form.
///
/// # Errors
/// Returns [`MappingError`] when the field is absent or unparseable.
pub fn required_local_date(parent: &Value, field: &str) -> Result<NaiveDate, MappingError> {
    let text = required_str(parent, field)?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| MappingError::malformed_timestamp(field, text))
}

/// Optional calendar date; malformed values are logged and dropped.
#[must_use]
pub fn optional_local_date(parent: &Value, field: &str) -> Option<NaiveDate> {
    let text = optional_str(parent, field)?;
    let parsed = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok();
    if parsed.is_none() {
        warn!("ignoring field '{field}' that is not a calendar date");
    }
    parsed
}

/// Required wall-clock time, with or without seconds.
///
/// # Errors
/// Returns [`MappingError`] when the field is absent or unparseable.
pub fn required_local_time(parent: &Value, field: &str) -> Result<NaiveTime, MappingError> {
    let text = required_str(parent, field)?;
    parse_local_time(text).ok_or_else(|| MappingError::malformed_timestamp(field, text))
}

/// Optional wall-clock time; malformed values are logged and dropped.
#[must_use]
pub fn optional_local_time(parent: &Value, field: &str) -> Option<NaiveTime> {
    let text = optional_str(parent, field)?;
    let parsed = parse_local_time(text);
    if parsed.is_none() {
        warn!("ignoring field '{field}' that is not a wall-clock time");
    }
    parsed
}

fn parse_local_time(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .ok()
}

/// Optional local date-time in ISO form, with or without fractional seconds.
#[must_use]
pub fn optional_local_date_time(parent: &Value, field: &str) -> Option<NaiveDateTime> {
    let text = optional_str(parent, field)?;
    let parsed = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok();
    if parsed.is_none() {
        warn!("ignoring field '{field}' that is not a local date-time");
    }
    parsed
}

/// Required Unix timestamp in whole seconds.
///
/// # Errors
/// Returns [`MappingError`] when the field is absent or out of range.
pub fn required_epoch_seconds(parent: &Value, field: &str) -> Result<DateTime<Utc>, MappingError> {
    let seconds = required_i64(parent, field)?;
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| MappingError::malformed_timestamp(field, seconds.to_string()))
}

/// Interprets a local date-time as UTC.
///
/// Convention for providers that report user-local timestamps with no offset
/// information: the reading keeps its wall-clock value and gains a zero offset.
#[must_use]
pub fn assume_utc(date_time: NaiveDateTime) -> DateTime<FixedOffset> {
    date_time.and_utc().fixed_offset()
}
