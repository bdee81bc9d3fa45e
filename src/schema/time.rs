// ABOUTME: Canonical time frame types anchoring every measurement to an instant or interval
// ABOUTME: Intervals always carry their start, never an open or end-only span
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use super::units::DurationUnitValue;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize, Serializer};

/// Serializes an instant as RFC 3339 with a literal `Z` for zero offsets.
///
/// Chrono's default would render UTC instants with `+00:00`; the canonical
/// schema writes `Z` and keeps non-zero offsets as reported.
fn serialize_instant<S>(date_time: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date_time.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// An interval of time, always anchored at its start.
///
/// The two representations mirror how providers report spans: either a start
/// plus an explicit length, or a pair of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeInterval {
    /// A start instant plus how long the interval lasted.
    StartAndDuration {
        /// Interval start.
        #[serde(rename = "start_date_time", serialize_with = "serialize_instant")]
        start: DateTime<FixedOffset>,
        /// Interval length.
        duration: DurationUnitValue,
    },
    /// Explicit start and end instants.
    StartAndEnd {
        /// Interval start.
        #[serde(rename = "start_date_time", serialize_with = "serialize_instant")]
        start: DateTime<FixedOffset>,
        /// Interval end.
        #[serde(rename = "end_date_time", serialize_with = "serialize_instant")]
        end: DateTime<FixedOffset>,
    },
}

impl TimeInterval {
    /// Builds an interval from its start and an explicit duration.
    #[must_use]
    pub const fn of_start_and_duration(
        start: DateTime<FixedOffset>,
        duration: DurationUnitValue,
    ) -> Self {
        Self::StartAndDuration { start, duration }
    }

    /// Builds an interval from explicit start and end instants.
    #[must_use]
    pub const fn of_start_and_end(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self::StartAndEnd { start, end }
    }

    /// The instant the interval begins.
    #[must_use]
    pub const fn start(&self) -> DateTime<FixedOffset> {
        match self {
            Self::StartAndDuration { start, .. } | Self::StartAndEnd { start, .. } => *start,
        }
    }
}

/// When a measurement took effect: a single instant or an interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimeFrame {
    /// A single point in time.
    #[serde(rename = "date_time", serialize_with = "serialize_instant")]
    DateTime(DateTime<FixedOffset>),
    /// A span of time.
    #[serde(rename = "time_interval")]
    TimeInterval(TimeInterval),
}

impl TimeFrame {
    /// A time frame covering a single instant.
    #[must_use]
    pub const fn instant(date_time: DateTime<FixedOffset>) -> Self {
        Self::DateTime(date_time)
    }

    /// A time frame covering an interval.
    #[must_use]
    pub const fn interval(interval: TimeInterval) -> Self {
        Self::TimeInterval(interval)
    }

    /// The earliest instant the frame covers.
    #[must_use]
    pub const fn start(&self) -> DateTime<FixedOffset> {
        match self {
            Self::DateTime(date_time) => *date_time,
            Self::TimeInterval(interval) => interval.start(),
        }
    }
}

impl From<DateTime<FixedOffset>> for TimeFrame {
    fn from(date_time: DateTime<FixedOffset>) -> Self {
        Self::DateTime(date_time)
    }
}

impl From<TimeInterval> for TimeFrame {
    fn from(interval: TimeInterval) -> Self {
        Self::TimeInterval(interval)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::units::DurationUnit;
    use serde_json::json;

    fn instant(text: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(text).unwrap()
    }

    #[test]
    fn instant_frame_serializes_as_date_time() {
        let frame = TimeFrame::instant(instant("2014-11-12T23:59:59Z"));
        assert_eq!(
            serde_json::to_value(frame).unwrap(),
            json!({"date_time": "2014-11-12T23:59:59Z"})
        );
    }

    #[test]
    fn duration_interval_serializes_with_start_and_length() {
        let frame = TimeFrame::interval(TimeInterval::of_start_and_duration(
            instant("2014-08-20T00:00:00Z"),
            DurationUnitValue::new(DurationUnit::Day, 1.0),
        ));
        assert_eq!(
            serde_json::to_value(frame).unwrap(),
            json!({
                "time_interval": {
                    "start_date_time": "2014-08-20T00:00:00Z",
                    "duration": {"value": 1.0, "unit": "d"}
                }
            })
        );
    }

    #[test]
    fn bounded_interval_round_trips() {
        let interval = TimeInterval::of_start_and_end(
            instant("2015-06-18T00:00:00-07:00"),
            instant("2015-06-19T00:00:00-07:00"),
        );
        let value = serde_json::to_value(interval).unwrap();
        let back: TimeInterval = serde_json::from_value(value).unwrap();
        assert_eq!(back, interval);
        assert_eq!(back.start(), instant("2015-06-18T00:00:00-07:00"));
    }
}
