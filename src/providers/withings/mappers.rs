// ABOUTME: Mappers from Withings resource API payloads into canonical data points
// ABOUTME: Body measures carry scaled integers and epoch seconds; activity summaries carry IANA zones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use crate::constants::source_names;
use crate::errors::MappingError;
use crate::mappers::support::{
    optional_i64, required_epoch_seconds, required_f64, required_local_date, required_node,
    required_str, required_u64,
};
use crate::mappers::DataPointMapper;
use crate::schema::{
    BodyWeight, CaloriesBurned, DataPoint, EnergyUnit, EnergyUnitValue, MassUnit, MassUnitValue,
    Modality, StepCount, TimeInterval,
};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde_json::Value;

/// Withings measure type for body weight within a measure group.
const WEIGHT_MEASURE_TYPE: i64 = 1;

/// Measure groups of this category are user goals, not readings.
const GOAL_CATEGORY: i64 = 2;

/// Attribution values meaning the reading was typed in by the user.
const SELF_REPORTED_ATTRIBS: [i64; 2] = [2, 4];

fn group_id(record: &Value) -> Option<String> {
    optional_i64(record, "grpid").map(|id| id.to_string())
}

fn group_modality(record: &Value) -> Modality {
    match optional_i64(record, "attrib") {
        Some(attrib) if SELF_REPORTED_ATTRIBS.contains(&attrib) => Modality::SelfReported,
        _ => Modality::Sensed,
    }
}

/// Resolves local midnight of `date` in `tz`, honoring the zone's offset on
/// that day.
///
/// Zones that jump forward at midnight (Chile, Lebanon) have no 00:00 on the
/// transition day; the day then starts when the clock resumes, one hour in.
fn local_midnight(tz: Tz, date: NaiveDate) -> Result<DateTime<FixedOffset>, MappingError> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|date_time| date_time.fixed_offset())
        .ok_or_else(|| MappingError::malformed_timestamp("date", date.to_string()))
}

/// Builds the calendar-day interval an activity summary covers, in the
/// record's own time zone.
fn activity_day_interval(record: &Value) -> Result<TimeInterval, MappingError> {
    let date = required_local_date(record, "date")?;
    let zone = required_str(record, "timezone")?;
    let tz: Tz = zone.parse().map_err(|_| MappingError::UnknownTimeZone {
        value: zone.to_owned(),
    })?;
    let next_date = date
        .succ_opt()
        .ok_or_else(|| MappingError::malformed_timestamp("date", date.to_string()))?;
    Ok(TimeInterval::of_start_and_end(
        local_midnight(tz, date)?,
        local_midnight(tz, next_date)?,
    ))
}

/// Maps `getmeas` measure groups into body weight points.
///
/// A group holds several measures distinguished by `type`; values are scaled
/// integers, with `unit` carrying the power of ten to restore the decimal.
pub struct WithingsBodyWeightMapper;

impl DataPointMapper for WithingsBodyWeightMapper {
    fn source_name(&self) -> &'static str {
        source_names::WITHINGS_RESOURCE_API
    }

    fn list_node_path(&self) -> &'static [&'static str] {
        &["body", "measuregrps"]
    }

    fn map_record(
        &self,
        _document: &Value,
        record: &Value,
    ) -> Result<Option<DataPoint>, MappingError> {
        if optional_i64(record, "category") == Some(GOAL_CATEGORY) {
            return Ok(None);
        }
        let measures = required_node(record, "measures")?
            .as_array()
            .ok_or_else(|| MappingError::malformed_field("measures", "an array"))?;
        let Some(weight) = measures
            .iter()
            .find(|measure| optional_i64(measure, "type") == Some(WEIGHT_MEASURE_TYPE))
        else {
            return Ok(None);
        };

        let value = required_f64(weight, "value")?;
        let exponent = optional_i64(weight, "unit").unwrap_or(0);
        let kilograms = value * 10f64.powi(i32::try_from(exponent).unwrap_or(0));

        let taken_at = required_epoch_seconds(record, "date")?;
        let measure = BodyWeight::new(MassUnitValue::new(MassUnit::Kilogram, kilograms))
            .with_effective_time_frame(taken_at.fixed_offset());
        Ok(Some(DataPoint::new(
            self.source_name(),
            group_modality(record),
            group_id(record),
            measure.into(),
        )))
    }
}

/// Maps `getactivity` daily summaries into step count points.
pub struct WithingsDailyStepCountMapper;

impl DataPointMapper for WithingsDailyStepCountMapper {
    fn source_name(&self) -> &'static str {
        source_names::WITHINGS_RESOURCE_API
    }

    fn list_node_path(&self) -> &'static [&'static str] {
        &["body", "activities"]
    }

    fn map_record(
        &self,
        _document: &Value,
        record: &Value,
    ) -> Result<Option<DataPoint>, MappingError> {
        let steps = required_u64(record, "steps")?;
        let measure =
            StepCount::new(steps).with_effective_time_frame(activity_day_interval(record)?);
        Ok(Some(DataPoint::sensed(self.source_name(), None, measure.into())))
    }
}

/// Maps `getactivity` daily summaries into calories burned points.
pub struct WithingsDailyCaloriesBurnedMapper;

impl DataPointMapper for WithingsDailyCaloriesBurnedMapper {
    fn source_name(&self) -> &'static str {
        source_names::WITHINGS_RESOURCE_API
    }

    fn list_node_path(&self) -> &'static [&'static str] {
        &["body", "activities"]
    }

    fn map_record(
        &self,
        _document: &Value,
        record: &Value,
    ) -> Result<Option<DataPoint>, MappingError> {
        let calories = required_f64(record, "calories")?;
        let measure = CaloriesBurned::new(EnergyUnitValue::new(EnergyUnit::Kilocalorie, calories))
            .with_effective_time_frame(activity_day_interval(record)?);
        Ok(Some(DataPoint::sensed(self.source_name(), None, measure.into())))
    }
}
