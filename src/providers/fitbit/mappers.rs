// ABOUTME: Mappers from Fitbit resource API payloads into canonical data points
// ABOUTME: Fitbit reports user-local times with no offset; readings are interpreted as UTC
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use crate::constants::source_names;
use crate::errors::MappingError;
use crate::mappers::support::{
    assume_utc, optional_f64, optional_i64, optional_local_date, optional_local_date_time,
    optional_local_time, optional_node, required_f64, required_local_date, required_local_time,
    required_str, required_u64,
};
use crate::mappers::DataPointMapper;
use crate::schema::{
    BodyMassIndex, BodyMassIndexUnit, BodyMassIndexUnitValue, BodyWeight, DataPoint, DurationUnit,
    DurationUnitValue, LengthUnit, LengthUnitValue, MassUnit, MassUnitValue, PhysicalActivity,
    SleepDuration, StepCount, TimeInterval,
};
use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

fn external_log_id(record: &Value) -> Option<String> {
    optional_i64(record, "logId").map(|id| id.to_string())
}

/// Maps `body/log/weight` entries into body weight points.
pub struct FitbitBodyWeightMapper;

impl DataPointMapper for FitbitBodyWeightMapper {
    fn source_name(&self) -> &'static str {
        source_names::FITBIT_RESOURCE_API
    }

    fn list_node_path(&self) -> &'static [&'static str] {
        &["weight"]
    }

    fn map_record(
        &self,
        _document: &Value,
        record: &Value,
    ) -> Result<Option<DataPoint>, MappingError> {
        let weight = required_f64(record, "weight")?;
        let date = required_local_date(record, "date")?;
        let time = optional_local_time(record, "time").unwrap_or(NaiveTime::MIN);
        let measure = BodyWeight::new(MassUnitValue::new(MassUnit::Kilogram, weight))
            .with_effective_time_frame(assume_utc(date.and_time(time)));
        Ok(Some(DataPoint::sensed(
            self.source_name(),
            external_log_id(record),
            measure.into(),
        )))
    }
}

/// Maps `body/log/weight` entries into body mass index points.
pub struct FitbitBodyMassIndexMapper;

impl DataPointMapper for FitbitBodyMassIndexMapper {
    fn source_name(&self) -> &'static str {
        source_names::FITBIT_RESOURCE_API
    }

    fn list_node_path(&self) -> &'static [&'static str] {
        &["weight"]
    }

    fn map_record(
        &self,
        _document: &Value,
        record: &Value,
    ) -> Result<Option<DataPoint>, MappingError> {
        let index = required_f64(record, "bmi")?;
        let date = required_local_date(record, "date")?;
        let time = optional_local_time(record, "time").unwrap_or(NaiveTime::MIN);
        let measure = BodyMassIndex::new(BodyMassIndexUnitValue::new(
            BodyMassIndexUnit::KilogramsPerSquareMeter,
            index,
        ))
        .with_effective_time_frame(assume_utc(date.and_time(time)));
        Ok(Some(DataPoint::sensed(
            self.source_name(),
            external_log_id(record),
            measure.into(),
        )))
    }
}

/// Maps sleep log entries into sleep duration points.
pub struct FitbitSleepDurationMapper;

impl DataPointMapper for FitbitSleepDurationMapper {
    fn source_name(&self) -> &'static str {
        source_names::FITBIT_RESOURCE_API
    }

    fn list_node_path(&self) -> &'static [&'static str] {
        &["sleep"]
    }

    fn map_record(
        &self,
        _document: &Value,
        record: &Value,
    ) -> Result<Option<DataPoint>, MappingError> {
        let minutes_asleep = required_f64(record, "minutesAsleep")?;
        let measure = SleepDuration::new(DurationUnitValue::new(
            DurationUnit::Minute,
            minutes_asleep,
        ));

        // Prefer the full episode interval; fall back to the start instant,
        // and omit the time frame entirely when no start is reported.
        let measure = match optional_local_date_time(record, "startTime") {
            Some(start) => {
                let start = assume_utc(start);
                match optional_f64(record, "timeInBed") {
                    Some(minutes_in_bed) => {
                        measure.with_effective_time_frame(TimeInterval::of_start_and_duration(
                            start,
                            DurationUnitValue::new(DurationUnit::Minute, minutes_in_bed),
                        ))
                    }
                    None => measure.with_effective_time_frame(start),
                }
            }
            None => measure,
        };

        Ok(Some(DataPoint::sensed(
            self.source_name(),
            external_log_id(record),
            measure.into(),
        )))
    }
}

/// Maps daily step time series entries into day-long step count points.
pub struct FitbitStepCountMapper;

impl DataPointMapper for FitbitStepCountMapper {
    fn source_name(&self) -> &'static str {
        source_names::FITBIT_RESOURCE_API
    }

    fn list_node_path(&self) -> &'static [&'static str] {
        &["activities-steps"]
    }

    fn map_record(
        &self,
        _document: &Value,
        record: &Value,
    ) -> Result<Option<DataPoint>, MappingError> {
        let steps = required_u64(record, "value")?;
        // The time series reports a zero entry for every day without steps.
        if steps == 0 {
            return Ok(None);
        }
        let date = required_local_date(record, "dateTime")?;
        let start = assume_utc(date.and_time(NaiveTime::MIN));
        let measure = StepCount::new(steps).with_effective_time_frame(
            TimeInterval::of_start_and_duration(
                start,
                DurationUnitValue::new(DurationUnit::Day, 1.0),
            ),
        );
        Ok(Some(DataPoint::sensed(self.source_name(), None, measure.into())))
    }
}

/// Maps minute-resolution intraday step entries into step count points.
///
/// The calendar date lives in the sibling `activities-steps` summary, not in
/// the intraday records themselves.
pub struct FitbitIntradayStepCountMapper;

fn intraday_date(document: &Value) -> Result<NaiveDate, MappingError> {
    let summary = optional_node(document, "activities-steps")
        .and_then(Value::as_array)
        .and_then(|summaries| summaries.first())
        .ok_or_else(|| MappingError::missing_field("activities-steps[0]"))?;
    required_local_date(summary, "dateTime")
}

impl DataPointMapper for FitbitIntradayStepCountMapper {
    fn source_name(&self) -> &'static str {
        source_names::FITBIT_RESOURCE_API
    }

    fn list_node_path(&self) -> &'static [&'static str] {
        &["activities-steps-intraday", "dataset"]
    }

    fn map_record(
        &self,
        document: &Value,
        record: &Value,
    ) -> Result<Option<DataPoint>, MappingError> {
        let steps = required_u64(record, "value")?;
        if steps == 0 {
            return Ok(None);
        }
        let date = intraday_date(document)?;
        let time = required_local_time(record, "time")?;
        let start = assume_utc(date.and_time(time));
        let measure = StepCount::new(steps).with_effective_time_frame(
            TimeInterval::of_start_and_duration(
                start,
                DurationUnitValue::new(DurationUnit::Minute, 1.0),
            ),
        );
        Ok(Some(DataPoint::sensed(self.source_name(), None, measure.into())))
    }
}

/// Maps activity log entries into physical activity points.
pub struct FitbitPhysicalActivityMapper;

impl DataPointMapper for FitbitPhysicalActivityMapper {
    fn source_name(&self) -> &'static str {
        source_names::FITBIT_RESOURCE_API
    }

    fn list_node_path(&self) -> &'static [&'static str] {
        &["activities"]
    }

    fn map_record(
        &self,
        _document: &Value,
        record: &Value,
    ) -> Result<Option<DataPoint>, MappingError> {
        let name = required_str(record, "name")?;
        let mut measure = PhysicalActivity::new(name);

        if let Some(distance) = optional_f64(record, "distance") {
            measure = measure.with_distance(LengthUnitValue::new(LengthUnit::Kilometer, distance));
        }

        if let Some(date) = optional_local_date(record, "startDate") {
            let time = optional_local_time(record, "startTime").unwrap_or(NaiveTime::MIN);
            let start = assume_utc(date.and_time(time));
            measure = match optional_f64(record, "duration") {
                Some(milliseconds) => {
                    measure.with_effective_time_frame(TimeInterval::of_start_and_duration(
                        start,
                        DurationUnitValue::new(DurationUnit::Millisecond, milliseconds),
                    ))
                }
                None => measure.with_effective_time_frame(start),
            };
        }

        Ok(Some(DataPoint::sensed(
            self.source_name(),
            external_log_id(record),
            measure.into(),
        )))
    }
}
