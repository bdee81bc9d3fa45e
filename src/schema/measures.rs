// ABOUTME: Typed measure bodies for the canonical schema families produced by mappers
// ABOUTME: The Measure enum binds each body to its schema identifier in one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use super::data_point::SchemaId;
use super::time::TimeFrame;
use super::units::{
    BodyMassIndexUnitValue, DurationUnitValue, EnergyUnitValue, LengthUnitValue, MassUnitValue,
};
use serde::Serialize;

/// A body weight reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyWeight {
    /// Measured weight.
    pub body_weight: MassUnitValue,
    /// When the reading took effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time_frame: Option<TimeFrame>,
}

/// A body mass index reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyMassIndex {
    /// Measured index.
    pub body_mass_index: BodyMassIndexUnitValue,
    /// When the reading took effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time_frame: Option<TimeFrame>,
}

/// A number of steps taken over some time frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepCount {
    /// Steps counted.
    pub step_count: u64,
    /// The period the count covers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time_frame: Option<TimeFrame>,
}

/// Time spent asleep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepDuration {
    /// Length of sleep.
    pub sleep_duration: DurationUnitValue,
    /// The sleep episode's time frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time_frame: Option<TimeFrame>,
}

/// A recorded physical activity session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhysicalActivity {
    /// Name of the activity, for example `Swimming`.
    pub activity_name: String,
    /// Distance covered, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<LengthUnitValue>,
    /// When the session happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time_frame: Option<TimeFrame>,
}

/// Energy burned over some time frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaloriesBurned {
    /// Energy expended.
    pub kcal_burned: EnergyUnitValue,
    /// Activity the burn is attributed to, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
    /// The period the burn covers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time_frame: Option<TimeFrame>,
}

impl BodyWeight {
    /// A weight reading with no time frame yet.
    #[must_use]
    pub const fn new(body_weight: MassUnitValue) -> Self {
        Self {
            body_weight,
            effective_time_frame: None,
        }
    }
}

impl BodyMassIndex {
    /// An index reading with no time frame yet.
    #[must_use]
    pub const fn new(body_mass_index: BodyMassIndexUnitValue) -> Self {
        Self {
            body_mass_index,
            effective_time_frame: None,
        }
    }
}

impl StepCount {
    /// A step count with no time frame yet.
    #[must_use]
    pub const fn new(step_count: u64) -> Self {
        Self {
            step_count,
            effective_time_frame: None,
        }
    }
}

impl SleepDuration {
    /// A sleep duration with no time frame yet.
    #[must_use]
    pub const fn new(sleep_duration: DurationUnitValue) -> Self {
        Self {
            sleep_duration,
            effective_time_frame: None,
        }
    }
}

impl PhysicalActivity {
    /// A named activity with no distance or time frame yet.
    #[must_use]
    pub fn new(activity_name: impl Into<String>) -> Self {
        Self {
            activity_name: activity_name.into(),
            distance: None,
            effective_time_frame: None,
        }
    }

    /// Attaches the distance covered.
    #[must_use]
    pub const fn with_distance(mut self, distance: LengthUnitValue) -> Self {
        self.distance = Some(distance);
        self
    }
}

impl CaloriesBurned {
    /// An energy expenditure with no attribution or time frame yet.
    #[must_use]
    pub const fn new(kcal_burned: EnergyUnitValue) -> Self {
        Self {
            kcal_burned,
            activity_name: None,
            effective_time_frame: None,
        }
    }

    /// Attaches the activity the burn belongs to.
    #[must_use]
    pub fn with_activity_name(mut self, activity_name: impl Into<String>) -> Self {
        self.activity_name = Some(activity_name.into());
        self
    }
}

macro_rules! with_time_frame {
    ($($measure:ty),+ $(,)?) => {
        $(
            impl $measure {
                /// Attaches the frame the measurement took effect over.
                #[must_use]
                pub fn with_effective_time_frame(mut self, time_frame: impl Into<TimeFrame>) -> Self {
                    self.effective_time_frame = Some(time_frame.into());
                    self
                }
            }
        )+
    };
}

with_time_frame!(
    BodyWeight,
    BodyMassIndex,
    StepCount,
    SleepDuration,
    PhysicalActivity,
    CaloriesBurned,
);

/// A measure body together with its schema family.
///
/// Serialization is transparent: the JSON body is exactly the inner measure's
/// fields, while the schema identity travels in the data point header.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Measure {
    /// Body weight.
    BodyWeight(BodyWeight),
    /// Body mass index.
    BodyMassIndex(BodyMassIndex),
    /// Step count.
    StepCount(StepCount),
    /// Sleep duration.
    SleepDuration(SleepDuration),
    /// Physical activity session.
    PhysicalActivity(PhysicalActivity),
    /// Calories burned.
    CaloriesBurned(CaloriesBurned),
}

impl Measure {
    /// Schema identifier of the measure family.
    #[must_use]
    pub const fn schema_id(&self) -> SchemaId {
        match self {
            Self::BodyWeight(_) => SchemaId::new("omh", "body-weight", "1.0"),
            Self::BodyMassIndex(_) => SchemaId::new("omh", "body-mass-index", "1.0"),
            Self::StepCount(_) => SchemaId::new("omh", "step-count", "1.0"),
            Self::SleepDuration(_) => SchemaId::new("omh", "sleep-duration", "1.0"),
            Self::PhysicalActivity(_) => SchemaId::new("omh", "physical-activity", "1.0"),
            Self::CaloriesBurned(_) => SchemaId::new("omh", "calories-burned", "1.0"),
        }
    }

    /// The frame the measurement took effect over, when one was mapped.
    #[must_use]
    pub const fn effective_time_frame(&self) -> Option<TimeFrame> {
        match self {
            Self::BodyWeight(BodyWeight {
                effective_time_frame,
                ..
            })
            | Self::BodyMassIndex(BodyMassIndex {
                effective_time_frame,
                ..
            })
            | Self::StepCount(StepCount {
                effective_time_frame,
                ..
            })
            | Self::SleepDuration(SleepDuration {
                effective_time_frame,
                ..
            })
            | Self::PhysicalActivity(PhysicalActivity {
                effective_time_frame,
                ..
            })
            | Self::CaloriesBurned(CaloriesBurned {
                effective_time_frame,
                ..
            }) => *effective_time_frame,
        }
    }
}

macro_rules! measure_from {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Measure {
                fn from(measure: $variant) -> Self {
                    Self::$variant(measure)
                }
            }
        )+
    };
}

measure_from!(
    BodyWeight,
    BodyMassIndex,
    StepCount,
    SleepDuration,
    PhysicalActivity,
    CaloriesBurned,
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::time::TimeInterval;
    use crate::schema::units::{DurationUnit, EnergyUnit, MassUnit};
    use chrono::DateTime;
    use serde_json::json;

    #[test]
    fn measure_serializes_as_its_bare_body() {
        let weight = BodyWeight::new(MassUnitValue::new(MassUnit::Kilogram, 49.4))
            .with_effective_time_frame(DateTime::parse_from_rfc3339("2014-11-12T23:59:59Z").unwrap());
        let value = serde_json::to_value(Measure::from(weight)).unwrap();
        assert_eq!(
            value,
            json!({
                "body_weight": {"value": 49.4, "unit": "kg"},
                "effective_time_frame": {"date_time": "2014-11-12T23:59:59Z"}
            })
        );
    }

    #[test]
    fn each_family_reports_its_own_schema_id() {
        let sleep = Measure::from(SleepDuration::new(DurationUnitValue::new(
            DurationUnit::Minute,
            296.0,
        )));
        assert_eq!(sleep.schema_id().to_string(), "omh:sleep-duration:1.0");

        let calories = Measure::from(CaloriesBurned::new(EnergyUnitValue::new(
            EnergyUnit::Kilocalorie,
            139.0,
        )));
        assert_eq!(calories.schema_id().to_string(), "omh:calories-burned:1.0");
    }

    #[test]
    fn effective_time_frame_accessor_sees_through_the_enum() {
        let start = DateTime::parse_from_rfc3339("2014-08-20T00:00:00Z").unwrap();
        let steps = StepCount::new(4332).with_effective_time_frame(
            TimeInterval::of_start_and_duration(
                start,
                DurationUnitValue::new(DurationUnit::Day, 1.0),
            ),
        );
        let measure = Measure::from(steps);
        assert_eq!(measure.effective_time_frame().map(|frame| frame.start()), Some(start));
    }
}
