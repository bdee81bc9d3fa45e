// ABOUTME: Closed unit vocabularies and unit-value pairs for canonical measures
// ABOUTME: Every physical quantity carries an explicit unit so consumers never guess magnitudes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Units of mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    /// Grams.
    #[serde(rename = "g")]
    Gram,
    /// Kilograms.
    #[serde(rename = "kg")]
    Kilogram,
    /// Pounds.
    #[serde(rename = "lb")]
    Pound,
}

/// Units of duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationUnit {
    /// Milliseconds.
    #[serde(rename = "ms")]
    Millisecond,
    /// Seconds.
    #[serde(rename = "sec")]
    Second,
    /// Minutes.
    #[serde(rename = "min")]
    Minute,
    /// Hours.
    #[serde(rename = "h")]
    Hour,
    /// Days.
    #[serde(rename = "d")]
    Day,
}

/// Units of length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Meters.
    #[serde(rename = "m")]
    Meter,
    /// Kilometers.
    #[serde(rename = "km")]
    Kilometer,
    /// Miles.
    #[serde(rename = "mi")]
    Mile,
}

/// Units of energy expenditure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    /// Kilocalories.
    #[serde(rename = "kcal")]
    Kilocalorie,
}

/// Units of body mass index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyMassIndexUnit {
    /// Kilograms per square meter.
    #[serde(rename = "kg/m2")]
    KilogramsPerSquareMeter,
}

macro_rules! unit_as_str {
    ($unit:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $unit {
            /// Canonical textual form of the unit.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $unit {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

unit_as_str!(MassUnit { Gram => "g", Kilogram => "kg", Pound => "lb" });
unit_as_str!(DurationUnit {
    Millisecond => "ms",
    Second => "sec",
    Minute => "min",
    Hour => "h",
    Day => "d",
});
unit_as_str!(LengthUnit { Meter => "m", Kilometer => "km", Mile => "mi" });
unit_as_str!(EnergyUnit { Kilocalorie => "kcal" });
unit_as_str!(BodyMassIndexUnit { KilogramsPerSquareMeter => "kg/m2" });

macro_rules! unit_value {
    ($(#[$doc:meta])* $name:ident, $unit:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            /// Numeric magnitude.
            pub value: f64,
            /// Unit of measure.
            pub unit: $unit,
        }

        impl $name {
            /// Pairs a magnitude with its unit.
            #[must_use]
            pub const fn new(unit: $unit, value: f64) -> Self {
                Self { value, unit }
            }
        }
    };
}

unit_value!(
    /// A mass quantity, for example a body weight reading.
    MassUnitValue,
    MassUnit
);
unit_value!(
    /// A span of time, for example minutes asleep.
    DurationUnitValue,
    DurationUnit
);
unit_value!(
    /// A distance, for example kilometers covered in an activity.
    LengthUnitValue,
    LengthUnit
);
unit_value!(
    /// An amount of energy burned.
    EnergyUnitValue,
    EnergyUnit
);
unit_value!(
    /// A body mass index reading.
    BodyMassIndexUnitValue,
    BodyMassIndexUnit
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unit_values_serialize_with_canonical_unit_text() {
        let weight = MassUnitValue::new(MassUnit::Kilogram, 74.126);
        assert_eq!(
            serde_json::to_value(weight).unwrap(),
            json!({"value": 74.126, "unit": "kg"})
        );
    }

    #[test]
    fn duration_units_round_trip_their_short_names() {
        for (unit, text) in [
            (DurationUnit::Millisecond, "ms"),
            (DurationUnit::Second, "sec"),
            (DurationUnit::Minute, "min"),
            (DurationUnit::Hour, "h"),
            (DurationUnit::Day, "d"),
        ] {
            assert_eq!(unit.as_str(), text);
            let parsed: DurationUnit = serde_json::from_value(json!(text)).unwrap();
            assert_eq!(parsed, unit);
        }
    }

    #[test]
    fn bmi_unit_uses_kg_per_square_meter() {
        assert_eq!(
            BodyMassIndexUnit::KilogramsPerSquareMeter.to_string(),
            "kg/m2"
        );
    }
}
