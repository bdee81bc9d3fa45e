// ABOUTME: Canonical measurement schema produced by normalized retrieval
// ABOUTME: Re-exports the data point, measure, time frame, and unit vocabularies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

//! Canonical measurement schema.
//!
//! Normalized retrieval converts provider-native JSON into these types: a
//! [`DataPoint`] couples header metadata with a typed [`Measure`] body, and
//! every physical quantity carries an explicit unit from a closed vocabulary.

pub mod data_point;
pub mod measures;
pub mod time;
pub mod units;

pub use data_point::{DataPoint, DataPointHeader, Modality, SchemaId};
pub use measures::{
    BodyMassIndex, BodyWeight, CaloriesBurned, Measure, PhysicalActivity, SleepDuration, StepCount,
};
pub use time::{TimeFrame, TimeInterval};
pub use units::{
    BodyMassIndexUnit, BodyMassIndexUnitValue, DurationUnit, DurationUnitValue, EnergyUnit,
    EnergyUnitValue, LengthUnit, LengthUnitValue, MassUnit, MassUnitValue,
};
