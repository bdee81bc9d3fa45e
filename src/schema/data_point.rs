// ABOUTME: Canonical data point and header types shared by every provider mapper
// ABOUTME: Headers are derived from the measure body so schema identity can never drift
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

use super::measures::Measure;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Versioned identifier of a canonical measure schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaId {
    /// Schema namespace, for example `omh`.
    pub namespace: &'static str,
    /// Schema name, for example `body-weight`.
    pub name: &'static str,
    /// Schema version, for example `1.0`.
    pub version: &'static str,
}

impl SchemaId {
    /// Builds a schema identifier from its three parts.
    #[must_use]
    pub const fn new(namespace: &'static str, name: &'static str, version: &'static str) -> Self {
        Self {
            namespace,
            name,
            version,
        }
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.name, self.version)
    }
}

/// How a measurement came into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Modality {
    /// Captured by a device or sensor.
    #[serde(rename = "sensed")]
    Sensed,
    /// Entered manually by the person.
    #[serde(rename = "self-reported")]
    SelfReported,
}

/// Header metadata attached to every canonical data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPointHeader {
    /// Unique identifier of this point.
    pub id: Uuid,
    /// Human-readable name of the upstream data source.
    pub source_name: String,
    /// How the measurement was captured.
    pub modality: Modality,
    /// Provider-native record identifier, when the payload carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Schema identifier of the body measure.
    pub body_schema_id: SchemaId,
    /// When this point was created by the mapper.
    pub creation_date_time: DateTime<Utc>,
}

/// A single canonical measurement: header metadata plus a typed measure body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    /// Header metadata.
    pub header: DataPointHeader,
    /// The measurement itself.
    pub body: Measure,
}

impl DataPoint {
    /// Builds a data point, deriving the header schema id from the measure body.
    #[must_use]
    pub fn new(
        source_name: impl Into<String>,
        modality: Modality,
        external_id: Option<String>,
        body: Measure,
    ) -> Self {
        let header = DataPointHeader {
            id: Uuid::new_v4(),
            source_name: source_name.into(),
            modality,
            external_id,
            body_schema_id: body.schema_id(),
            creation_date_time: Utc::now(),
        };
        Self { header, body }
    }

    /// Builds a sensed data point, the modality of every resource API reading.
    #[must_use]
    pub fn sensed(
        source_name: impl Into<String>,
        external_id: Option<String>,
        body: Measure,
    ) -> Self {
        Self::new(source_name, Modality::Sensed, external_id, body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::measures::BodyWeight;
    use crate::schema::units::{MassUnit, MassUnitValue};

    #[test]
    fn header_schema_id_follows_the_measure_body() {
        let point = DataPoint::sensed(
            "Fitbit Resource API",
            Some("1415923199000".to_owned()),
            BodyWeight::new(MassUnitValue::new(MassUnit::Kilogram, 49.4)).into(),
        );
        assert_eq!(point.header.body_schema_id.to_string(), "omh:body-weight:1.0");
        assert_eq!(point.header.modality, Modality::Sensed);
        assert_eq!(point.header.external_id.as_deref(), Some("1415923199000"));
    }

    #[test]
    fn points_get_distinct_identifiers() {
        let body = BodyWeight::new(MassUnitValue::new(MassUnit::Kilogram, 80.0));
        let first = DataPoint::sensed("Fitbit Resource API", None, body.clone().into());
        let second = DataPoint::sensed("Fitbit Resource API", None, body.into());
        assert_ne!(first.header.id, second.header.id);
    }

    #[test]
    fn external_id_is_omitted_from_json_when_absent() {
        let point = DataPoint::sensed(
            "Withings Resource API",
            None,
            BodyWeight::new(MassUnitValue::new(MassUnit::Kilogram, 74.126)).into(),
        );
        let value = serde_json::to_value(point).unwrap();
        assert!(value["header"].get("external_id").is_none());
        assert_eq!(value["header"]["modality"], "sensed");
    }
}
