// ABOUTME: Data point mapper trait and the shared list node traversal contract
// ABOUTME: One traversal implementation serves every provider and schema family
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Unison Health Contributors

//! Mapping of provider JSON documents into canonical data points.
//!
//! Each provider/schema pair implements [`DataPointMapper::map_record`] for a
//! single record; the traversal over documents and list nodes is shared. Two
//! failure policies apply: a list node that is present but not an array aborts
//! the whole mapping, while a record that cannot be mapped is logged and
//! skipped so one bad element never poisons a payload.

pub mod support;

use crate::errors::MappingError;
use crate::schema::DataPoint;
use serde_json::Value;
use tracing::debug;

/// Maps one provider payload family into canonical data points.
pub trait DataPointMapper: Send + Sync {
    /// Source name stamped into the headers of produced points.
    fn source_name(&self) -> &'static str;

    /// Path from the document root to the array of records to map.
    fn list_node_path(&self) -> &'static [&'static str];

    /// Maps a single record into at most one data point.
    ///
    /// The full document is also available for mappers that need context
    /// stored outside the record itself. Returning `Ok(None)` drops the
    /// record silently (a goal entry, a zero reading); returning an error
    /// skips it with a log line.
    ///
    /// # Errors
    /// Returns [`MappingError`] when the record is missing or mistypes a
    /// required field.
    fn map_record(
        &self,
        document: &Value,
        record: &Value,
    ) -> Result<Option<DataPoint>, MappingError>;

    /// Maps every record of every document, in input order.
    ///
    /// Documents whose list node is absent contribute zero points.
    ///
    /// # Errors
    /// Returns [`MappingError::MalformedListNode`] when a list node is
    /// present but not an array.
    fn map_documents(&self, documents: &[Value]) -> Result<Vec<DataPoint>, MappingError> {
        let mut points = Vec::new();
        for document in documents {
            let Some(records) = resolve_list_node(document, self.list_node_path())? else {
                continue;
            };
            for record in records {
                match self.map_record(document, record) {
                    Ok(Some(point)) => points.push(point),
                    Ok(None) => {}
                    Err(error) => {
                        debug!(
                            "skipping unmappable record from {}: {error}",
                            self.source_name()
                        );
                    }
                }
            }
        }
        Ok(points)
    }
}

/// Walks `path` from the document root.
///
/// Absent or null segments mean the payload has no records (`Ok(None)`); a
/// final node that is not an array is a malformed payload.
fn resolve_list_node<'a>(
    document: &'a Value,
    path: &[&str],
) -> Result<Option<&'a Vec<Value>>, MappingError> {
    let mut node = document;
    for segment in path {
        match node.get(segment) {
            Some(next) if !next.is_null() => node = next,
            _ => return Ok(None),
        }
    }
    match node.as_array() {
        Some(records) => Ok(Some(records)),
        None => Err(MappingError::MalformedListNode {
            path: path.join("."),
        }),
    }
}
