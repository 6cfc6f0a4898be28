//! Decoding raw documents into [`Record`]s.
//!
//! Documents use MongoDB extended JSON, so identifiers and timestamps may
//! arrive wrapped in `$oid`, `$date` or `$numberLong` objects.

use serde_json::Value;
use spinemotion_common::{DashboardError, Document, RawTimestamp, Record, RecordId, Result};
use spinemotion_config::FieldMapping;
use std::fmt;

/// A record attribute a view may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    /// Unique identifier.
    Id,
    /// Event timestamp.
    Timestamp,
    /// Movement name.
    Category,
    /// Gender label.
    Gender,
}

impl RecordField {
    /// Document key holding this attribute under `fields`.
    pub fn key(self, fields: &FieldMapping) -> &str {
        match self {
            Self::Id => &fields.id,
            Self::Timestamp => &fields.timestamp,
            Self::Category => &fields.category,
            Self::Gender => &fields.gender,
        }
    }

    /// Whether `record` carries a value for this attribute.
    pub const fn is_present(self, record: &Record) -> bool {
        match self {
            Self::Id => record.id.is_some(),
            Self::Timestamp => record.timestamp.is_some(),
            Self::Category => record.category.is_some(),
            Self::Gender => record.gender.is_some(),
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Id => "id",
            Self::Timestamp => "timestamp",
            Self::Category => "category",
            Self::Gender => "gender",
        };
        f.write_str(name)
    }
}

/// Decodes documents using a configured field mapping.
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    fields: FieldMapping,
}

impl RecordDecoder {
    /// Create a decoder for the given field names.
    pub const fn new(fields: FieldMapping) -> Self {
        Self { fields }
    }

    /// Field names in use
    pub const fn fields(&self) -> &FieldMapping {
        &self.fields
    }

    /// Decode one document. Absent and `null` values become `None`.
    pub fn decode(&self, document: &Document) -> Result<Record> {
        let id = non_null(document, &self.fields.id)
            .map(|value| decode_id(value, &self.fields.id))
            .transpose()?;

        let record_id = id.as_ref().map_or_else(|| "<no id>".to_string(), ToString::to_string);
        let with_id = |e: DashboardError| e.for_record(record_id.clone());

        let timestamp = non_null(document, &self.fields.timestamp)
            .map(|value| decode_timestamp(value, &self.fields.timestamp))
            .transpose()
            .map_err(with_id)?;
        let category = non_null(document, &self.fields.category)
            .map(|value| decode_label(value, &self.fields.category))
            .transpose()
            .map_err(with_id)?;
        let gender = non_null(document, &self.fields.gender)
            .map(|value| decode_label(value, &self.fields.gender))
            .transpose()
            .map_err(with_id)?;

        Ok(Record {
            id,
            timestamp,
            category,
            gender,
        })
    }
}

fn non_null<'a>(document: &'a Document, key: &str) -> Option<&'a Value> {
    document.get(key).filter(|value| !value.is_null())
}

/// Decode an identifier: a string, an integer, or `{"$oid": "..."}`.
pub fn decode_id(value: &Value, field: &str) -> Result<RecordId> {
    match value {
        Value::String(text) => Ok(RecordId(text.clone())),
        Value::Number(number) => Ok(RecordId(number.to_string())),
        Value::Object(object) => match object.get("$oid") {
            Some(Value::String(hex)) => Ok(RecordId(hex.clone())),
            _ => Err(DashboardError::parse(
                "identifier object has no '$oid' string",
                field,
            )),
        },
        _ => Err(DashboardError::parse(
            format!("unsupported identifier value {value}"),
            field,
        )),
    }
}

/// Decode a timestamp in any of the accepted extended JSON shapes.
#[allow(clippy::cast_possible_truncation)]
pub fn decode_timestamp(value: &Value, field: &str) -> Result<RawTimestamp> {
    match value {
        Value::String(text) => Ok(RawTimestamp::Text(text.clone())),
        Value::Number(number) => number
            .as_i64()
            // Fractional epoch seconds are truncated.
            .or_else(|| number.as_f64().map(|secs| secs.trunc() as i64))
            .map(RawTimestamp::EpochSeconds)
            .ok_or_else(|| DashboardError::parse(format!("epoch value {number} is out of range"), field)),
        Value::Object(object) => match object.get("$date") {
            Some(Value::String(text)) => Ok(RawTimestamp::Text(text.clone())),
            Some(Value::Number(millis)) => millis
                .as_i64()
                .map(RawTimestamp::EpochMillis)
                .ok_or_else(|| DashboardError::parse(format!("'$date' value {millis} is not an integer"), field)),
            Some(Value::Object(inner)) => match inner.get("$numberLong") {
                Some(Value::String(digits)) => digits
                    .parse()
                    .map(RawTimestamp::EpochMillis)
                    .map_err(|_| DashboardError::parse(format!("'$numberLong' value '{digits}' is not an integer"), field)),
                _ => Err(DashboardError::parse("'$date' object has no '$numberLong' string", field)),
            },
            _ => Err(DashboardError::parse("timestamp object has no '$date' value", field)),
        },
        _ => Err(DashboardError::parse(
            format!("unsupported timestamp value {value}"),
            field,
        )),
    }
}

/// Decode a label. Numbers and booleans are stringified.
pub fn decode_label(value: &Value, field: &str) -> Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(DashboardError::parse(
            format!("expected a text label, got {value}"),
            field,
        )),
    }
}
