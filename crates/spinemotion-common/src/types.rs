//! Common type definitions for records fetched from the document store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw document as returned by the store, keyed by field name.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Unique identifier of a stored record (the store's `_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Timestamp value exactly as stored, before calendar parsing.
///
/// The store holds mixed representations; parsing into a calendar value
/// happens in the feature deriver so that parse failures follow the row policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawTimestamp {
    /// Free-form text, e.g. `2024-01-15 08:30:00` or an RFC 3339 string.
    Text(String),
    /// Seconds since the Unix epoch.
    EpochSeconds(i64),
    /// Milliseconds since the Unix epoch (extended JSON `$date`).
    EpochMillis(i64),
}

impl fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::EpochSeconds(secs) => write!(f, "{secs}s"),
            Self::EpochMillis(millis) => write!(f, "{millis}ms"),
        }
    }
}

/// One observed exercise event.
///
/// Every field is optional at this level: which fields are required depends on
/// the view being computed, and absence is reported by the schema checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Store identifier.
    pub id: Option<RecordId>,
    /// When the movement was performed.
    pub timestamp: Option<RawTimestamp>,
    /// Movement name.
    pub category: Option<String>,
    /// Gender label as entered by the user.
    pub gender: Option<String>,
}

impl Record {
    /// Creates a record with only an identifier set.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Sets a textual timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(RawTimestamp::Text(timestamp.into()));
        self
    }

    /// Sets the movement name.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the gender label.
    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Identifier for log and error messages; `<no id>` when absent.
    pub fn display_id(&self) -> String {
        self.id
            .as_ref()
            .map_or_else(|| "<no id>".to_string(), ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_display_and_serde() {
        let id = RecordId::from("665f1c2ab3");
        assert_eq!(id.to_string(), "665f1c2ab3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"665f1c2ab3\"");
    }

    #[test]
    fn test_record_builder() {
        let record = Record::new("a1")
            .with_timestamp("2024-01-15 08:00:00")
            .with_category("Cat Cow")
            .with_gender("Perempuan");

        assert_eq!(record.id, Some(RecordId::from("a1")));
        assert_eq!(
            record.timestamp,
            Some(RawTimestamp::Text("2024-01-15 08:00:00".to_string()))
        );
        assert_eq!(record.category.as_deref(), Some("Cat Cow"));
        assert_eq!(record.gender.as_deref(), Some("Perempuan"));
    }

    #[test]
    fn test_display_id_without_id() {
        assert_eq!(Record::default().display_id(), "<no id>");
        assert_eq!(Record::new("x").display_id(), "x");
    }

    #[test]
    fn test_raw_timestamp_serialization_is_tagged() {
        let raw = RawTimestamp::EpochMillis(1_705_305_600_000);
        let json = serde_json::to_string(&raw).unwrap();
        assert_eq!(json, r#"{"kind":"epoch_millis","value":1705305600000}"#);
    }
}
