//! Error types and utilities for the dashboard

use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The document store could not be reached or returned unusable data
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// A single row carries a malformed or missing value
    #[error("Parse error in field '{field}': {message}")]
    Parse {
        message: String,
        field: String,
        record: Option<String>,
    },

    /// A required field is absent from every document of the snapshot
    #[error("Schema error: {message}")]
    Schema {
        message: String,
        field: Option<String>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Internationalization and localization errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DashboardError {
    /// Create a new connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new connection error with source
    pub fn connection_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Connection {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new parse error for the given field
    pub fn parse(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            field: field.into(),
            record: None,
        }
    }

    /// Attach the offending record identifier to a parse error.
    ///
    /// Other variants are returned untouched.
    #[must_use]
    pub fn for_record(self, record_id: impl Into<String>) -> Self {
        match self {
            Self::Parse { message, field, .. } => Self::Parse {
                message,
                field,
                record: Some(record_id.into()),
            },
            other => other,
        }
    }

    /// Create a new schema error naming the missing field
    pub fn schema_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Schema {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new localization error with locale
    pub fn localization_with_locale(msg: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: Some(locale.into()),
        }
    }

    /// Short machine-readable name of the error category, used as a log field
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "connection",
            Self::Parse { .. } => "parse",
            Self::Schema { .. } => "schema",
            Self::Config { .. } => "config",
            Self::Localization { .. } => "localization",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let connection_error = DashboardError::connection("store down");
        assert_eq!(connection_error.to_string(), "Connection error: store down");

        let parse_error = DashboardError::parse("not a date", "tanggal");
        assert_eq!(
            parse_error.to_string(),
            "Parse error in field 'tanggal': not a date"
        );

        let schema_error = DashboardError::schema_field("field missing everywhere", "gender");
        assert!(schema_error.to_string().contains("Schema error"));

        let localization_error = DashboardError::localization_with_locale("no bundle", "fr");
        assert!(localization_error.to_string().contains("Localization error"));
    }

    #[test]
    fn test_for_record_only_touches_parse_errors() {
        let parse_error = DashboardError::parse("bad", "tanggal").for_record("abc");
        match parse_error {
            DashboardError::Parse { record, .. } => assert_eq!(record.as_deref(), Some("abc")),
            other => panic!("unexpected variant: {other:?}"),
        }

        let schema_error = DashboardError::schema_field("missing", "tanggal").for_record("abc");
        assert!(matches!(schema_error, DashboardError::Schema { .. }));
    }

    #[test]
    fn test_error_with_source() {
        let wrapped = DashboardError::connection_with_source(
            "Failed to read collection",
            io::Error::new(io::ErrorKind::NotFound, "File not found"),
        );
        assert!(wrapped.source().is_some());

        let config_error = DashboardError::config_with_source(
            "Config loading failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );
        assert!(config_error.to_string().contains("Config loading failed"));
        assert!(config_error.source().is_some());
    }

    #[test]
    fn test_conversions() {
        let io_error: DashboardError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(io_error.kind(), "io");

        let serde_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let converted: DashboardError = serde_error.into();
        assert_eq!(converted.kind(), "serialization");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(DashboardError::connection("x").kind(), "connection");
        assert_eq!(DashboardError::parse("x", "f").kind(), "parse");
        assert_eq!(DashboardError::schema_field("x", "f").kind(), "schema");
        assert_eq!(DashboardError::config("x").kind(), "config");
        assert_eq!(DashboardError::localization_with_locale("x", "fr").kind(), "localization");
    }
}
