//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use spinemotion_common::{LoggingConfig, Result};
use std::fmt;

/// Main configuration structure for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document store location.
    pub store: StoreConfig,
    /// Names of the document fields that make up a record.
    pub fields: FieldMapping,
    /// Gender labels and fill policy.
    pub gender: GenderConfig,
    /// Feature derivation settings.
    pub features: FeatureConfig,
    /// Output settings.
    pub display: DisplayConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Which document store backend to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Collection exports on the local filesystem.
    #[default]
    File,
    /// REST gateway in front of the store.
    Http,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend kind.
    pub backend: StoreBackend,
    /// Directory (file backend) or base URL (http backend).
    pub uri: String,
    /// Database name.
    pub database: String,
    /// Collection name.
    pub collection: String,
    /// Request timeout for the http backend.
    pub timeout_seconds: u64,
}

/// Document field names for each record attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    /// Unique identifier field.
    pub id: String,
    /// Timestamp field.
    pub timestamp: String,
    /// Movement name field.
    pub category: String,
    /// Gender field.
    pub gender: String,
}

/// How records whose gender matches neither configured label are counted
/// by the monthly user aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnrecognizedGender {
    /// Counted as male.
    #[default]
    Male,
    /// Left out of every count.
    Exclude,
    /// Counted in a separate unknown bucket.
    Unknown,
}

/// Gender labels and fill policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenderConfig {
    /// Exact label identifying male users.
    pub male_label: String,
    /// Exact label identifying female users.
    pub female_label: String,
    /// Fill policy for missing or unrecognized labels.
    pub unrecognized: UnrecognizedGender,
}

/// What to do with a row whose required value is missing or malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Fail the whole view.
    #[default]
    Abort,
    /// Drop the row and keep going.
    Skip,
}

/// Feature derivation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// IANA time zone used for wall-clock features.
    pub timezone: String,
    /// Policy for rows that fail to decode or parse.
    pub invalid_rows: RowPolicy,
    /// Whether the hourly table always covers hours 0 to 23.
    pub complete_hour_axis: bool,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Locale for labels and titles.
    pub locale: String,
    /// Maximum width of category labels in text tables.
    pub label_width: usize,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        crate::validator::ConfigValidator::validate(self)
    }
}
