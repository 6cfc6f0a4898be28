//! Default values, matching the collection the dashboard was built for.

use crate::schema::*;
use spinemotion_common::LoggingConfig;

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            fields: FieldMapping::default(),
            gender: GenderConfig::default(),
            features: FeatureConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            uri: "./data".to_string(),
            database: "visualisasi-mongodb".to_string(),
            collection: "bigdata".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            id: "_id".to_string(),
            timestamp: "tanggal".to_string(),
            category: "namaGerakan".to_string(),
            gender: "gender".to_string(),
        }
    }
}

impl Default for GenderConfig {
    fn default() -> Self {
        Self {
            male_label: "Laki-laki".to_string(),
            female_label: "Perempuan".to_string(),
            unrecognized: UnrecognizedGender::Male,
        }
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            invalid_rows: RowPolicy::Abort,
            complete_hour_axis: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: "id".to_string(),
            label_width: 24,
        }
    }
}
