//! Test utilities and shared fixtures.
//!
//! Enabled for this crate's own tests and, through the `testing` feature, for
//! the unit and integration tests of the other workspace crates.

use crate::types::{Document, Record};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call any number of times.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        // Another test harness may already have installed a subscriber.
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Documents in the shape the original collection stores them.
pub mod document_fixtures {
    use super::*;

    /// Builds a document with the default field names.
    pub fn document(id: &str, tanggal: &str, gerakan: &str, gender: &str) -> Document {
        let value = json!({
            "_id": { "$oid": id },
            "tanggal": tanggal,
            "namaGerakan": gerakan,
            "gender": gender,
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!("json! object literal"),
        }
    }

    /// Five documents across January and February 2024.
    ///
    /// January: 2 male, 1 female. February: 1 male, 1 female.
    pub fn sample_documents() -> Vec<Document> {
        vec![
            document("65a000000000000000000001", "2024-01-15 08:30:00", "Cat Cow", "Laki-laki"),
            document("65a000000000000000000002", "2024-01-15 19:10:00", "Cat Cow", "Perempuan"),
            document("65a000000000000000000003", "2024-01-16 08:05:00", "Child Pose", "Laki-laki"),
            document("65a000000000000000000004", "2024-02-03 10:00:00", "Cobra", "Laki-laki"),
            document("65a000000000000000000005", "2024-02-04 21:45:00", "Cat Cow", "Perempuan"),
        ]
    }

    /// Writes documents as a JSON array export at `<root>/<database>/<collection>.json`.
    pub fn write_collection(root: &Path, database: &str, collection: &str, documents: &[Document]) {
        let dir = root.join(database);
        std::fs::create_dir_all(&dir).expect("Failed to create database directory");
        let body = serde_json::to_string_pretty(documents).expect("Failed to serialize documents");
        std::fs::write(dir.join(format!("{collection}.json")), body)
            .expect("Failed to write collection file");
    }
}

/// Decoded records for aggregation tests.
pub mod record_fixtures {
    use super::*;

    /// Builds a fully populated record.
    pub fn record(id: &str, timestamp: &str, category: &str, gender: &str) -> Record {
        Record::new(id)
            .with_timestamp(timestamp)
            .with_category(category)
            .with_gender(gender)
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Minimal configuration pointing the file store at `uri`.
    pub fn minimal_config_yaml(uri: &str) -> String {
        format!(
            "store:\n  backend: file\n  uri: \"{uri}\"\n  database: visualisasi-mongodb\n  collection: bigdata\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::document_fixtures::*;
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_document_shape() {
        let doc = document("abc", "2024-01-15 08:30:00", "Cat Cow", "Laki-laki");
        assert_eq!(doc["_id"]["$oid"], "abc");
        assert_eq!(doc["namaGerakan"], "Cat Cow");
        assert_eq!(sample_documents().len(), 5);
    }

    #[test]
    fn test_write_collection() {
        let dir = tempfile::tempdir().unwrap();
        write_collection(dir.path(), "db", "coll", &sample_documents());

        let raw = std::fs::read_to_string(dir.path().join("db").join("coll.json")).unwrap();
        let parsed: Vec<Document> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 5);
    }
}
