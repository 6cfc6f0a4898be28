//! Fetching a collection snapshot and turning it into records.

use crate::schema::{RecordDecoder, RecordField};
use crate::store::DocumentStore;
use serde::Serialize;
use spinemotion_common::{DashboardError, Document, Record, Result};
use spinemotion_config::RowPolicy;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Every document of a collection at the time of the fetch.
#[derive(Debug, Clone)]
pub struct Snapshot {
    documents: Vec<Document>,
    observed_fields: BTreeSet<String>,
}

impl Snapshot {
    /// Wrap fetched documents, collecting the union of their keys.
    pub fn new(documents: Vec<Document>) -> Self {
        let observed_fields = documents
            .iter()
            .flat_map(|document| document.keys().cloned())
            .collect();
        Self {
            documents,
            observed_fields,
        }
    }

    /// Raw documents
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Keys present in at least one document
    pub const fn observed_fields(&self) -> &BTreeSet<String> {
        &self.observed_fields
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the collection was empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Fails when a required field occurs in no document of a non-empty snapshot.
    pub fn require_fields(&self, decoder: &RecordDecoder, required: &[RecordField]) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        for field in required {
            let key = field.key(decoder.fields());
            if !self.observed_fields.contains(key) {
                return Err(DashboardError::schema_field(
                    format!(
                        "required {field} field '{key}' is absent from all {} documents",
                        self.len()
                    ),
                    key,
                ));
            }
        }
        Ok(())
    }

    /// Decode every document, checking the required fields first.
    ///
    /// Rows that fail to decode, or lack a required value, abort the whole
    /// call under [`RowPolicy::Abort`] and are dropped under [`RowPolicy::Skip`].
    #[instrument(skip(self, decoder), fields(documents = self.len()))]
    pub fn records(
        &self,
        decoder: &RecordDecoder,
        required: &[RecordField],
        policy: RowPolicy,
    ) -> Result<RecordSet> {
        self.require_fields(decoder, required)?;

        let mut set = RecordSet::default();
        for document in &self.documents {
            match decode_required(decoder, document, required) {
                Ok(record) => set.records.push(record),
                Err(err) => match policy {
                    RowPolicy::Abort => return Err(err),
                    RowPolicy::Skip => {
                        warn!(error = %err, "Skipping invalid row");
                        set.skipped += 1;
                    }
                },
            }
        }

        debug!(records = set.records.len(), skipped = set.skipped, "Decoded records");
        Ok(set)
    }
}

fn decode_required(
    decoder: &RecordDecoder,
    document: &Document,
    required: &[RecordField],
) -> Result<Record> {
    let record = decoder.decode(document)?;
    if let Some(missing) = required.iter().find(|field| !field.is_present(&record)) {
        return Err(DashboardError::parse(
            format!("missing required {missing} value"),
            missing.key(decoder.fields()),
        )
        .for_record(record.display_id()));
    }
    Ok(record)
}

/// Decoded records plus the count of rows the skip policy dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordSet {
    /// Records that passed decoding.
    pub records: Vec<Record>,
    /// Rows dropped under the skip policy.
    pub skipped: usize,
}

/// Fetches collection snapshots from a store.
pub struct DataLoader<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> DataLoader<'a> {
    /// Create a loader over `store`.
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Fetch every document of `database.collection`.
    #[instrument(skip(self))]
    pub async fn load(&self, database: &str, collection: &str) -> Result<Snapshot> {
        let documents = self.store.fetch_all(database, collection).await?;
        let snapshot = Snapshot::new(documents);

        info!(
            store = %self.store.describe(),
            documents = snapshot.len(),
            fields = ?snapshot.observed_fields(),
            "Loaded collection snapshot"
        );
        Ok(snapshot)
    }
}
