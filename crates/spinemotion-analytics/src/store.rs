//! Read-only document store access.
//!
//! A store is opened for a single view run, asked for every document of one
//! collection, and dropped. Nothing is pooled or cached between runs.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use spinemotion_common::{DashboardError, Document, Result};
use spinemotion_config::{StoreBackend, StoreConfig};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Source of raw documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document currently in `database.collection`.
    async fn fetch_all(&self, database: &str, collection: &str) -> Result<Vec<Document>>;

    /// Human readable location, for logs.
    fn describe(&self) -> String;
}

/// Open the store named by the configuration.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn DocumentStore>> {
    let store: Box<dyn DocumentStore> = match config.backend {
        StoreBackend::File => Box::new(FileStore::new(&config.uri)),
        StoreBackend::Http => Box::new(HttpStore::new(
            &config.uri,
            Duration::from_secs(config.timeout_seconds),
        )?),
    };
    debug!(backend = %config.backend, location = %store.describe(), "Opened document store");
    Ok(store)
}

/// Turn a decoded JSON payload into documents.
///
/// Accepts a bare array of documents or an object carrying them under
/// `documents`, as REST gateways in front of MongoDB usually answer.
pub fn documents_from_value(value: Value) -> Result<Vec<Document>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("documents") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(DashboardError::connection(
                    "store response is an object without a 'documents' array",
                ))
            }
        },
        other => {
            return Err(DashboardError::connection(format!(
                "store response must be an array of documents, got {}",
                json_type(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(document) => Ok(document),
            other => Err(DashboardError::connection(format!(
                "element {index} of the collection is {}, not a document",
                json_type(&other)
            ))),
        })
        .collect()
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Collection exports on the local filesystem.
///
/// A collection lives at `<root>/<database>/<collection>.json` (a JSON array)
/// or `<root>/<database>/<collection>.jsonl` (one document per line).
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read_optional(path: &Path) -> Result<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DashboardError::connection_with_source(
                format!("failed to read '{}'", path.display()),
                e,
            )),
        }
    }

    fn parse_array(path: &Path, content: &str) -> Result<Vec<Document>> {
        let value: Value = serde_json::from_str(content).map_err(|e| {
            DashboardError::connection_with_source(
                format!("'{}' is not valid JSON", path.display()),
                e,
            )
        })?;
        documents_from_value(value)
    }

    fn parse_lines(path: &Path, content: &str) -> Result<Vec<Document>> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str::<Document>(line).map_err(|e| {
                    DashboardError::connection_with_source(
                        format!("'{}' line {} is not a JSON document", path.display(), index + 1),
                        e,
                    )
                })
            })
            .collect()
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn fetch_all(&self, database: &str, collection: &str) -> Result<Vec<Document>> {
        let dir = self.root.join(database);
        if !dir.is_dir() {
            error!(path = %dir.display(), "Database directory not found");
            return Err(DashboardError::connection(format!(
                "database directory '{}' does not exist",
                dir.display()
            )));
        }

        let array_path = dir.join(format!("{collection}.json"));
        if let Some(content) = Self::read_optional(&array_path).await? {
            let documents = Self::parse_array(&array_path, &content)?;
            info!(count = documents.len(), path = %array_path.display(), "Fetched documents");
            return Ok(documents);
        }

        let lines_path = dir.join(format!("{collection}.jsonl"));
        if let Some(content) = Self::read_optional(&lines_path).await? {
            let documents = Self::parse_lines(&lines_path, &content)?;
            info!(count = documents.len(), path = %lines_path.display(), "Fetched documents");
            return Ok(documents);
        }

        Err(DashboardError::connection(format!(
            "collection '{collection}' not found in '{}'",
            dir.display()
        )))
    }

    fn describe(&self) -> String {
        format!("file://{}", self.root.display())
    }
}

/// REST gateway serving `GET {base}/{database}/{collection}`.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    /// Create a store for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::connection_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, database: &str, collection: &str) -> Result<url::Url> {
        let raw = format!("{}/{database}/{collection}", self.base_url);
        url::Url::parse(&raw).map_err(|e| {
            DashboardError::connection_with_source(format!("invalid collection URL '{raw}'"), e)
        })
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_all(&self, database: &str, collection: &str) -> Result<Vec<Document>> {
        let url = self.collection_url(database, collection)?;
        debug!(%url, "Requesting collection");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "Request timeout"
            } else if e.is_connect() {
                "Connection error"
            } else {
                "Request failed"
            };
            error!(%url, error = %e, "{reason}");
            DashboardError::connection_with_source(format!("{reason} for {url}"), e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(%url, %status, "Store returned an error status");
            return Err(DashboardError::connection(format!(
                "store returned {status} for {url}"
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            DashboardError::connection_with_source("Failed to decode store response", e)
        })?;
        let documents = documents_from_value(body)?;

        info!(count = documents.len(), "Fetched documents");
        Ok(documents)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// In-process collections, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: HashMap<(String, String), Vec<Document>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a collection.
    #[must_use]
    pub fn with_collection(
        mut self,
        database: impl Into<String>,
        collection: impl Into<String>,
        documents: Vec<Document>,
    ) -> Self {
        self.collections
            .insert((database.into(), collection.into()), documents);
        self
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch_all(&self, database: &str, collection: &str) -> Result<Vec<Document>> {
        // An unknown collection reads as empty, as it would from MongoDB.
        Ok(self
            .collections
            .get(&(database.to_string(), collection.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn describe(&self) -> String {
        format!("memory ({} collections)", self.collections.len())
    }
}
