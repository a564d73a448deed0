//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoDealStore`, a [`DealStore`] backed by a single collection of
//! deal documents in a `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! deals-query = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Indexes
//!
//! Free-text search relies on a text index over the configured text fields.
//! Call [`MongoDealStore::ensure_indexes`] once at startup; it is idempotent.
//!
//! # Serialization strategy
//!
//! Predicates render to `serde_json::Value` and are converted to BSON filter
//! documents. Stored documents are read back through relaxed extended JSON,
//! with `$oid`, `$date` and `$numberLong` wrappers unwrapped so they
//! deserialize into plain strings, timestamps and numbers. The `_id` field is
//! exposed as `id`.

use crate::config::MongoConfig;
use crate::core::deal::{Deal, fields};
use crate::core::error::StorageError;
use crate::core::store::{DealQuery, DealStore};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::{Client, Database, IndexModel};
use serde_json::Value;

const BACKEND: &str = "mongodb";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn storage_error(message: impl Into<String>) -> StorageError {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message: message.into(),
    }
}

fn decode_error(message: impl Into<String>) -> StorageError {
    StorageError::DecodeError {
        backend: BACKEND.to_string(),
        message: message.into(),
    }
}

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document.
fn json_to_document(json: Value) -> Result<Document, StorageError> {
    match bson::to_bson(&json) {
        Ok(Bson::Document(doc)) => Ok(doc),
        Ok(_) => Err(storage_error("Expected BSON document, got non-object")),
        Err(e) => Err(storage_error(format!(
            "Failed to convert JSON to BSON: {}",
            e
        ))),
    }
}

/// Strip extended JSON wrappers so values deserialize as plain JSON.
fn unwrap_extended_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(Value::String(id)) = map.get("$oid") {
                    return Value::String(id.clone());
                }
                if let Some(inner) = map.get("$date") {
                    return unwrap_date(inner.clone());
                }
                if let Some(n) = map
                    .get("$numberLong")
                    .and_then(Value::as_str)
                    .and_then(|n| n.parse::<i64>().ok())
                {
                    return Value::from(n);
                }
            }
            Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, unwrap_extended_json(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(unwrap_extended_json).collect()),
        other => other,
    }
}

/// `$date` holds an ISO 8601 string, or `{"$numberLong": millis}` outside 1970..9999.
fn unwrap_date(inner: Value) -> Value {
    match unwrap_extended_json(inner) {
        Value::Number(millis) => millis
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| Value::String(dt.to_rfc3339()))
            .unwrap_or(Value::Null),
        other => other,
    }
}

/// Convert a BSON Document into a `Deal`, renaming `_id` → `id`.
fn document_to_deal(mut doc: Document) -> Result<Deal, StorageError> {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    let json = unwrap_extended_json(Bson::Document(doc).into_relaxed_extjson());
    serde_json::from_value(json)
        .map_err(|e| decode_error(format!("Failed to deserialize deal from document: {}", e)))
}

/// Convert a `Deal` into a BSON Document for insertion.
///
/// `id` becomes `_id` when present, and `date` is stored as a BSON date.
fn deal_to_document(deal: &Deal) -> Result<Document, StorageError> {
    let json = serde_json::to_value(deal)
        .map_err(|e| storage_error(format!("Failed to serialize deal: {}", e)))?;
    let mut doc = json_to_document(json)?;

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }
    doc.insert(
        fields::DATE,
        Bson::DateTime(bson::DateTime::from_millis(deal.date.timestamp_millis())),
    );

    Ok(doc)
}

// ---------------------------------------------------------------------------
// MongoDealStore
// ---------------------------------------------------------------------------

/// Deal store backed by a MongoDB collection.
///
/// # Example
///
/// ```rust,ignore
/// use deals::storage::MongoDealStore;
///
/// let store = MongoDealStore::connect(&config.mongodb).await?;
/// store.ensure_indexes(&config.text_fields).await?;
/// let service = DealsService::new(store);
/// ```
#[derive(Clone, Debug)]
pub struct MongoDealStore {
    database: Database,
    collection: String,
}

impl MongoDealStore {
    /// Create a store over the `deals` collection of `database`.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            collection: "deals".to_string(),
        }
    }

    /// Use a different collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Connect using the configured URI, database and collection.
    pub async fn connect(config: &MongoConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Connected to MongoDB deal store"
        );
        Ok(Self::new(client.database(&config.database)).with_collection(&config.collection))
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(&self.collection)
    }

    /// Create the indexes deal queries rely on.
    ///
    /// - a text index over `text_fields`, required by free-text search
    /// - `category: 1` for category browsing
    ///
    /// Idempotent; safe to call on every startup.
    pub async fn ensure_indexes(&self, text_fields: &[String]) -> Result<()> {
        let mut indexes = vec![
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .build(),
        ];

        if !text_fields.is_empty() {
            let mut keys = Document::new();
            for field in text_fields {
                keys.insert(field.as_str(), "text");
            }
            indexes.push(IndexModel::builder().keys(keys).build());
        }

        self.collection().create_indexes(indexes).await?;

        tracing::info!(
            collection = %self.collection,
            text_fields = ?text_fields,
            "Ensured deal indexes"
        );
        Ok(())
    }

    /// Insert deals, e.g. to seed a collection.
    pub async fn insert_many(&self, deals: &[Deal]) -> Result<()> {
        let docs = deals
            .iter()
            .map(deal_to_document)
            .collect::<Result<Vec<_>, _>>()?;
        if docs.is_empty() {
            return Ok(());
        }

        self.collection().insert_many(docs).await?;
        Ok(())
    }
}

#[async_trait]
impl DealStore for MongoDealStore {
    /// Run `find(filter).skip(n).limit(n).sort(spec)` and decode every document.
    ///
    /// Driver errors are returned as-is.
    async fn find(&self, query: &DealQuery) -> Result<Vec<Deal>> {
        // The driver takes an unsigned skip.
        let skip = u64::try_from(query.skip).map_err(|_| {
            storage_error(format!(
                "skip value must be non-negative, got {}",
                query.skip
            ))
        })?;
        let filter = json_to_document(query.predicate.to_json())?;

        tracing::debug!(
            backend = BACKEND,
            collection = %self.collection,
            predicate = %filter,
            sort = %query.sort.to_json(),
            skip = query.skip,
            limit = query.limit,
            "Executing deals query"
        );

        let collection = self.collection();
        let mut find = collection.find(filter).skip(skip).limit(query.limit);
        if !query.sort.is_empty() {
            find = find.sort(json_to_document(query.sort.to_json())?);
        }

        let cursor = find.await?;
        let docs: Vec<Document> = cursor.try_collect().await?;

        tracing::debug!(backend = BACKEND, count = docs.len(), "Deals query returned");

        docs.into_iter()
            .map(|doc| document_to_deal(doc).map_err(Into::into))
            .collect()
    }
}
