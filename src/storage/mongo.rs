//! MongoDB storage backend using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! Records live in a single `trainings` collection. They are serialized via
//! `serde_json::Value` as an intermediate format, then converted to BSON
//! documents, so UUIDs and dates are stored as the same strings the REST API
//! exchanges. The `id` field is mapped to MongoDB's `_id` convention.

use crate::core::error::{RecordError, Result, StorageError, TrainingError};
use crate::core::record::{TrainingDetails, TrainingRecord};
use crate::core::service::RecordService;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Database};
use uuid::Uuid;

const BACKEND: &str = "mongodb";
const COLLECTION: &str = "trainings";

fn query_error(context: &str, e: impl std::fmt::Display) -> TrainingError {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message: format!("{}: {}", context, e),
    }
    .into()
}

/// Convert a record into a BSON document, renaming `id` → `_id`.
fn record_to_document(record: &TrainingRecord) -> Result<Document> {
    let json = serde_json::to_value(record).map_err(|e| query_error("serialize record", e))?;
    let mut doc = match mongodb::bson::to_bson(&json) {
        Ok(Bson::Document(d)) => d,
        Ok(_) => {
            return Err(StorageError::IntegrityError {
                message: "record did not serialize to a document".to_string(),
            }
            .into());
        }
        Err(e) => return Err(query_error("convert record to BSON", e)),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }
    Ok(doc)
}

/// Convert a stored document back into a record.
///
/// `TrainingRecord` accepts `_id` directly, so no renaming is needed.
fn document_to_record(doc: Document) -> Result<TrainingRecord> {
    let json = Bson::Document(doc).into_relaxed_extjson();
    serde_json::from_value(json).map_err(|e| {
        StorageError::IntegrityError {
            message: format!("stored training record is malformed: {}", e),
        }
        .into()
    })
}

fn id_filter(id: &Uuid) -> Document {
    doc! { "_id": id.to_string() }
}

/// Record store backed by a MongoDB database
///
/// # Example
///
/// ```rust,ignore
/// let service = MongoRecordService::connect("mongodb://localhost:27017", "training").await?;
/// let record = service.create(details).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoRecordService {
    database: Database,
}

impl MongoRecordService {
    /// Wrap an existing database handle
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Connect to `uri` and use `database`
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await.map_err(|e| {
            TrainingError::from(StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })
        })?;
        tracing::info!(database, "connected to MongoDB");
        Ok(Self::new(client.database(database)))
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(COLLECTION)
    }
}

#[async_trait]
impl RecordService for MongoRecordService {
    /// List all records in natural (insertion) order.
    async fn list(&self) -> Result<Vec<TrainingRecord>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .await
            .map_err(|e| query_error("list trainings", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| query_error("collect trainings", e))?;

        docs.into_iter().map(document_to_record).collect()
    }

    async fn get(&self, id: &Uuid) -> Result<Option<TrainingRecord>> {
        let doc = self
            .collection()
            .find_one(id_filter(id))
            .await
            .map_err(|e| query_error("get training", e))?;

        doc.map(document_to_record).transpose()
    }

    async fn create(&self, details: TrainingDetails) -> Result<TrainingRecord> {
        let record = TrainingRecord::new(Uuid::new_v4(), details);
        self.collection()
            .insert_one(record_to_document(&record)?)
            .await
            .map_err(|e| query_error("create training", e))?;
        Ok(record)
    }

    /// Replace the stored document.
    ///
    /// Returns `NotFound` if no document matched.
    async fn update(&self, id: &Uuid, details: TrainingDetails) -> Result<TrainingRecord> {
        let record = TrainingRecord::new(*id, details);
        let result = self
            .collection()
            .replace_one(id_filter(id), record_to_document(&record)?)
            .await
            .map_err(|e| query_error("update training", e))?;

        if result.matched_count == 0 {
            return Err(RecordError::NotFound { id: *id }.into());
        }
        Ok(record)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(id_filter(id))
            .await
            .map_err(|e| query_error("delete training", e))?;

        Ok(result.deleted_count > 0)
    }
}
