//! Service trait for the record store

use crate::core::error::Result;
use crate::core::record::{TrainingDetails, TrainingRecord};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage contract for training records
///
/// Every call is atomic: it either fully applies or returns an error.
/// Payloads are validated before they reach an implementation.
#[async_trait]
pub trait RecordService: Send + Sync {
    /// List every record in store order
    async fn list(&self) -> Result<Vec<TrainingRecord>>;

    /// Get a record by ID
    async fn get(&self, id: &Uuid) -> Result<Option<TrainingRecord>>;

    /// Store a new record and assign its id
    async fn create(&self, details: TrainingDetails) -> Result<TrainingRecord>;

    /// Replace every field of an existing record
    ///
    /// Fails with `RecordError::NotFound` if the id is unknown.
    async fn update(&self, id: &Uuid, details: TrainingDetails) -> Result<TrainingRecord>;

    /// Delete a record
    ///
    /// Returns whether a record was removed. Other records are never affected.
    async fn delete(&self, id: &Uuid) -> Result<bool>;
}
