//! In-memory implementation of RecordService for development and tests

use crate::core::error::{RecordError, Result, StorageError};
use crate::core::record::{TrainingDetails, TrainingRecord};
use crate::core::service::RecordService;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory record store
///
/// Keeps records in insertion order. Uses an RwLock so concurrent writes to
/// the same id are serialized (last writer wins).
#[derive(Clone, Default)]
pub struct InMemoryRecordService {
    records: Arc<RwLock<IndexMap<Uuid, TrainingRecord>>>,
}

impl InMemoryRecordService {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(e: impl std::fmt::Display) -> StorageError {
        StorageError::IntegrityError {
            message: format!("in-memory store lock poisoned: {}", e),
        }
    }
}

#[async_trait]
impl RecordService for InMemoryRecordService {
    async fn list(&self) -> Result<Vec<TrainingRecord>> {
        let records = self.records.read().map_err(Self::poisoned)?;
        Ok(records.values().cloned().collect())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<TrainingRecord>> {
        let records = self.records.read().map_err(Self::poisoned)?;
        Ok(records.get(id).cloned())
    }

    async fn create(&self, details: TrainingDetails) -> Result<TrainingRecord> {
        let record = TrainingRecord::new(Uuid::new_v4(), details);
        let mut records = self.records.write().map_err(Self::poisoned)?;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: &Uuid, details: TrainingDetails) -> Result<TrainingRecord> {
        let mut records = self.records.write().map_err(Self::poisoned)?;
        let slot = records
            .get_mut(id)
            .ok_or(RecordError::NotFound { id: *id })?;
        slot.details = details;
        Ok(slot.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut records = self.records.write().map_err(Self::poisoned)?;
        Ok(records.shift_remove(id).is_some())
    }
}
